mod fallback;
mod memory;
mod redb_store;
mod traits;

pub use fallback::{BriefLog, StoreMode};
pub use memory::MemoryBriefStore;
pub use redb_store::RedbBriefStore;
pub use traits::BriefStore;
