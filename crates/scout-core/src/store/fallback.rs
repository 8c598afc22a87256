use crate::error::Result;
use crate::store::memory::MemoryBriefStore;
use crate::store::redb_store::RedbBriefStore;
use crate::store::traits::BriefStore;
use crate::types::BriefRecord;
use log::{info, warn};
use std::path::Path;

/// Which backing the log is running on. Exposed through the status
/// endpoint so operators can tell a degraded instance from a healthy one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Durable,
    InMemory,
}

impl StoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreMode::Durable => "durable",
            StoreMode::InMemory => "in-memory",
        }
    }
}

/// Brief log with startup degradation: tries the durable redb backing
/// first and falls back to an in-memory log rather than preventing the
/// service from starting. The fallback is logged, never surfaced to
/// callers as a failure.
pub struct BriefLog {
    inner: Box<dyn BriefStore>,
    mode: StoreMode,
}

impl BriefLog {
    /// Open the durable log at `path`, degrading to in-memory on failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        match RedbBriefStore::open(&path) {
            Ok(store) => {
                info!("Brief log open at {:?} (durable)", path.as_ref());
                Self {
                    inner: Box::new(store),
                    mode: StoreMode::Durable,
                }
            }
            Err(e) => {
                warn!(
                    "Durable brief log unavailable at {:?} ({}); continuing in-memory — history will not survive restart",
                    path.as_ref(),
                    e
                );
                Self::in_memory()
            }
        }
    }

    /// A log that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            inner: Box::new(MemoryBriefStore::new()),
            mode: StoreMode::InMemory,
        }
    }

    /// Non-fatal status query: which backing is live.
    pub fn mode(&self) -> StoreMode {
        self.mode
    }
}

impl BriefStore for BriefLog {
    fn append(&self, date: &str, content: &str) -> Result<BriefRecord> {
        self.inner.append(date, content)
    }

    fn latest(&self) -> Result<Option<BriefRecord>> {
        self.inner.latest()
    }

    fn list(&self) -> Result<Vec<BriefRecord>> {
        self.inner.list()
    }
}
