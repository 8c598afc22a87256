use crate::error::Result;
use crate::types::BriefRecord;

/// Append-only log of generated briefs.
///
/// The store exclusively owns id and timestamp assignment. There is no
/// update or delete: records are immutable once written. A write that
/// completes is visible to every subsequent read — implementations
/// serialize writes internally (single-writer discipline).
pub trait BriefStore: Send + Sync {
    /// Append a brief. Assigns the next monotonic id and the current
    /// timestamp; `content` is the serialized document, opaque here.
    fn append(&self, date: &str, content: &str) -> Result<BriefRecord>;

    /// The most recently appended record, if any.
    fn latest(&self) -> Result<Option<BriefRecord>>;

    /// All records, most recent `created_at` first.
    fn list(&self) -> Result<Vec<BriefRecord>>;
}
