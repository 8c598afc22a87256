use crate::error::Result;
use crate::store::traits::BriefStore;
use crate::types::BriefRecord;
use chrono::Utc;
use std::sync::RwLock;

/// Non-durable in-memory brief log. Used as the startup fallback when
/// the durable backing cannot be opened, and as a test double.
#[derive(Default)]
pub struct MemoryBriefStore {
    records: RwLock<Vec<BriefRecord>>,
}

impl MemoryBriefStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BriefStore for MemoryBriefStore {
    fn append(&self, date: &str, content: &str) -> Result<BriefRecord> {
        let mut records = self.records.write().unwrap();
        let next_id = records.last().map(|r| r.id + 1).unwrap_or(1);
        let record = BriefRecord {
            id: next_id,
            date: date.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    fn latest(&self) -> Result<Option<BriefRecord>> {
        Ok(self.records.read().unwrap().last().cloned())
    }

    fn list(&self) -> Result<Vec<BriefRecord>> {
        let mut records = self.records.read().unwrap().clone();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_matches_contract() {
        let store = MemoryBriefStore::new();
        assert!(store.latest().unwrap().is_none());

        let first = store.append("2026-08-29", "{}").unwrap();
        let second = store.append("2026-08-30", "{}").unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let latest = store.latest().unwrap().unwrap();
        assert_eq!(latest.id, 2);

        let list = store.list().unwrap();
        assert_eq!(list[0].id, 2);
        assert_eq!(list[1].id, 1);
    }
}
