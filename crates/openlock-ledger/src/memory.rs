//! In-memory ledger backed by a `BTreeMap`.
//!
//! The BTreeMap gives ordered range scans for free, and batch commits
//! are trivially atomic within one process. This is the reference
//! store for tests and single-process embedders; a durable backend
//! implements the same [`LedgerStore`] contract.

use std::collections::BTreeMap;
use std::ops::Bound;

use openlock_types::Result;

use crate::store::{LedgerStore, WriteBatch, WriteOp};

/// BTreeMap-backed [`LedgerStore`].
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: BTreeMap<String, Vec<u8>>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.state.contains_key(key)
    }
}

impl LedgerStore for MemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.state.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.state.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.state.remove(key);
        Ok(())
    }

    fn range_scan(
        &self,
        prefix: &str,
    ) -> Box<dyn Iterator<Item = Result<(String, Vec<u8>)>> + '_> {
        let prefix = prefix.to_string();
        let start = Bound::Included(prefix.clone());
        Box::new(
            self.state
                .range::<String, _>((start, Bound::Unbounded))
                .take_while(move |(key, _)| key.starts_with(&prefix))
                .map(|(key, value)| Ok((key.clone(), value.clone()))),
        )
    }

    fn apply(&mut self, batch: WriteBatch) -> Result<()> {
        // In-process map mutation cannot fail partway; the batch
        // commits wholesale.
        for op in batch.into_ops() {
            match op {
                WriteOp::Put { key, value } => {
                    self.state.insert(key, value);
                }
                WriteOp::Delete { key } => {
                    self.state.remove(&key);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_put_delete() {
        let mut ledger = MemoryLedger::new();
        assert_eq!(ledger.get("k").unwrap(), None);

        ledger.put("k", b"v".to_vec()).unwrap();
        assert_eq!(ledger.get("k").unwrap(), Some(b"v".to_vec()));
        assert!(ledger.contains("k"));

        ledger.delete("k").unwrap();
        assert_eq!(ledger.get("k").unwrap(), None);
        assert!(ledger.is_empty());

        // Deleting an absent key is not an error.
        ledger.delete("k").unwrap();
    }

    #[test]
    fn range_scan_is_ordered_and_prefix_bounded() {
        let mut ledger = MemoryLedger::new();
        ledger.put("asset:bond:b02", b"2".to_vec()).unwrap();
        ledger.put("asset:bond:b01", b"1".to_vec()).unwrap();
        ledger.put("lock:bond:b01", b"x".to_vec()).unwrap();
        ledger.put("asset:bond:b10", b"3".to_vec()).unwrap();

        let keys: Vec<String> = ledger
            .range_scan("asset:")
            .map(|entry| entry.unwrap().0)
            .collect();
        assert_eq!(keys, ["asset:bond:b01", "asset:bond:b02", "asset:bond:b10"]);
    }

    #[test]
    fn range_scan_empty_prefix_sees_everything() {
        let mut ledger = MemoryLedger::new();
        ledger.put("a", b"1".to_vec()).unwrap();
        ledger.put("b", b"2".to_vec()).unwrap();
        assert_eq!(ledger.range_scan("").count(), 2);
    }

    #[test]
    fn batch_applies_all_ops() {
        let mut ledger = MemoryLedger::new();
        ledger.put("stale", b"old".to_vec()).unwrap();

        let mut batch = WriteBatch::new();
        batch.put("fresh", b"new".to_vec());
        batch.delete("stale");
        ledger.apply(batch).unwrap();

        assert_eq!(ledger.get("fresh").unwrap(), Some(b"new".to_vec()));
        assert_eq!(ledger.get("stale").unwrap(), None);
    }

    #[test]
    fn batch_last_write_wins() {
        let mut ledger = MemoryLedger::new();
        let mut batch = WriteBatch::new();
        batch.put("k", b"first".to_vec());
        batch.put("k", b"second".to_vec());
        ledger.apply(batch).unwrap();
        assert_eq!(ledger.get("k").unwrap(), Some(b"second".to_vec()));
    }
}
