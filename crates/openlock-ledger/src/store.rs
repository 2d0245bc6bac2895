//! The ledger store contract.
//!
//! OpenLock mutates two logically related entities in one claim or
//! unlock (the asset record and the lookup index) and the key-value
//! model has no native cross-key transaction. The contract therefore
//! exposes [`LedgerStore::apply`] as an explicit all-or-nothing commit
//! boundary: engines stage every related write into one [`WriteBatch`]
//! and issue exactly one `apply` per state-changing invocation.
//!
//! # Contracts
//!
//! - `get` returns `Ok(None)` for an absent key; errors are reserved
//!   for real storage failures.
//! - `range_scan` yields entries in ascending key order and is lazy:
//!   a mid-scan failure surfaces as an `Err` item and ends the scan.
//!   Restart means rescan.
//! - `apply` commits every operation in the batch or none of them.

use openlock_types::Result;

/// One staged mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Put { key: String, value: Vec<u8> },
    Delete { key: String },
}

/// An ordered set of mutations committed as a unit.
#[derive(Debug, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a put.
    pub fn put(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.ops.push(WriteOp::Put {
            key: key.into(),
            value,
        });
    }

    /// Stage a delete. Deleting an absent key is not an error.
    pub fn delete(&mut self, key: impl Into<String>) {
        self.ops.push(WriteOp::Delete { key: key.into() });
    }

    /// The staged operations, in staging order.
    #[must_use]
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Consume the batch, yielding its operations.
    #[must_use]
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// The durable key-value ledger the core operates against.
pub trait LedgerStore {
    /// Read a key. Absent keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a single key.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Delete a single key. Deleting an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// Lazily scan all entries whose key starts with `prefix`, in
    /// ascending key order.
    fn range_scan(
        &self,
        prefix: &str,
    ) -> Box<dyn Iterator<Item = Result<(String, Vec<u8>)>> + '_>;

    /// Commit a batch atomically: every staged operation or none.
    fn apply(&mut self, batch: WriteBatch) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_preserves_staging_order() {
        let mut batch = WriteBatch::new();
        batch.put("a", b"1".to_vec());
        batch.delete("b");
        batch.put("c", b"2".to_vec());

        assert_eq!(batch.len(), 3);
        assert!(!batch.is_empty());
        assert_eq!(
            batch.ops()[1],
            WriteOp::Delete {
                key: "b".to_string()
            }
        );

        let ops = batch.into_ops();
        assert!(matches!(&ops[0], WriteOp::Put { key, .. } if key == "a"));
        assert!(matches!(&ops[2], WriteOp::Put { key, .. } if key == "c"));
    }

    #[test]
    fn empty_batch() {
        let batch = WriteBatch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }
}
