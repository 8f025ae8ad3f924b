//! World state: the only mutable store the execution plane touches.
//!
//! Cells are `u64` values keyed by `(target, key-bytes)`. Each call target
//! owns its key namespace; the machine never interprets keys. Snapshots are
//! plain clones, which is what makes match settlement all-or-nothing: the
//! matching core clones the store, routes both calls, and restores the
//! clone if either fails.

use std::collections::HashMap;

use pairswap_types::{PairswapError, Result, TargetId};

/// Snapshotable `(target, key) → u64` cell map.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    cells: HashMap<(TargetId, Vec<u8>), u64>,
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a cell. Absent cells read as zero.
    #[must_use]
    pub fn get(&self, target: TargetId, key: &[u8]) -> u64 {
        self.cells.get(&(target, key.to_vec())).copied().unwrap_or(0)
    }

    /// Overwrite a cell. Writing zero removes the cell so the map only
    /// holds live state.
    pub fn put(&mut self, target: TargetId, key: &[u8], value: u64) {
        if value == 0 {
            self.cells.remove(&(target, key.to_vec()));
        } else {
            self.cells.insert((target, key.to_vec()), value);
        }
    }

    /// Add to a cell with overflow checking.
    pub fn credit(&mut self, target: TargetId, key: &[u8], amount: u64) -> Result<()> {
        let current = self.get(target, key);
        let next = current
            .checked_add(amount)
            .ok_or_else(|| PairswapError::Internal(format!("cell overflow at {target}")))?;
        self.put(target, key, next);
        Ok(())
    }

    /// Subtract from a cell, failing if the balance is insufficient.
    pub fn debit(&mut self, target: TargetId, key: &[u8], amount: u64) -> Result<()> {
        let current = self.get(target, key);
        if current < amount {
            return Err(PairswapError::InsufficientBalance {
                needed: amount,
                available: current,
            });
        }
        self.put(target, key, current - amount);
        Ok(())
    }

    /// Number of live (non-zero) cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_cell_reads_zero() {
        let state = StateStore::new();
        assert_eq!(state.get(TargetId::new(), b"bal:x"), 0);
    }

    #[test]
    fn credit_and_debit_roundtrip() {
        let mut state = StateStore::new();
        let target = TargetId::new();
        state.credit(target, b"bal:x", 100).unwrap();
        assert_eq!(state.get(target, b"bal:x"), 100);

        state.debit(target, b"bal:x", 40).unwrap();
        assert_eq!(state.get(target, b"bal:x"), 60);
    }

    #[test]
    fn debit_insufficient_fails_without_mutation() {
        let mut state = StateStore::new();
        let target = TargetId::new();
        state.credit(target, b"bal:x", 10).unwrap();

        let err = state.debit(target, b"bal:x", 11).unwrap_err();
        assert!(matches!(
            err,
            PairswapError::InsufficientBalance {
                needed: 11,
                available: 10
            }
        ));
        assert_eq!(state.get(target, b"bal:x"), 10);
    }

    #[test]
    fn credit_overflow_fails() {
        let mut state = StateStore::new();
        let target = TargetId::new();
        state.credit(target, b"bal:x", u64::MAX).unwrap();
        assert!(state.credit(target, b"bal:x", 1).is_err());
    }

    #[test]
    fn zero_write_removes_cell() {
        let mut state = StateStore::new();
        let target = TargetId::new();
        state.put(target, b"k", 5);
        assert_eq!(state.len(), 1);
        state.put(target, b"k", 0);
        assert!(state.is_empty());
    }

    #[test]
    fn targets_are_isolated() {
        let mut state = StateStore::new();
        let a = TargetId::new();
        let b = TargetId::new();
        state.put(a, b"k", 1);
        assert_eq!(state.get(b, b"k"), 0);
    }

    #[test]
    fn clone_is_a_snapshot() {
        let mut state = StateStore::new();
        let target = TargetId::new();
        state.put(target, b"k", 7);

        let snapshot = state.clone();
        state.put(target, b"k", 99);
        assert_eq!(snapshot.get(target, b"k"), 7);
    }
}
