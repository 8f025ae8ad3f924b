//! Permanent per-order fill, cancellation, and approval accounting.
//!
//! Entries are never evicted: replay protection rests on this ledger
//! remembering every order identity it has ever filled or cancelled.
//! Cumulative fills only grow, and cancellation is terminal.

use std::collections::{HashMap, HashSet};

use pairswap_types::{OrderHash, PairswapError, Result};

/// Tracks cumulative fills, cancellations, and on-ledger approvals,
/// keyed by order identity.
#[derive(Debug, Default)]
pub struct FillLedger {
    filled: HashMap<OrderHash, u64>,
    cancelled: HashSet<OrderHash>,
    approved: HashSet<OrderHash>,
}

impl FillLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative fill committed against an order identity. Unknown orders
    /// read as zero.
    #[must_use]
    pub fn filled_amount(&self, order: OrderHash) -> u64 {
        self.filled.get(&order).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_cancelled(&self, order: OrderHash) -> bool {
        self.cancelled.contains(&order)
    }

    #[must_use]
    pub fn is_approved(&self, order: OrderHash) -> bool {
        self.approved.contains(&order)
    }

    /// Whether `requested` more units fit under `maximum` given what has
    /// already been committed.
    pub fn check_capacity(&self, order: OrderHash, requested: u64, maximum: u64) -> Result<()> {
        let filled = self.filled_amount(order);
        let fits = filled
            .checked_add(requested)
            .is_some_and(|total| total <= maximum);
        if fits {
            Ok(())
        } else {
            Err(PairswapError::CapacityExceeded {
                order,
                filled,
                requested,
                maximum,
            })
        }
    }

    /// Commit a fill. Callers must have passed [`check_capacity`] first;
    /// the ledger itself only guards against counter overflow.
    ///
    /// [`check_capacity`]: FillLedger::check_capacity
    pub fn apply_fill(&mut self, order: OrderHash, fill: u64) -> Result<()> {
        let slot = self.filled.entry(order).or_insert(0);
        *slot = slot
            .checked_add(fill)
            .ok_or_else(|| PairswapError::Internal(format!("fill counter overflow for {order}")))?;
        Ok(())
    }

    /// Mark an order cancelled. Idempotent; returns whether this call was
    /// the one that cancelled it.
    pub fn cancel(&mut self, order: OrderHash) -> bool {
        self.cancelled.insert(order)
    }

    /// Record an on-ledger approval. Idempotent; returns whether this call
    /// was the one that approved it.
    pub fn approve(&mut self, order: OrderHash) -> bool {
        self.approved.insert(order)
    }

    /// Number of order identities with committed fills.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.filled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(byte: u8) -> OrderHash {
        OrderHash([byte; 32])
    }

    #[test]
    fn unknown_orders_read_as_zero() {
        let ledger = FillLedger::new();
        assert_eq!(ledger.filled_amount(order(1)), 0);
        assert!(!ledger.is_cancelled(order(1)));
        assert!(!ledger.is_approved(order(1)));
    }

    #[test]
    fn fills_accumulate() {
        let mut ledger = FillLedger::new();
        ledger.apply_fill(order(1), 3).unwrap();
        ledger.apply_fill(order(1), 2).unwrap();
        assert_eq!(ledger.filled_amount(order(1)), 5);
        assert_eq!(ledger.order_count(), 1);
    }

    #[test]
    fn capacity_boundary_is_inclusive() {
        let mut ledger = FillLedger::new();
        ledger.apply_fill(order(1), 7).unwrap();

        assert!(ledger.check_capacity(order(1), 3, 10).is_ok());
        let err = ledger.check_capacity(order(1), 4, 10).unwrap_err();
        assert!(matches!(
            err,
            PairswapError::CapacityExceeded {
                filled: 7,
                requested: 4,
                maximum: 10,
                ..
            }
        ));
    }

    #[test]
    fn exhausted_order_has_no_capacity() {
        let mut ledger = FillLedger::new();
        ledger.apply_fill(order(1), 10).unwrap();
        assert!(ledger.check_capacity(order(1), 1, 10).is_err());
    }

    #[test]
    fn capacity_check_survives_u64_overflow() {
        let mut ledger = FillLedger::new();
        ledger.apply_fill(order(1), u64::MAX - 1).unwrap();
        assert!(ledger.check_capacity(order(1), u64::MAX, u64::MAX).is_err());
    }

    #[test]
    fn cancel_and_approve_are_idempotent() {
        let mut ledger = FillLedger::new();
        assert!(ledger.cancel(order(1)));
        assert!(!ledger.cancel(order(1)));
        assert!(ledger.is_cancelled(order(1)));

        assert!(ledger.approve(order(2)));
        assert!(!ledger.approve(order(2)));
        assert!(ledger.is_approved(order(2)));
    }

    #[test]
    fn identities_are_independent() {
        let mut ledger = FillLedger::new();
        ledger.apply_fill(order(1), 5).unwrap();
        ledger.cancel(order(2));

        assert_eq!(ledger.filled_amount(order(2)), 0);
        assert!(!ledger.is_cancelled(order(1)));
    }
}
