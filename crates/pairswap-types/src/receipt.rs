//! Match receipts: the record emitted when an atomic match commits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OrderHash, constants};

/// Proof that a match committed: both routed calls succeeded and the fill
/// ledger was advanced for both order identities.
///
/// `metadata` is an optional application-level correlation id supplied by
/// the caller. It exists for observability only — replay protection rests
/// entirely on fill-vs-maximum accounting, never on this field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReceipt {
    /// Identity of the first order.
    pub first_order: OrderHash,
    /// Identity of the second order.
    pub second_order: OrderHash,
    /// Fill committed against the first order.
    pub first_fill: u64,
    /// Fill committed against the second order.
    pub second_fill: u64,
    /// Caller-supplied correlation id; all zeros when absent.
    pub metadata: [u8; 32],
    /// When the match committed.
    pub matched_at: DateTime<Utc>,
}

impl MatchReceipt {
    /// Whether the caller supplied a correlation id.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        self.metadata != constants::NO_METADATA
    }
}
