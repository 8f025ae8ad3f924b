//! Order model for the pairswap engine.
//!
//! An order is a maker's terms-bearing offer to trade. It is a value object:
//! immutable once constructed, supplied fresh by callers per invocation.
//! Only its *fill state* (tracked by the exchange's ledger, keyed by the
//! order's identity hash) ever mutates.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, OrderHash, RegistryId, Selector, TargetId, constants};

/// An offer to trade, governed by a pluggable predicate.
///
/// The order's identity is the deterministic hash of all its fields
/// ([`Order::hash`]). Two orders with identical fields collapse to the same
/// identity and share fill state; `salt` disambiguates otherwise-identical
/// orders so a maker can post several independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The proxy-registry instance this order trusts.
    pub registry: RegistryId,
    /// The order's authorizing party (ed25519 verifying key).
    pub maker: AccountId,
    /// Host of the predicate that governs satisfaction of this order.
    pub static_target: TargetId,
    /// Which predicate function on the static target.
    pub static_selector: Selector,
    /// Opaque parameters interpreted only by the predicate
    /// (asset targets, token id, price, ...).
    pub static_extradata: Vec<u8>,
    /// Maximum cumulative quantity this order may ever be filled for,
    /// in protocol-defined units. Monotonically consumed.
    pub maximum_fill: u64,
    /// Start of the validity window, unix seconds, inclusive.
    pub listing_time: i64,
    /// End of the validity window, unix seconds, exclusive.
    /// `0` means the order never expires.
    pub expiration_time: i64,
    /// Disambiguates otherwise-identical orders.
    pub salt: u64,
}

impl Order {
    /// Deterministic identity hash: SHA-256 over a domain tag and the exact
    /// little-endian byte encoding of every field.
    ///
    /// Any change to the field set or encoding changes every order's
    /// identity and breaks signature verification, so this encoding is
    /// versioned via [`constants::ORDER_HASH_TAG`].
    #[must_use]
    pub fn hash(&self) -> OrderHash {
        let mut hasher = Sha256::new();
        hasher.update(constants::ORDER_HASH_TAG);
        hasher.update(self.registry.0.as_bytes());
        hasher.update(self.maker.0);
        hasher.update(self.static_target.0.as_bytes());
        hasher.update(self.static_selector.0);
        hasher.update((self.static_extradata.len() as u64).to_le_bytes());
        hasher.update(&self.static_extradata);
        hasher.update(self.maximum_fill.to_le_bytes());
        hasher.update(self.listing_time.to_le_bytes());
        hasher.update(self.expiration_time.to_le_bytes());
        hasher.update(self.salt.to_le_bytes());
        OrderHash(hasher.finalize().into())
    }

    /// Whether the validity window has opened at `now` (inclusive start).
    #[must_use]
    pub fn is_listed_at(&self, now: i64) -> bool {
        self.listing_time <= now
    }

    /// Whether the validity window has closed at `now` (exclusive end).
    /// An `expiration_time` of zero means the order never expires.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expiration_time != 0 && now >= self.expiration_time
    }

    /// Both window checks in one call.
    #[must_use]
    pub fn is_live_at(&self, now: i64) -> bool {
        self.is_listed_at(now) && !self.is_expired_at(now)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// An always-live order with empty extradata, useful as a baseline.
    pub fn dummy(maker: AccountId, maximum_fill: u64, salt: u64) -> Self {
        Self {
            registry: RegistryId(uuid::Uuid::nil()),
            maker,
            static_target: TargetId(uuid::Uuid::nil()),
            static_selector: Selector([0u8; 4]),
            static_extradata: Vec::new(),
            maximum_fill,
            listing_time: 0,
            expiration_time: 0,
            salt,
        }
    }
}
