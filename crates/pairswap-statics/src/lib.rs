//! # pairswap-statics
//!
//! **Predicate plane**: pluggable, stateless logic deciding whether a
//! concrete call satisfies an order's declared terms, and how much of the
//! order it fills.
//!
//! Orders address their predicate indirectly through a
//! `(static_target, static_selector)` pair, resolved by the
//! [`StaticRouter`]. The matching core never special-cases concrete
//! predicate implementations — different orders may use entirely different
//! matching semantics without core changes.
//!
//! Stock predicates:
//! - [`NonFungibleForFungible`] / [`FungibleForNonFungible`]: fixed-ratio
//!   swaps between a non-fungible and a fungible asset
//! - [`AnyCall`]: accepts any call, fill 1 (bootstrap/testing)
//!
//! The transfer payload schemas the stock predicates recognize live in
//! [`encoding`]; the feature-gated [`tokens`] module provides call-target
//! doubles implementing those schemas for tests.

pub mod any;
pub mod encoding;
pub mod market;
pub mod router;

#[cfg(any(test, feature = "test-helpers"))]
pub mod tokens;

pub use any::AnyCall;
pub use market::{FungibleForNonFungible, MarketTerms, NonFungibleForFungible};
pub use router::StaticRouter;

use pairswap_types::{Call, HowToCall, Result};

/// Pluggable order-satisfaction logic.
///
/// Implementations must be pure functions of their inputs — no side
/// effects, no external mutable state — so satisfaction checks are
/// deterministic and replayable for auditing.
pub trait PredicateEvaluator: Send + Sync + std::fmt::Debug {
    /// Decide whether `call` satisfies the order whose terms are encoded in
    /// `extradata`, given the counterparty's concrete `counter_call`.
    ///
    /// Returns the quantity the call fills (always > 0, and never more than
    /// the quantity actually encoded in the concrete call), or
    /// `PredicateRejected` if the terms are not met.
    fn evaluate(&self, extradata: &[u8], call: &Call, counter_call: &Call) -> Result<u64>;

    /// Which execution modes this predicate declares safe for the order's
    /// own call. Anything beyond plain `Call` lets the payload impersonate
    /// the proxy owner, so the default is plain calls only.
    fn allows_mode(&self, how: HowToCall) -> bool {
        matches!(how, HowToCall::Call)
    }
}
