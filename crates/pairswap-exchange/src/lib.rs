//! # pairswap-exchange
//!
//! **Matching core**: takes two live, authorized, capacity-checked orders
//! plus their concrete calls, lets each order's predicate veto or count the
//! match, routes both calls through the makers' proxies, and commits the
//! fills — atomically.
//!
//! ## Match pipeline
//!
//! [`Exchange::atomic_match`] runs a fixed gate sequence; the first failing
//! gate aborts with an error naming it, and nothing before gate 7 mutates
//! durable state:
//!
//! 1. Structural and window validity of both orders
//! 2. Maker authorization (signature, direct call, or on-ledger approval)
//! 3. Remaining-capacity pre-check
//! 4. Predicate evaluation (terms + execution-mode vetting, fill counting)
//! 5. Exact capacity check for the counted fills
//! 6. Routed execution of both calls, all-or-nothing via state snapshot
//! 7. Fill commit and receipt emission
//!
//! Replay protection rests entirely on fill-vs-maximum accounting in the
//! permanent [`FillLedger`] — an exhausted or cancelled order identity can
//! never match again.

pub mod authorization;
pub mod exchange;
pub mod fill_ledger;

pub use authorization::{Approval, order_digest, sign_order, verify_signature};
pub use exchange::{Exchange, MatchSide};
pub use fill_ledger::FillLedger;
