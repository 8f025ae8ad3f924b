//! # pairswap-types
//!
//! Shared types, errors, and configuration for the **pairswap** matching
//! and atomic-settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`RegistryId`], [`TargetId`], [`Selector`], [`OrderHash`]
//! - **Order model**: [`Order`] and its deterministic identity hash
//! - **Call model**: [`Call`], [`HowToCall`], [`CallContext`]
//! - **Receipt model**: [`MatchReceipt`]
//! - **Configuration**: [`ExchangeConfig`]
//! - **Errors**: [`PairswapError`] with `PS_ERR_` prefix codes
//! - **Constants**: domain tags and system-wide limits

pub mod call;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod order;
pub mod receipt;

// Re-export all primary types at crate root for ergonomic imports:
//   use pairswap_types::{Order, Call, HowToCall, PairswapError, ...};

pub use call::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use receipt::*;

// Constants are accessed via `pairswap_types::constants::FOO`
// (not re-exported to avoid name collisions).
