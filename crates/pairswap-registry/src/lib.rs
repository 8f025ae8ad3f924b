//! # pairswap-registry
//!
//! **Execution plane**: world state, call-target dispatch, delegated
//! proxies, and the proxy registry.
//!
//! ## Architecture
//!
//! The execution plane sits below the matching core:
//! 1. **StateStore**: the only mutable world state, snapshotable by clone
//! 2. **Machine**: routes [`Call`](pairswap_types::Call)s to registered
//!    [`CallTarget`]s under a depth-bounded [`CallContext`](pairswap_types::CallContext)
//! 3. **Proxy**: per-owner delegated execution agent with restricted call modes
//! 4. **ProxyRegistry**: owner → proxy mapping with one-shot exchange authentication
//! 5. **Atomizer**: composes several calls into one all-or-nothing call
//!
//! ## Call Flow
//!
//! ```text
//! Exchange → ProxyRegistry.execute_for() → Proxy (authz + mode check)
//!          → Machine.execute() → CallTarget.execute() → StateStore
//! ```
//!
//! The matching core snapshots the `StateStore` before routing a match's
//! calls and restores it if either call fails — settlement is all-or-nothing.

pub mod atomizer;
pub mod machine;
pub mod proxy;
pub mod registry;
pub mod state;

pub use atomizer::Atomizer;
pub use machine::{CallTarget, Machine};
pub use proxy::Proxy;
pub use registry::{ProxyRegistry, RegistrySet};
pub use state::StateStore;
