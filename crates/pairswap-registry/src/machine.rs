//! Call machine: routes concrete calls to registered targets.
//!
//! Targets are stateless handlers; all mutable state lives in the machine's
//! [`StateStore`]. A handler receives the machine itself so it can re-enter
//! dispatch (the atomizer does), with recursion bounded by the context depth.

use std::collections::HashMap;
use std::sync::Arc;

use pairswap_types::{AccountId, Call, CallContext, PairswapError, Result, TargetId};

use crate::state::StateStore;

/// A call target: decodes its payload and acts on the machine's state.
///
/// `this` is the target id the call was addressed to, so one handler
/// instance can serve several installed targets, each with its own state
/// namespace. Implementations must be pure functions of `(state, ctx, data)`
/// — no interior mutability, no external I/O — so routed execution stays
/// deterministic and replayable.
pub trait CallTarget: Send + Sync {
    fn execute(
        &self,
        machine: &mut Machine,
        this: TargetId,
        ctx: CallContext,
        data: &[u8],
    ) -> Result<()>;
}

/// Routes calls to installed targets over a shared [`StateStore`].
#[derive(Default)]
pub struct Machine {
    targets: HashMap<TargetId, Arc<dyn CallTarget>>,
    state: StateStore,
}

impl Machine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a handler under a fresh target id and return the id.
    pub fn install(&mut self, handler: Arc<dyn CallTarget>) -> TargetId {
        let id = TargetId::new();
        self.targets.insert(id, handler);
        id
    }

    /// Execute a call under the given context.
    ///
    /// The call's `how` field is resolved at the proxy layer (it selects the
    /// sender identity); by the time a call reaches the machine the context
    /// already carries the effective sender.
    pub fn execute(&mut self, call: &Call, ctx: CallContext) -> Result<()> {
        let handler = self
            .targets
            .get(&call.target)
            .cloned()
            .ok_or(PairswapError::TargetNotFound(call.target))?;
        handler.execute(self, call.target, ctx, &call.data)
    }

    /// Execute a call directly as `sender`, outside any proxy.
    /// Used by callers acting on their own state (mints, approvals).
    pub fn execute_as(&mut self, sender: AccountId, call: &Call) -> Result<()> {
        self.execute(call, CallContext::root(sender))
    }

    #[must_use]
    pub fn state(&self) -> &StateStore {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StateStore {
        &mut self.state
    }

    /// Snapshot the world state. Restoring the snapshot discards every
    /// mutation made since — this is the settlement rollback primitive.
    #[must_use]
    pub fn snapshot(&self) -> StateStore {
        self.state.clone()
    }

    pub fn restore(&mut self, snapshot: StateStore) {
        self.state = snapshot;
    }

    /// Number of installed targets.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}
