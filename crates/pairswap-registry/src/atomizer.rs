//! Atomizer: composes several calls into one all-or-nothing call.
//!
//! The atomizer is itself a [`CallTarget`]. Its payload is a serde_json
//! list of calls, executed sequentially under the inherited sender context;
//! the first failure aborts the whole script. Because the matching core
//! snapshots state around routed execution, an aborted script leaves no
//! partial effects behind.
//!
//! Typical use: a maker whose side of a trade moves two assets encodes both
//! transfers as one atomizer script and submits that as their call, routed
//! through their proxy via `DelegateCall` so the inner transfers run with
//! the owner's identity.

use pairswap_types::{Call, CallContext, PairswapError, Result, TargetId, constants};

use crate::machine::{CallTarget, Machine};

/// Executes a serde_json-encoded `Vec<Call>` sequentially, aborting on the
/// first failure.
#[derive(Debug, Default)]
pub struct Atomizer;

impl Atomizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Encode a script of calls into an atomizer payload.
    pub fn encode(calls: &[Call]) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(calls)?)
    }
}

impl CallTarget for Atomizer {
    fn execute(
        &self,
        machine: &mut Machine,
        _this: TargetId,
        ctx: CallContext,
        data: &[u8],
    ) -> Result<()> {
        let calls: Vec<Call> = serde_json::from_slice(data)?;
        let nested = ctx.nested().ok_or(PairswapError::CallDepthExceeded {
            max: constants::MAX_CALL_DEPTH,
        })?;
        for call in &calls {
            machine.execute(call, nested)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pairswap_types::{AccountId, HowToCall};

    use super::*;

    /// Credits one unit under the payload key; fails on the payload "fail".
    struct Step;

    impl CallTarget for Step {
        fn execute(
            &self,
            machine: &mut Machine,
            this: TargetId,
            _ctx: CallContext,
            data: &[u8],
        ) -> Result<()> {
            if data == b"fail" {
                return Err(PairswapError::ExecutionFailed {
                    reason: "step failed".into(),
                });
            }
            machine.state_mut().credit(this, data, 1)
        }
    }

    fn sender() -> AccountId {
        AccountId([1u8; 32])
    }

    #[test]
    fn runs_all_steps_in_order() {
        let mut machine = Machine::new();
        let step = machine.install(Arc::new(Step));
        let atomizer = machine.install(Arc::new(Atomizer::new()));

        let script = vec![
            Call::new(step, HowToCall::Call, b"a".to_vec()),
            Call::new(step, HowToCall::Call, b"b".to_vec()),
        ];
        let payload = Atomizer::encode(&script).unwrap();
        let call = Call::new(atomizer, HowToCall::Call, payload);

        machine.execute_as(sender(), &call).unwrap();
        assert_eq!(machine.state().get(step, b"a"), 1);
        assert_eq!(machine.state().get(step, b"b"), 1);
    }

    #[test]
    fn aborts_on_first_failure() {
        let mut machine = Machine::new();
        let step = machine.install(Arc::new(Step));
        let atomizer = machine.install(Arc::new(Atomizer::new()));

        let script = vec![
            Call::new(step, HowToCall::Call, b"a".to_vec()),
            Call::new(step, HowToCall::Call, b"fail".to_vec()),
            Call::new(step, HowToCall::Call, b"b".to_vec()),
        ];
        let payload = Atomizer::encode(&script).unwrap();
        let call = Call::new(atomizer, HowToCall::Call, payload);

        let err = machine.execute_as(sender(), &call).unwrap_err();
        assert!(matches!(err, PairswapError::ExecutionFailed { .. }));
        // The step before the failure did run; rollback is the routing
        // layer's job (snapshot/restore around the whole script).
        assert_eq!(machine.state().get(step, b"a"), 1);
        assert_eq!(machine.state().get(step, b"b"), 0);
    }

    #[test]
    fn garbage_payload_is_a_serialization_error() {
        let mut machine = Machine::new();
        let atomizer = machine.install(Arc::new(Atomizer::new()));
        let call = Call::new(atomizer, HowToCall::Call, b"not json".to_vec());
        let err = machine.execute_as(sender(), &call).unwrap_err();
        assert!(matches!(err, PairswapError::Serialization(_)));
    }

    #[test]
    fn self_referential_script_hits_depth_bound() {
        let mut machine = Machine::new();
        let atomizer = machine.install(Arc::new(Atomizer::new()));

        // A script that re-invokes the atomizer with itself forever.
        let mut payload = Atomizer::encode(&[]).unwrap();
        for _ in 0..=constants::MAX_CALL_DEPTH {
            let inner = Call::new(atomizer, HowToCall::Call, payload);
            payload = Atomizer::encode(&[inner]).unwrap();
        }
        let call = Call::new(atomizer, HowToCall::Call, payload);

        let err = machine.execute_as(sender(), &call).unwrap_err();
        assert!(matches!(err, PairswapError::CallDepthExceeded { .. }));
    }
}
