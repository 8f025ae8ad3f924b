//! The any-call predicate: accepts whatever call it is shown.
//!
//! Useful for bootstrap flows and tests where the order's terms are "run
//! this exact payload I prepared" — the maker signs the order, and the
//! signature already binds the predicate parameters.

use pairswap_types::{Call, HowToCall, PairswapError, Result, Selector};

use crate::PredicateEvaluator;

/// Accepts any call with fill 1.
///
/// By default only plain calls are declared safe; `allowing_delegate()`
/// opts in to `DelegateCall` so atomizer scripts can run under the proxy
/// owner's identity.
#[derive(Debug, Default)]
pub struct AnyCall {
    allow_delegate: bool,
}

impl AnyCall {
    pub const SIGNATURE: &'static str = "any(bytes,call,call)";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant that declares `DelegateCall` safe.
    #[must_use]
    pub fn allowing_delegate() -> Self {
        Self {
            allow_delegate: true,
        }
    }

    #[must_use]
    pub fn selector() -> Selector {
        Selector::from_signature(Self::SIGNATURE)
    }
}

impl PredicateEvaluator for AnyCall {
    fn evaluate(&self, _extradata: &[u8], call: &Call, _counter_call: &Call) -> Result<u64> {
        if !self.allows_mode(call.how) {
            return Err(PairswapError::PredicateRejected {
                reason: format!("call mode {} not declared safe", call.how),
            });
        }
        Ok(1)
    }

    fn allows_mode(&self, how: HowToCall) -> bool {
        match how {
            HowToCall::Call => true,
            HowToCall::DelegateCall => self.allow_delegate,
        }
    }
}
