//! Call model: a concrete, fully-encoded invocation routed through a proxy.

use serde::{Deserialize, Serialize};

use crate::{AccountId, TargetId, constants};

/// Execution mode for a routed call.
///
/// `DelegateCall` executes with the proxy *owner's* identity as sender,
/// which lets the payload impersonate the owner at its target. It is
/// therefore doubly restricted: the proxy must permit the mode and the
/// order's predicate must declare it safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HowToCall {
    Call,
    DelegateCall,
}

impl std::fmt::Display for HowToCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::DelegateCall => write!(f, "DELEGATE_CALL"),
        }
    }
}

/// A concrete invocation: target, execution mode, and an opaque payload
/// the target alone knows how to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub target: TargetId,
    pub how: HowToCall,
    pub data: Vec<u8>,
}

impl Call {
    #[must_use]
    pub fn new(target: TargetId, how: HowToCall, data: Vec<u8>) -> Self {
        Self { target, how, data }
    }
}

/// Per-invocation execution context carried through the machine.
///
/// `sender` is the identity a target sees as the payload's originator;
/// `depth` bounds nested dispatch (atomizer recursion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub sender: AccountId,
    pub depth: u8,
}

impl CallContext {
    /// Root context for a direct, unproxied invocation.
    #[must_use]
    pub fn root(sender: AccountId) -> Self {
        Self { sender, depth: 0 }
    }

    /// Context for a nested call, one level deeper with the same sender.
    /// Returns `None` once the recursion bound is reached.
    #[must_use]
    pub fn nested(&self) -> Option<Self> {
        if self.depth >= constants::MAX_CALL_DEPTH {
            None
        } else {
            Some(Self {
                sender: self.sender,
                depth: self.depth + 1,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn how_to_call_display() {
        assert_eq!(format!("{}", HowToCall::Call), "CALL");
        assert_eq!(format!("{}", HowToCall::DelegateCall), "DELEGATE_CALL");
    }

    #[test]
    fn nested_context_preserves_sender() {
        let ctx = CallContext::root(AccountId([3u8; 32]));
        let nested = ctx.nested().unwrap();
        assert_eq!(nested.sender, ctx.sender);
        assert_eq!(nested.depth, 1);
    }

    #[test]
    fn nesting_bounded_by_max_depth() {
        let mut ctx = CallContext::root(AccountId([0u8; 32]));
        for _ in 0..constants::MAX_CALL_DEPTH {
            ctx = ctx.nested().expect("within bound");
        }
        assert!(ctx.nested().is_none());
    }

    #[test]
    fn call_serde_roundtrip() {
        let call = Call::new(TargetId::new(), HowToCall::Call, vec![1, 2, 3]);
        let json = serde_json::to_string(&call).unwrap();
        let back: Call = serde_json::from_str(&json).unwrap();
        assert_eq!(call, back);
    }
}
