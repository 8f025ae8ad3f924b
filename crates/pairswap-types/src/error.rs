//! Error types for the pairswap engine.
//!
//! All errors use the `PS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order validity errors
//! - 2xx: Authorization / registry errors
//! - 3xx: Fill capacity errors
//! - 4xx: Predicate errors
//! - 5xx: Execution errors
//! - 9xx: General / internal errors
//!
//! Every gate failure inside a match is a clean abort: the error names the
//! first failing gate and no state has been mutated.

use thiserror::Error;

use crate::{AccountId, OrderHash, RegistryId, Selector, TargetId};

/// Central error enum for all pairswap operations.
#[derive(Debug, Error)]
pub enum PairswapError {
    // =================================================================
    // Order Validity Errors (1xx)
    // =================================================================
    /// The order's listing time lies in the future.
    #[error("PS_ERR_100: Order {0} is not yet listed")]
    OrderNotListed(OrderHash),

    /// The order's expiration time has passed.
    #[error("PS_ERR_101: Order {0} has expired")]
    OrderExpired(OrderHash),

    /// The order was cancelled by its maker. Terminal — post a new order.
    #[error("PS_ERR_102: Order {0} is cancelled")]
    OrderCancelled(OrderHash),

    /// The order failed structural validation (bad fields, oversized extradata).
    #[error("PS_ERR_103: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// Both sides of a match resolved to the same order identity.
    #[error("PS_ERR_104: Order {0} cannot be matched against itself")]
    SelfMatch(OrderHash),

    // =================================================================
    // Authorization / Registry Errors (2xx)
    // =================================================================
    /// Signature invalid, maker mismatch, or caller is not the maker.
    #[error("PS_ERR_200: Order {0} is not authorized")]
    Unauthorized(OrderHash),

    /// The order names a registry the exchange does not accept.
    #[error("PS_ERR_201: Registry {0} is not accepted by this exchange")]
    RegistryNotAllowed(RegistryId),

    /// The maker has no proxy registered with the named registry.
    #[error("PS_ERR_202: No proxy registered for {0}")]
    ProxyNotRegistered(AccountId),

    /// An owner already holds a proxy in this registry.
    #[error("PS_ERR_203: Proxy already registered for {0}")]
    ProxyAlreadyRegistered(AccountId),

    /// The proxy owner revoked delegated access.
    #[error("PS_ERR_204: Proxy access revoked by {0}")]
    ProxyAccessRevoked(AccountId),

    /// The caller is not authorized to execute through this proxy.
    #[error("PS_ERR_205: Caller {0} is not authorized for this proxy")]
    CallerNotAuthorized(AccountId),

    /// The requested call mode is not permitted for this invocation.
    #[error("PS_ERR_206: Call mode not allowed: {reason}")]
    ModeNotAllowed { reason: String },

    /// The registry's one-shot exchange authentication was already granted.
    #[error("PS_ERR_207: Initial authentication already granted for registry {0}")]
    AuthenticationAlreadyGranted(RegistryId),

    // =================================================================
    // Fill Capacity Errors (3xx)
    // =================================================================
    /// The fill would exceed the order's maximum. Replay defense: once an
    /// order's cumulative fill reaches its maximum it can never match again.
    #[error(
        "PS_ERR_300: Capacity exceeded for {order}: filled {filled} + requested {requested} > maximum {maximum}"
    )]
    CapacityExceeded {
        order: OrderHash,
        filled: u64,
        requested: u64,
        maximum: u64,
    },

    // =================================================================
    // Predicate Errors (4xx)
    // =================================================================
    /// The concrete calls do not satisfy the order's declared terms.
    #[error("PS_ERR_400: Predicate rejected: {reason}")]
    PredicateRejected { reason: String },

    /// No predicate is registered under the order's (target, selector) pair.
    #[error("PS_ERR_401: No predicate registered at {target} selector {selector}")]
    PredicateNotFound {
        target: TargetId,
        selector: Selector,
    },

    // =================================================================
    // Execution Errors (5xx)
    // =================================================================
    /// A routed call failed at its target. Surfaced verbatim; no partial
    /// settlement persists.
    #[error("PS_ERR_500: Execution failed: {reason}")]
    ExecutionFailed { reason: String },

    /// The call names a target unknown to the execution machine.
    #[error("PS_ERR_501: Unknown call target {0}")]
    TargetNotFound(TargetId),

    /// Nested call depth exceeded the recursion bound.
    #[error("PS_ERR_502: Call depth exceeded (max {max})")]
    CallDepthExceeded { max: u8 },

    /// A balance cell would underflow (token doubles).
    #[error("PS_ERR_503: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    /// The payload sender is neither the holder nor an approved operator.
    #[error("PS_ERR_504: Transfer not approved for sender {0}")]
    NotApproved(AccountId),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("PS_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("PS_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, PairswapError>;

impl From<serde_json::Error> for PairswapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = PairswapError::OrderExpired(OrderHash([0u8; 32]));
        let msg = format!("{err}");
        assert!(msg.starts_with("PS_ERR_101"), "Got: {msg}");
    }

    #[test]
    fn capacity_exceeded_display() {
        let err = PairswapError::CapacityExceeded {
            order: OrderHash([1u8; 32]),
            filled: 3,
            requested: 2,
            maximum: 4,
        };
        let msg = format!("{err}");
        assert!(msg.contains("PS_ERR_300"));
        assert!(msg.contains("filled 3"));
        assert!(msg.contains("maximum 4"));
    }

    #[test]
    fn serde_json_error_converts() {
        let bad: std::result::Result<u64, _> = serde_json::from_str("not json");
        let err: PairswapError = bad.unwrap_err().into();
        assert!(matches!(err, PairswapError::Serialization(_)));
    }

    #[test]
    fn all_errors_have_ps_err_prefix() {
        let hash = OrderHash([0u8; 32]);
        let acct = AccountId([0u8; 32]);
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(PairswapError::OrderNotListed(hash)),
            Box::new(PairswapError::Unauthorized(hash)),
            Box::new(PairswapError::ProxyNotRegistered(acct)),
            Box::new(PairswapError::PredicateRejected {
                reason: "test".into(),
            }),
            Box::new(PairswapError::ExecutionFailed {
                reason: "test".into(),
            }),
            Box::new(PairswapError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("PS_ERR_"),
                "Error missing PS_ERR_ prefix: {msg}"
            );
        }
    }
}
