//! Delegated-execution proxy.
//!
//! A proxy performs calls on its owner's behalf, for the owner directly or
//! for a caller its registry has authenticated (the exchange). Asset
//! approvals are granted to the proxy's *derived identity*, never to the
//! exchange, so the exchange can only move what each proxy was trusted with.

use pairswap_types::{AccountId, HowToCall, PairswapError, RegistryId, Result, constants};

/// Per-owner delegated execution agent.
#[derive(Debug, Clone)]
pub struct Proxy {
    registry: RegistryId,
    owner: AccountId,
    identity: AccountId,
    /// Owner kill switch: blocks every caller except the owner.
    revoked: bool,
    /// Opt-in for `DelegateCall`, which executes payloads with the owner's
    /// identity as sender. Off by default.
    delegate_allowed: bool,
}

impl Proxy {
    /// Create the proxy for `owner` within `registry`.
    ///
    /// The identity is derived deterministically from the registry and the
    /// owner, so it is stable across restarts and cannot collide with a
    /// real ed25519 key's account.
    #[must_use]
    pub fn new(registry: RegistryId, owner: AccountId) -> Self {
        let mut input = Vec::with_capacity(48);
        input.extend_from_slice(registry.0.as_bytes());
        input.extend_from_slice(&owner.0);
        let identity = AccountId::derived(constants::PROXY_IDENTITY_TAG, &input);
        Self {
            registry,
            owner,
            identity,
            revoked: false,
            delegate_allowed: false,
        }
    }

    #[must_use]
    pub fn registry(&self) -> RegistryId {
        self.registry
    }

    #[must_use]
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// The identity this proxy's plain calls execute under. Asset targets
    /// see this as the operator that approvals were granted to.
    #[must_use]
    pub fn identity(&self) -> AccountId {
        self.identity
    }

    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    pub fn set_revoked(&mut self, revoked: bool) {
        self.revoked = revoked;
    }

    #[must_use]
    pub fn delegate_allowed(&self) -> bool {
        self.delegate_allowed
    }

    pub fn set_delegate_allowed(&mut self, allowed: bool) {
        self.delegate_allowed = allowed;
    }

    /// Resolve the sender identity for an execution mode.
    ///
    /// Plain calls run as the proxy itself; delegate calls run as the owner
    /// and require the owner's opt-in.
    pub fn sender_for(&self, how: HowToCall) -> Result<AccountId> {
        match how {
            HowToCall::Call => Ok(self.identity),
            HowToCall::DelegateCall => {
                if self.delegate_allowed {
                    Ok(self.owner)
                } else {
                    Err(PairswapError::ModeNotAllowed {
                        reason: format!(
                            "proxy for {} does not permit DELEGATE_CALL",
                            self.owner.short()
                        ),
                    })
                }
            }
        }
    }
}
