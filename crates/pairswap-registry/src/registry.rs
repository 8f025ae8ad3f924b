//! Proxy registry: owner → proxy, plus the one-shot exchange authentication.
//!
//! A registry authenticates exactly one external caller (the exchange) for
//! the lifetime of the instance. Granting it twice is an error — this is
//! what stops a registry operator from quietly authorizing a second
//! exchange over already-approved proxies. Owners retain a per-proxy
//! revocation switch on top.

use std::collections::HashMap;

use pairswap_types::{AccountId, Call, PairswapError, RegistryId, Result};

use crate::machine::Machine;
use crate::proxy::Proxy;

/// Maps owners to their delegated-execution proxies.
#[derive(Debug, Default)]
pub struct ProxyRegistry {
    id: RegistryId,
    proxies: HashMap<AccountId, Proxy>,
    /// The single externally authenticated caller, set once.
    authenticated_caller: Option<AccountId>,
}

impl ProxyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: RegistryId::new(),
            proxies: HashMap::new(),
            authenticated_caller: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> RegistryId {
        self.id
    }

    /// Authenticate the exchange as a permitted caller of every proxy in
    /// this registry. One-shot: a second grant fails.
    pub fn grant_initial_authentication(&mut self, exchange: AccountId) -> Result<()> {
        if self.authenticated_caller.is_some() {
            return Err(PairswapError::AuthenticationAlreadyGranted(self.id));
        }
        tracing::info!(registry = %self.id, exchange = %exchange, "initial authentication granted");
        self.authenticated_caller = Some(exchange);
        Ok(())
    }

    /// Whether `caller` holds the registry-level authentication.
    #[must_use]
    pub fn is_authenticated(&self, caller: AccountId) -> bool {
        self.authenticated_caller == Some(caller)
    }

    /// Register a proxy for `owner` and return its derived identity.
    pub fn register_proxy(&mut self, owner: AccountId) -> Result<AccountId> {
        if self.proxies.contains_key(&owner) {
            return Err(PairswapError::ProxyAlreadyRegistered(owner));
        }
        let proxy = Proxy::new(self.id, owner);
        let identity = proxy.identity();
        tracing::debug!(registry = %self.id, owner = %owner, proxy = %identity, "proxy registered");
        self.proxies.insert(owner, proxy);
        Ok(identity)
    }

    /// Look up an owner's proxy.
    #[must_use]
    pub fn proxy_of(&self, owner: AccountId) -> Option<&Proxy> {
        self.proxies.get(&owner)
    }

    /// Owner toggles: block or restore delegated access to their proxy.
    pub fn set_access_revoked(&mut self, owner: AccountId, revoked: bool) -> Result<()> {
        let proxy = self
            .proxies
            .get_mut(&owner)
            .ok_or(PairswapError::ProxyNotRegistered(owner))?;
        proxy.set_revoked(revoked);
        Ok(())
    }

    /// Owner opt-in for delegate-call execution through their proxy.
    pub fn set_delegate_allowed(&mut self, owner: AccountId, allowed: bool) -> Result<()> {
        let proxy = self
            .proxies
            .get_mut(&owner)
            .ok_or(PairswapError::ProxyNotRegistered(owner))?;
        proxy.set_delegate_allowed(allowed);
        Ok(())
    }

    /// Execute `call` through `owner`'s proxy on behalf of `caller`.
    ///
    /// Authorization: the owner may always act through their own proxy;
    /// the authenticated exchange may act unless the owner revoked access.
    /// The execution mode decides the sender identity the target sees.
    pub fn execute_for(
        &self,
        machine: &mut Machine,
        owner: AccountId,
        caller: AccountId,
        call: &Call,
    ) -> Result<()> {
        let proxy = self
            .proxies
            .get(&owner)
            .ok_or(PairswapError::ProxyNotRegistered(owner))?;

        if caller != owner {
            if !self.is_authenticated(caller) {
                return Err(PairswapError::CallerNotAuthorized(caller));
            }
            if proxy.is_revoked() {
                return Err(PairswapError::ProxyAccessRevoked(owner));
            }
        }

        let sender = proxy.sender_for(call.how)?;
        machine.execute(call, pairswap_types::CallContext::root(sender))
    }

    /// Number of registered proxies.
    #[must_use]
    pub fn proxy_count(&self) -> usize {
        self.proxies.len()
    }
}

/// A set of isolated registry instances, keyed by id. Orders name the
/// registry they trust; the exchange resolves it here.
#[derive(Debug, Default)]
pub struct RegistrySet {
    registries: HashMap<RegistryId, ProxyRegistry>,
}

impl RegistrySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registry instance, returning its id.
    pub fn insert(&mut self, registry: ProxyRegistry) -> RegistryId {
        let id = registry.id();
        self.registries.insert(id, registry);
        id
    }

    #[must_use]
    pub fn get(&self, id: RegistryId) -> Option<&ProxyRegistry> {
        self.registries.get(&id)
    }

    pub fn get_mut(&mut self, id: RegistryId) -> Option<&mut ProxyRegistry> {
        self.registries.get_mut(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}
