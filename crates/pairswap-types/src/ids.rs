//! Identifiers used throughout pairswap.
//!
//! Account identities are raw ed25519 verifying keys (32 bytes). Registry
//! and call-target instances use UUIDv7 for time-ordered lexicographic
//! sorting. Order identities are SHA-256 hashes of the order's fields.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Identity of a party (order maker, proxy, exchange instance).
/// For makers this is the raw ed25519 verifying key (32 bytes); proxies
/// and other engine-internal parties use derived 32-byte identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derive an identity from a domain tag and arbitrary input bytes.
    /// Used for proxy identities so they never collide with real keys.
    #[must_use]
    pub fn derived(tag: &[u8], input: &[u8]) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(tag);
        hasher.update(input);
        Self(hasher.finalize().into())
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// RegistryId
// ---------------------------------------------------------------------------

/// Identity of a proxy-registry instance. Orders name the registry they
/// trust, so multiple isolated registries can coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RegistryId(pub Uuid);

impl RegistryId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RegistryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reg:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TargetId
// ---------------------------------------------------------------------------

/// Identity of a call target (asset contract double, predicate host,
/// atomizer) registered with the execution machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TargetId(pub Uuid);

impl TargetId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tgt:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// Four-byte function selector addressing one predicate on a static target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Selector(pub [u8; 4]);

impl Selector {
    /// Derive a selector from a human-readable signature string.
    #[must_use]
    pub fn from_signature(signature: &str) -> Self {
        use sha2::{Digest, Sha256};
        let digest = Sha256::digest(signature.as_bytes());
        Self([digest[0], digest[1], digest[2], digest[3]])
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// OrderHash
// ---------------------------------------------------------------------------

/// Deterministic identity of an order: SHA-256 over the exact byte encoding
/// of its fields. Two orders with identical fields collapse to the same
/// hash and share fill state — `salt` exists to keep them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderHash(pub [u8; 32]);

impl OrderHash {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for OrderHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_id_uniqueness() {
        let a = RegistryId::new();
        let b = RegistryId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn target_id_ordering() {
        let a = TargetId::new();
        let b = TargetId::new();
        assert!(a < b);
    }

    #[test]
    fn derived_account_deterministic() {
        let a = AccountId::derived(b"pairswap:proxy:v1:", b"owner");
        let b = AccountId::derived(b"pairswap:proxy:v1:", b"owner");
        assert_eq!(a, b);
        let c = AccountId::derived(b"pairswap:proxy:v1:", b"other");
        assert_ne!(a, c);
    }

    #[test]
    fn selector_from_signature_deterministic() {
        let a = Selector::from_signature("nonFungibleForFungible(bytes,call,call)");
        let b = Selector::from_signature("nonFungibleForFungible(bytes,call,call)");
        assert_eq!(a, b);
        let c = Selector::from_signature("fungibleForNonFungible(bytes,call,call)");
        assert_ne!(a, c);
    }

    #[test]
    fn display_renders_short_hex() {
        let acct = AccountId([0xab; 32]);
        assert_eq!(format!("{acct}"), "acct:abababababababab");
        let hash = OrderHash([0x01; 32]);
        assert_eq!(format!("{hash}"), "order:0101010101010101");
    }

    #[test]
    fn serde_roundtrips() {
        let acct = AccountId([7u8; 32]);
        let json = serde_json::to_string(&acct).unwrap();
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(acct, back);

        let sel = Selector([1, 2, 3, 4]);
        let json = serde_json::to_string(&sel).unwrap();
        let back: Selector = serde_json::from_str(&json).unwrap();
        assert_eq!(sel, back);
    }
}
