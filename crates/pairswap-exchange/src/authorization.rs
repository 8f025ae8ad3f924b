//! Order authorization: chain-scoped signing digests and detached
//! ed25519 signatures.
//!
//! The signing digest re-hashes the order's identity under a separate
//! domain tag together with the deployment's `chain_id`. The identity hash
//! itself stays chain-independent — fill state and cancellations key on the
//! same value everywhere — while a signature can only ever authorize the
//! order on the one deployment it was produced for.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use pairswap_types::{AccountId, Order, OrderHash, constants};

/// How a match side proves its maker stands behind the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Approval {
    /// Detached ed25519 signature over the chain-scoped order digest.
    Signature(Vec<u8>),
    /// No signature carried: authorization rests on the caller being the
    /// maker, or on a prior on-ledger approval by the maker.
    Direct,
}

/// The chain-scoped digest a maker signs to authorize an order.
#[must_use]
pub fn order_digest(chain_id: u64, hash: OrderHash) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(constants::ORDER_DIGEST_TAG);
    hasher.update(chain_id.to_le_bytes());
    hasher.update(hash.as_bytes());
    hasher.finalize().into()
}

/// Sign an order for one deployment. The maker's verifying key must equal
/// the order's `maker` field for the signature to authorize anything.
#[must_use]
pub fn sign_order(key: &SigningKey, chain_id: u64, order: &Order) -> Vec<u8> {
    let digest = order_digest(chain_id, order.hash());
    key.sign(&digest).to_bytes().to_vec()
}

/// Verify a detached signature against a maker identity.
///
/// Fails closed: wrong length, a maker identity that is not a valid
/// verifying key, or a signature that does not check out all return
/// `false`. `verify_strict` additionally rejects malleable and
/// small-order-component signatures.
#[must_use]
pub fn verify_signature(maker: AccountId, digest: &[u8; 32], signature: &[u8]) -> bool {
    if signature.len() != constants::SIGNATURE_LENGTH {
        return false;
    }
    let Ok(key) = VerifyingKey::from_bytes(maker.as_bytes()) else {
        return false;
    };
    let mut bytes = [0u8; constants::SIGNATURE_LENGTH];
    bytes.copy_from_slice(signature);
    let sig = Signature::from_bytes(&bytes);
    key.verify_strict(digest, &sig).is_ok()
}
