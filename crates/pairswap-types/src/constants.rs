//! System-wide constants for the pairswap engine.

/// Domain tag prefixing the order identity hash.
pub const ORDER_HASH_TAG: &[u8] = b"pairswap:order:v1:";

/// Domain tag prefixing the chain-scoped signing digest.
pub const ORDER_DIGEST_TAG: &[u8] = b"pairswap:digest:v1:";

/// Domain tag for derived proxy identities.
pub const PROXY_IDENTITY_TAG: &[u8] = b"pairswap:proxy:v1:";

/// Length of an ed25519 order signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Maximum nesting depth for routed calls (atomizer recursion bound).
pub const MAX_CALL_DEPTH: u8 = 8;

/// Default upper bound on predicate extradata size in bytes.
pub const DEFAULT_MAX_EXTRADATA_BYTES: usize = 4096;

/// Metadata value meaning "no match correlation id supplied".
pub const NO_METADATA: [u8; 32] = [0u8; 32];

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "pairswap";
