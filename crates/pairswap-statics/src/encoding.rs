//! Transfer payload schemas recognized by the stock market predicates.
//!
//! These are the wire encodings of the calls the predicates inspect — the
//! predicate plane defines them, asset targets implement them. A custom
//! predicate is free to recognize entirely different payloads; nothing in
//! the matching core depends on these.

use pairswap_types::{AccountId, Call, HowToCall, Result, TargetId};
use serde::{Deserialize, Serialize};

/// Payloads understood by a fungible asset target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FungibleCall {
    /// Create `amount` units in `to`'s balance.
    Mint { to: AccountId, amount: u64 },
    /// Let `spender` move up to `amount` of the sender's balance.
    Approve { spender: AccountId, amount: u64 },
    /// Move `amount` from `from` to `to`. The sender must be `from` or an
    /// approved spender with sufficient allowance.
    TransferFrom {
        from: AccountId,
        to: AccountId,
        amount: u64,
    },
}

impl FungibleCall {
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Convenience: a plain-mode call carrying this payload.
    pub fn into_call(self, target: TargetId) -> Result<Call> {
        Ok(Call::new(target, HowToCall::Call, self.encode()?))
    }
}

/// Payloads understood by a non-fungible (multi-token) asset target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonFungibleCall {
    /// Create `amount` units of `token_id` in `to`'s holding.
    Mint {
        to: AccountId,
        token_id: u64,
        amount: u64,
    },
    /// Let `operator` move any of the sender's tokens.
    SetApprovalForAll { operator: AccountId, approved: bool },
    /// Move `amount` units of `token_id` from `from` to `to`. The sender
    /// must be `from` or an approved operator.
    TransferFrom {
        from: AccountId,
        to: AccountId,
        token_id: u64,
        amount: u64,
    },
}

impl NonFungibleCall {
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Convenience: a plain-mode call carrying this payload.
    pub fn into_call(self, target: TargetId) -> Result<Call> {
        Ok(Call::new(target, HowToCall::Call, self.encode()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(byte: u8) -> AccountId {
        AccountId([byte; 32])
    }

    #[test]
    fn fungible_roundtrip() {
        let payload = FungibleCall::TransferFrom {
            from: account(1),
            to: account(2),
            amount: 3000,
        };
        let bytes = payload.encode().unwrap();
        assert_eq!(FungibleCall::decode(&bytes).unwrap(), payload);
    }

    #[test]
    fn nonfungible_roundtrip() {
        let payload = NonFungibleCall::TransferFrom {
            from: account(1),
            to: account(2),
            token_id: 5,
            amount: 1,
        };
        let bytes = payload.encode().unwrap();
        assert_eq!(NonFungibleCall::decode(&bytes).unwrap(), payload);
    }

    #[test]
    fn into_call_uses_plain_mode() {
        let target = TargetId::new();
        let call = FungibleCall::Mint {
            to: account(1),
            amount: 10,
        }
        .into_call(target)
        .unwrap();
        assert_eq!(call.target, target);
        assert_eq!(call.how, HowToCall::Call);
    }

    #[test]
    fn garbage_decode_fails() {
        assert!(FungibleCall::decode(b"junk").is_err());
        assert!(NonFungibleCall::decode(b"junk").is_err());
    }
}
