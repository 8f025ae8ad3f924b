//! Stock market predicates: fixed-ratio swaps between a non-fungible asset
//! and a fungible asset.
//!
//! Both predicates share one extradata layout, [`MarketTerms`], and inspect
//! *both* concrete calls: the order's own call must move the asset the
//! maker gives, the counterparty's call must move the asset the maker
//! demands, and the two quantities must satisfy the declared ratio. A
//! mismatch on target, token id, payload shape, or ratio is a veto — the
//! predicate never partially matches.
//!
//! The predicates deliberately do not check the `from`/`to` identities in
//! the payloads: the routing layer pins who executes each call (the maker's
//! proxy), and the payload pins whose approval is consumed.

use pairswap_types::{Call, HowToCall, PairswapError, Result, Selector, TargetId};
use serde::{Deserialize, Serialize};

use crate::PredicateEvaluator;
use crate::encoding::{FungibleCall, NonFungibleCall};

/// Extradata for the two market predicates.
///
/// The ratio reads: `units` of `token_id` on `nonfungible` trade against
/// `price` of `fungible`. A concrete pair of transfers satisfies the terms
/// when `nft_amount * price == fungible_amount * units`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTerms {
    pub nonfungible: TargetId,
    pub fungible: TargetId,
    pub token_id: u64,
    /// Non-fungible units per lot. Must be > 0.
    pub units: u64,
    /// Fungible amount per lot. Must be > 0.
    pub price: u64,
}

impl MarketTerms {
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    fn decode(extradata: &[u8]) -> Result<Self> {
        let terms: Self = serde_json::from_slice(extradata)
            .map_err(|err| reject(format!("bad market terms: {err}")))?;
        if terms.units == 0 || terms.price == 0 {
            return Err(reject("market terms ratio must be non-zero"));
        }
        Ok(terms)
    }

    fn ratio_holds(&self, nft_amount: u64, fungible_amount: u64) -> bool {
        // u128 arithmetic: the cross products cannot overflow.
        u128::from(nft_amount) * u128::from(self.price)
            == u128::from(fungible_amount) * u128::from(self.units)
    }
}

fn reject(reason: impl Into<String>) -> PairswapError {
    PairswapError::PredicateRejected {
        reason: reason.into(),
    }
}

fn require_plain(call: &Call, which: &str) -> Result<()> {
    if call.how == HowToCall::Call {
        Ok(())
    } else {
        Err(reject(format!("{which} call must use plain CALL mode")))
    }
}

/// Decode the non-fungible side of the pair against the terms.
/// Returns the number of units moved.
fn nonfungible_amount(terms: &MarketTerms, call: &Call, which: &str) -> Result<u64> {
    require_plain(call, which)?;
    if call.target != terms.nonfungible {
        return Err(reject(format!("{which} call targets the wrong asset")));
    }
    match NonFungibleCall::decode(&call.data)
        .map_err(|_| reject(format!("{which} call is not a non-fungible transfer")))?
    {
        NonFungibleCall::TransferFrom {
            token_id, amount, ..
        } => {
            if token_id != terms.token_id {
                return Err(reject(format!("{which} call moves the wrong token id")));
            }
            if amount == 0 {
                return Err(reject(format!("{which} call moves zero units")));
            }
            Ok(amount)
        }
        _ => Err(reject(format!("{which} call is not a transfer"))),
    }
}

/// Decode the fungible side of the pair against the terms.
/// Returns the amount moved.
fn fungible_amount(terms: &MarketTerms, call: &Call, which: &str) -> Result<u64> {
    require_plain(call, which)?;
    if call.target != terms.fungible {
        return Err(reject(format!("{which} call targets the wrong asset")));
    }
    match FungibleCall::decode(&call.data)
        .map_err(|_| reject(format!("{which} call is not a fungible transfer")))?
    {
        FungibleCall::TransferFrom { amount, .. } => {
            if amount == 0 {
                return Err(reject(format!("{which} call moves zero units")));
            }
            Ok(amount)
        }
        _ => Err(reject(format!("{which} call is not a transfer"))),
    }
}

// ---------------------------------------------------------------------------
// NonFungibleForFungible
// ---------------------------------------------------------------------------

/// The selling side: the maker gives the non-fungible asset and demands the
/// fungible asset. Fill is counted in non-fungible units moved.
#[derive(Debug, Default)]
pub struct NonFungibleForFungible;

impl NonFungibleForFungible {
    /// Human-readable signature this predicate registers under.
    pub const SIGNATURE: &'static str = "anyNonFungibleForFungible(bytes,call,call)";

    #[must_use]
    pub fn selector() -> Selector {
        Selector::from_signature(Self::SIGNATURE)
    }
}

impl PredicateEvaluator for NonFungibleForFungible {
    fn evaluate(&self, extradata: &[u8], call: &Call, counter_call: &Call) -> Result<u64> {
        let terms = MarketTerms::decode(extradata)?;
        let given = nonfungible_amount(&terms, call, "own")?;
        let received = fungible_amount(&terms, counter_call, "counterparty")?;
        if !terms.ratio_holds(given, received) {
            return Err(reject(format!(
                "ratio violated: {given} units against {received} does not match {}:{}",
                terms.units, terms.price
            )));
        }
        Ok(given)
    }
}

// ---------------------------------------------------------------------------
// FungibleForNonFungible
// ---------------------------------------------------------------------------

/// The buying side: the maker gives the fungible asset and demands the
/// non-fungible asset. Fill is counted in fungible amount moved.
#[derive(Debug, Default)]
pub struct FungibleForNonFungible;

impl FungibleForNonFungible {
    /// Human-readable signature this predicate registers under.
    pub const SIGNATURE: &'static str = "anyFungibleForNonFungible(bytes,call,call)";

    #[must_use]
    pub fn selector() -> Selector {
        Selector::from_signature(Self::SIGNATURE)
    }
}

impl PredicateEvaluator for FungibleForNonFungible {
    fn evaluate(&self, extradata: &[u8], call: &Call, counter_call: &Call) -> Result<u64> {
        let terms = MarketTerms::decode(extradata)?;
        let given = fungible_amount(&terms, call, "own")?;
        let received = nonfungible_amount(&terms, counter_call, "counterparty")?;
        if !terms.ratio_holds(received, given) {
            return Err(reject(format!(
                "ratio violated: {given} against {received} units does not match {}:{}",
                terms.price, terms.units
            )));
        }
        Ok(given)
    }
}

#[cfg(test)]
mod tests {
    use pairswap_types::AccountId;

    use super::*;

    fn account(byte: u8) -> AccountId {
        AccountId([byte; 32])
    }

    struct Fixture {
        terms: MarketTerms,
        extradata: Vec<u8>,
        nft_call: Call,
        fungible_call: Call,
    }

    /// Token id 5, one unit priced at 3000 fungible units.
    fn fixture() -> Fixture {
        let terms = MarketTerms {
            nonfungible: TargetId::new(),
            fungible: TargetId::new(),
            token_id: 5,
            units: 1,
            price: 3000,
        };
        let extradata = terms.encode().unwrap();
        let nft_call = NonFungibleCall::TransferFrom {
            from: account(1),
            to: account(2),
            token_id: 5,
            amount: 1,
        }
        .into_call(terms.nonfungible)
        .unwrap();
        let fungible_call = FungibleCall::TransferFrom {
            from: account(2),
            to: account(1),
            amount: 3000,
        }
        .into_call(terms.fungible)
        .unwrap();
        Fixture {
            terms,
            extradata,
            nft_call,
            fungible_call,
        }
    }

    #[test]
    fn selling_side_fill_is_units_moved() {
        let f = fixture();
        let fill = NonFungibleForFungible
            .evaluate(&f.extradata, &f.nft_call, &f.fungible_call)
            .unwrap();
        assert_eq!(fill, 1);
    }

    #[test]
    fn buying_side_fill_is_amount_paid() {
        let f = fixture();
        let fill = FungibleForNonFungible
            .evaluate(&f.extradata, &f.fungible_call, &f.nft_call)
            .unwrap();
        assert_eq!(fill, 3000);
    }

    #[test]
    fn wrong_target_vetoed() {
        let f = fixture();
        let mut wrong = f.nft_call.clone();
        wrong.target = TargetId::new();
        let err = NonFungibleForFungible
            .evaluate(&f.extradata, &wrong, &f.fungible_call)
            .unwrap_err();
        assert!(matches!(err, PairswapError::PredicateRejected { .. }));
    }

    #[test]
    fn wrong_token_id_vetoed() {
        let f = fixture();
        let wrong = NonFungibleCall::TransferFrom {
            from: account(1),
            to: account(2),
            token_id: 6,
            amount: 1,
        }
        .into_call(f.terms.nonfungible)
        .unwrap();
        let err = NonFungibleForFungible
            .evaluate(&f.extradata, &wrong, &f.fungible_call)
            .unwrap_err();
        assert!(matches!(err, PairswapError::PredicateRejected { .. }));
    }

    #[test]
    fn underpayment_vetoed_on_both_sides() {
        let f = fixture();
        let short = FungibleCall::TransferFrom {
            from: account(2),
            to: account(1),
            amount: 2999,
        }
        .into_call(f.terms.fungible)
        .unwrap();

        assert!(
            NonFungibleForFungible
                .evaluate(&f.extradata, &f.nft_call, &short)
                .is_err()
        );
        assert!(
            FungibleForNonFungible
                .evaluate(&f.extradata, &short, &f.nft_call)
                .is_err()
        );
    }

    #[test]
    fn scaled_quantities_satisfy_the_ratio() {
        let f = fixture();
        let nft = NonFungibleCall::TransferFrom {
            from: account(1),
            to: account(2),
            token_id: 5,
            amount: 3,
        }
        .into_call(f.terms.nonfungible)
        .unwrap();
        let paid = FungibleCall::TransferFrom {
            from: account(2),
            to: account(1),
            amount: 9000,
        }
        .into_call(f.terms.fungible)
        .unwrap();

        let fill = NonFungibleForFungible
            .evaluate(&f.extradata, &nft, &paid)
            .unwrap();
        assert_eq!(fill, 3);
    }

    #[test]
    fn non_transfer_payload_vetoed() {
        let f = fixture();
        let mint = NonFungibleCall::Mint {
            to: account(2),
            token_id: 5,
            amount: 1,
        }
        .into_call(f.terms.nonfungible)
        .unwrap();
        assert!(
            NonFungibleForFungible
                .evaluate(&f.extradata, &mint, &f.fungible_call)
                .is_err()
        );
    }

    #[test]
    fn delegate_mode_vetoed() {
        let f = fixture();
        let mut delegated = f.nft_call.clone();
        delegated.how = HowToCall::DelegateCall;
        assert!(
            NonFungibleForFungible
                .evaluate(&f.extradata, &delegated, &f.fungible_call)
                .is_err()
        );
        assert!(!NonFungibleForFungible.allows_mode(HowToCall::DelegateCall));
    }

    #[test]
    fn zero_ratio_terms_vetoed() {
        let f = fixture();
        let mut terms = f.terms.clone();
        terms.units = 0;
        let extradata = terms.encode().unwrap();
        assert!(
            NonFungibleForFungible
                .evaluate(&extradata, &f.nft_call, &f.fungible_call)
                .is_err()
        );
    }

    #[test]
    fn garbage_extradata_vetoed() {
        let f = fixture();
        let err = NonFungibleForFungible
            .evaluate(b"junk", &f.nft_call, &f.fungible_call)
            .unwrap_err();
        assert!(matches!(err, PairswapError::PredicateRejected { .. }));
    }

    #[test]
    fn selectors_are_distinct() {
        assert_ne!(
            NonFungibleForFungible::selector(),
            FungibleForNonFungible::selector()
        );
    }
}
