//! Asset-target doubles for tests. **Never use in production.**
//!
//! These implement the payload schemas from [`crate::encoding`] over the
//! execution machine's state store, with just enough semantics to exercise
//! settlement: balances, allowances, operator approvals. Real asset
//! contracts are external collaborators and out of scope.

use pairswap_registry::{CallTarget, Machine, StateStore};
use pairswap_types::{AccountId, CallContext, PairswapError, Result, TargetId};

use crate::encoding::{FungibleCall, NonFungibleCall};

fn balance_key(account: AccountId) -> Vec<u8> {
    let mut key = b"bal:".to_vec();
    key.extend_from_slice(&account.0);
    key
}

fn token_balance_key(account: AccountId, token_id: u64) -> Vec<u8> {
    let mut key = balance_key(account);
    key.extend_from_slice(&token_id.to_le_bytes());
    key
}

fn allowance_key(owner: AccountId, spender: AccountId) -> Vec<u8> {
    let mut key = b"alw:".to_vec();
    key.extend_from_slice(&owner.0);
    key.extend_from_slice(&spender.0);
    key
}

fn operator_key(owner: AccountId, operator: AccountId) -> Vec<u8> {
    let mut key = b"opr:".to_vec();
    key.extend_from_slice(&owner.0);
    key.extend_from_slice(&operator.0);
    key
}

// ---------------------------------------------------------------------------
// FungibleToken
// ---------------------------------------------------------------------------

/// Fungible asset double with allowance bookkeeping.
#[derive(Debug, Default)]
pub struct FungibleToken;

impl FungibleToken {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Read a balance from the state store.
    #[must_use]
    pub fn balance(state: &StateStore, target: TargetId, account: AccountId) -> u64 {
        state.get(target, &balance_key(account))
    }

    /// Read an allowance from the state store.
    #[must_use]
    pub fn allowance(
        state: &StateStore,
        target: TargetId,
        owner: AccountId,
        spender: AccountId,
    ) -> u64 {
        state.get(target, &allowance_key(owner, spender))
    }
}

impl CallTarget for FungibleToken {
    fn execute(
        &self,
        machine: &mut Machine,
        this: TargetId,
        ctx: CallContext,
        data: &[u8],
    ) -> Result<()> {
        match FungibleCall::decode(data)? {
            FungibleCall::Mint { to, amount } => {
                machine.state_mut().credit(this, &balance_key(to), amount)
            }
            FungibleCall::Approve { spender, amount } => {
                machine
                    .state_mut()
                    .put(this, &allowance_key(ctx.sender, spender), amount);
                Ok(())
            }
            FungibleCall::TransferFrom { from, to, amount } => {
                if ctx.sender != from {
                    // Spend allowance before the balance moves.
                    let key = allowance_key(from, ctx.sender);
                    let allowed = machine.state().get(this, &key);
                    if allowed < amount {
                        return Err(PairswapError::NotApproved(ctx.sender));
                    }
                    machine.state_mut().put(this, &key, allowed - amount);
                }
                machine.state_mut().debit(this, &balance_key(from), amount)?;
                machine.state_mut().credit(this, &balance_key(to), amount)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// NonFungibleToken
// ---------------------------------------------------------------------------

/// Multi-token non-fungible asset double with operator approvals.
#[derive(Debug, Default)]
pub struct NonFungibleToken;

impl NonFungibleToken {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Read a holding from the state store.
    #[must_use]
    pub fn balance(
        state: &StateStore,
        target: TargetId,
        account: AccountId,
        token_id: u64,
    ) -> u64 {
        state.get(target, &token_balance_key(account, token_id))
    }

    /// Whether `operator` may move `owner`'s tokens.
    #[must_use]
    pub fn is_operator(
        state: &StateStore,
        target: TargetId,
        owner: AccountId,
        operator: AccountId,
    ) -> bool {
        state.get(target, &operator_key(owner, operator)) != 0
    }
}

impl CallTarget for NonFungibleToken {
    fn execute(
        &self,
        machine: &mut Machine,
        this: TargetId,
        ctx: CallContext,
        data: &[u8],
    ) -> Result<()> {
        match NonFungibleCall::decode(data)? {
            NonFungibleCall::Mint {
                to,
                token_id,
                amount,
            } => machine
                .state_mut()
                .credit(this, &token_balance_key(to, token_id), amount),
            NonFungibleCall::SetApprovalForAll { operator, approved } => {
                machine.state_mut().put(
                    this,
                    &operator_key(ctx.sender, operator),
                    u64::from(approved),
                );
                Ok(())
            }
            NonFungibleCall::TransferFrom {
                from,
                to,
                token_id,
                amount,
            } => {
                if ctx.sender != from
                    && !Self::is_operator(machine.state(), this, from, ctx.sender)
                {
                    return Err(PairswapError::NotApproved(ctx.sender));
                }
                machine
                    .state_mut()
                    .debit(this, &token_balance_key(from, token_id), amount)?;
                machine
                    .state_mut()
                    .credit(this, &token_balance_key(to, token_id), amount)
            }
        }
    }
}
