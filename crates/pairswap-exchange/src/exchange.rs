//! The exchange: gate sequence, order lifecycle, and atomic settlement.

use chrono::Utc;

use pairswap_registry::{Machine, RegistrySet};
use pairswap_statics::StaticRouter;
use pairswap_types::{
    AccountId, Call, ExchangeConfig, MatchReceipt, Order, OrderHash, PairswapError, Result,
};

use crate::authorization::{self, Approval};
use crate::fill_ledger::FillLedger;

/// One half of a prospective match: the order, the proof its maker stands
/// behind it, and the concrete call to execute on the maker's behalf.
#[derive(Debug, Clone)]
pub struct MatchSide {
    pub order: Order,
    pub approval: Approval,
    pub call: Call,
}

impl MatchSide {
    #[must_use]
    pub fn new(order: Order, approval: Approval, call: Call) -> Self {
        Self {
            order,
            approval,
            call,
        }
    }
}

/// The matching core for one deployment.
///
/// Owns the fill ledger and the predicate router; the execution machine and
/// registry set are collaborators passed per call, so several exchanges can
/// share one world (and one exchange can be driven against test worlds).
///
/// `identity` is the account the exchange presents to registries — the one
/// that [`grant_initial_authentication`] was called with.
///
/// [`grant_initial_authentication`]: pairswap_registry::ProxyRegistry::grant_initial_authentication
pub struct Exchange {
    identity: AccountId,
    config: ExchangeConfig,
    statics: StaticRouter,
    ledger: FillLedger,
}

impl Exchange {
    #[must_use]
    pub fn new(identity: AccountId, config: ExchangeConfig, statics: StaticRouter) -> Self {
        Self {
            identity,
            config,
            statics,
            ledger: FillLedger::new(),
        }
    }

    #[must_use]
    pub fn identity(&self) -> AccountId {
        self.identity
    }

    #[must_use]
    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    #[must_use]
    pub fn statics(&self) -> &StaticRouter {
        &self.statics
    }

    /// The order's identity hash, the key for all durable per-order state.
    #[must_use]
    pub fn hash_order(&self, order: &Order) -> OrderHash {
        order.hash()
    }

    /// The digest a maker signs to authorize `order` on this deployment.
    #[must_use]
    pub fn order_digest(&self, order: &Order) -> [u8; 32] {
        authorization::order_digest(self.config.chain_id, order.hash())
    }

    #[must_use]
    pub fn filled_amount(&self, order: OrderHash) -> u64 {
        self.ledger.filled_amount(order)
    }

    #[must_use]
    pub fn is_cancelled(&self, order: OrderHash) -> bool {
        self.ledger.is_cancelled(order)
    }

    #[must_use]
    pub fn is_approved(&self, order: OrderHash) -> bool {
        self.ledger.is_approved(order)
    }

    /// Structural and window validity of one order at `now` (unix seconds).
    ///
    /// Returns the order's identity hash so callers compute it once.
    pub fn validate_order(&self, order: &Order, now: i64) -> Result<OrderHash> {
        let hash = order.hash();
        if order.maximum_fill == 0 {
            return Err(PairswapError::InvalidOrder {
                reason: "maximum_fill must be non-zero".into(),
            });
        }
        if order.static_extradata.len() > self.config.max_extradata_bytes {
            return Err(PairswapError::InvalidOrder {
                reason: format!(
                    "extradata is {} bytes, limit {}",
                    order.static_extradata.len(),
                    self.config.max_extradata_bytes
                ),
            });
        }
        if !self.config.accepts_registry(order.registry) {
            return Err(PairswapError::RegistryNotAllowed(order.registry));
        }
        if !order.is_listed_at(now) {
            return Err(PairswapError::OrderNotListed(hash));
        }
        if order.is_expired_at(now) {
            return Err(PairswapError::OrderExpired(hash));
        }
        if self.ledger.is_cancelled(hash) {
            return Err(PairswapError::OrderCancelled(hash));
        }
        Ok(hash)
    }

    /// Mark an order approved on-ledger so later matches need no signature.
    /// Maker-only; idempotent.
    pub fn approve_order(&mut self, caller: AccountId, order: &Order) -> Result<OrderHash> {
        let hash = order.hash();
        if caller != order.maker {
            return Err(PairswapError::Unauthorized(hash));
        }
        if self.ledger.approve(hash) {
            tracing::debug!(order = %hash, maker = %order.maker, "order approved on-ledger");
        }
        Ok(hash)
    }

    /// Cancel an order identity, terminally. Maker-only; idempotent; also
    /// effective for identities that have never matched.
    pub fn cancel_order(&mut self, caller: AccountId, order: &Order) -> Result<OrderHash> {
        let hash = order.hash();
        if caller != order.maker {
            return Err(PairswapError::Unauthorized(hash));
        }
        if self.ledger.cancel(hash) {
            tracing::info!(order = %hash, maker = %order.maker, "order cancelled");
        }
        Ok(hash)
    }

    /// Match two orders and settle their calls atomically.
    ///
    /// The first failing gate aborts the whole match; durable state (world
    /// state and the fill ledger) only changes if every gate passes, and
    /// then for both sides together.
    pub fn atomic_match(
        &mut self,
        machine: &mut Machine,
        registries: &RegistrySet,
        caller: AccountId,
        first: &MatchSide,
        second: &MatchSide,
        metadata: [u8; 32],
    ) -> Result<MatchReceipt> {
        let now = Utc::now().timestamp();

        // Gate 1: validity. Two sides resolving to one identity would let a
        // single fill budget settle against itself.
        let first_hash = self.validate_order(&first.order, now)?;
        let second_hash = self.validate_order(&second.order, now)?;
        if first_hash == second_hash {
            return Err(PairswapError::SelfMatch(first_hash));
        }

        // Gate 2: maker authorization.
        self.authorize_order(caller, &first.order, first_hash, &first.approval)?;
        self.authorize_order(caller, &second.order, second_hash, &second.approval)?;

        // Gate 3: neither order may already be exhausted. Every successful
        // fill is at least 1, so this asks for the minimum.
        self.ledger
            .check_capacity(first_hash, 1, first.order.maximum_fill)?;
        self.ledger
            .check_capacity(second_hash, 1, second.order.maximum_fill)?;

        // Gate 4: predicates veto or count the match.
        let first_fill = self.evaluate_side(first, &second.call, first_hash)?;
        let second_fill = self.evaluate_side(second, &first.call, second_hash)?;

        // Gate 5: the counted quantities must fit exactly.
        self.ledger
            .check_capacity(first_hash, first_fill, first.order.maximum_fill)?;
        self.ledger
            .check_capacity(second_hash, second_fill, second.order.maximum_fill)?;

        // Gate 6: routed execution, all-or-nothing.
        let snapshot = machine.snapshot();
        let executed = self
            .execute_side(machine, registries, first)
            .and_then(|()| self.execute_side(machine, registries, second));
        if let Err(err) = executed {
            machine.restore(snapshot);
            tracing::warn!(
                first = %first_hash,
                second = %second_hash,
                error = %err,
                "match rolled back"
            );
            return Err(err);
        }

        // Gate 7: commit both fills and emit the receipt.
        self.ledger.apply_fill(first_hash, first_fill)?;
        self.ledger.apply_fill(second_hash, second_fill)?;

        tracing::info!(
            first = %first_hash,
            second = %second_hash,
            first_fill,
            second_fill,
            "match committed"
        );
        Ok(MatchReceipt {
            first_order: first_hash,
            second_order: second_hash,
            first_fill,
            second_fill,
            metadata,
            matched_at: Utc::now(),
        })
    }

    /// Whether `caller` may settle `order` with the given approval: the
    /// maker calling directly, a prior on-ledger approval, or a valid
    /// detached signature. Cancelled orders authorize nobody.
    pub fn authorize_order(
        &self,
        caller: AccountId,
        order: &Order,
        hash: OrderHash,
        approval: &Approval,
    ) -> Result<()> {
        if self.ledger.is_cancelled(hash) {
            return Err(PairswapError::OrderCancelled(hash));
        }
        if self.ledger.is_approved(hash) {
            return Ok(());
        }
        let authorized = match approval {
            Approval::Direct => caller == order.maker,
            Approval::Signature(sig) => {
                let digest = authorization::order_digest(self.config.chain_id, hash);
                authorization::verify_signature(order.maker, &digest, sig)
            }
        };
        if authorized {
            Ok(())
        } else {
            Err(PairswapError::Unauthorized(hash))
        }
    }

    fn evaluate_side(&self, side: &MatchSide, counter_call: &Call, hash: OrderHash) -> Result<u64> {
        let predicate = self
            .statics
            .resolve(side.order.static_target, side.order.static_selector)?;
        if !predicate.allows_mode(side.call.how) {
            return Err(PairswapError::ModeNotAllowed {
                reason: format!("predicate for {hash} does not declare {} safe", side.call.how),
            });
        }
        let fill = predicate.evaluate(&side.order.static_extradata, &side.call, counter_call)?;
        if fill == 0 {
            return Err(PairswapError::PredicateRejected {
                reason: format!("predicate for {hash} counted a zero fill"),
            });
        }
        Ok(fill)
    }

    /// Route one side's call through its maker's proxy, with the exchange
    /// as caller. Proxy-authorization failures surface as themselves; any
    /// other failure inside the target is reported as `ExecutionFailed`.
    fn execute_side(
        &self,
        machine: &mut Machine,
        registries: &RegistrySet,
        side: &MatchSide,
    ) -> Result<()> {
        let registry = registries
            .get(side.order.registry)
            .ok_or(PairswapError::RegistryNotAllowed(side.order.registry))?;
        registry
            .execute_for(machine, side.order.maker, self.identity, &side.call)
            .map_err(|err| match err {
                e @ (PairswapError::ProxyNotRegistered(_)
                | PairswapError::ProxyAccessRevoked(_)
                | PairswapError::CallerNotAuthorized(_)
                | PairswapError::ModeNotAllowed { .. }
                | PairswapError::ExecutionFailed { .. }) => e,
                other => PairswapError::ExecutionFailed {
                    reason: other.to_string(),
                },
            })
    }
}
