//! Predicate dispatch: resolves an order's `(static_target, static_selector)`
//! pair to a registered evaluator.

use std::collections::HashMap;
use std::sync::Arc;

use pairswap_types::{PairswapError, Result, Selector, TargetId};

use crate::PredicateEvaluator;

/// Maps `(target, selector)` pairs to predicate evaluators.
///
/// A static target hosts one or more predicate functions, distinguished by
/// selector — mirroring how orders address them. Unknown pairs resolve to
/// `PredicateNotFound`.
#[derive(Default)]
pub struct StaticRouter {
    predicates: HashMap<(TargetId, Selector), Arc<dyn PredicateEvaluator>>,
}

impl StaticRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an evaluator under `(target, selector)`. Re-registration
    /// replaces the previous evaluator.
    pub fn install(
        &mut self,
        target: TargetId,
        selector: Selector,
        evaluator: Arc<dyn PredicateEvaluator>,
    ) {
        self.predicates.insert((target, selector), evaluator);
    }

    /// Resolve a predicate, failing if none is registered.
    pub fn resolve(
        &self,
        target: TargetId,
        selector: Selector,
    ) -> Result<&Arc<dyn PredicateEvaluator>> {
        self.predicates
            .get(&(target, selector))
            .ok_or(PairswapError::PredicateNotFound { target, selector })
    }

    /// Number of registered predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}
