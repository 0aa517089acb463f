#[cfg(test)]
#[path = "../../tests/unit/models/goal_test.rs"]
mod goal_test;

use crate::construction::heuristics::*;
use crate::utils::{GenericResult, parallel_collect, parallel_foreach_mut};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::ops::ControlFlow;
use std::sync::Arc;

/// A set of hard constraints which decide whether a move is feasible.
///
/// Every constraint comes from a named [`Feature`]. Besides the constraint, a feature may keep
/// per route state which it needs to carry between separate evaluations, e.g. a ride time of the
/// shipment which pickup was evaluated earlier.
#[derive(Clone, Default)]
pub struct GoalContext {
    constraints: Vec<Arc<dyn FeatureConstraint + Send + Sync>>,
    states: Vec<Arc<dyn FeatureState + Send + Sync>>,
}

impl GoalContext {
    /// Creates a goal from features. Constraints are checked in the order of features.
    pub fn new(features: &[Feature]) -> GenericResult<Self> {
        let names = features.iter().map(|feature| feature.name.as_str()).collect::<Vec<_>>();

        if names.iter().collect::<HashSet<_>>().len() != names.len() {
            return Err(format!("some of the features are defined more than once, check names list: {}", names.join(","))
                .into());
        }

        Ok(Self {
            constraints: features.iter().filter_map(|feature| feature.constraint.clone()).collect(),
            states: features.iter().filter_map(|feature| feature.state.clone()).collect(),
        })
    }

    /// Lets features prepare their state for the route. Does nothing if the route was not changed
    /// since the last call.
    pub fn accept_route_state(&self, route_ctx: &mut RouteContext) {
        if !route_ctx.is_stale() {
            return;
        }

        self.states.iter().for_each(|state| state.accept_route_state(route_ctx));
        route_ctx.mark_stale(false);
    }

    /// Same as [`GoalContext::accept_route_state`] for many routes, in parallel.
    pub fn accept_route_states(&self, route_ctxs: &mut [RouteContext]) {
        parallel_foreach_mut(route_ctxs, |route_ctx| self.accept_route_state(route_ctx));
    }

    /// Checks the move against constraints and returns the first violation.
    pub fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        let result = self.constraints.iter().try_for_each(|constraint| match constraint.evaluate(move_ctx) {
            Some(violation) => ControlFlow::Break(violation),
            None => ControlFlow::Continue(()),
        });

        match result {
            ControlFlow::Break(violation) => Some(violation),
            ControlFlow::Continue(_) => None,
        }
    }

    /// Checks many moves in parallel keeping results in the order of moves.
    ///
    /// Constraints may update route state while evaluating, so all moves passed at once must target
    /// different routes. Moves on the same route have to be evaluated one by one.
    pub fn evaluate_parallel(&self, move_ctxs: &[MoveContext<'_>]) -> Vec<Option<ConstraintViolation>> {
        parallel_collect(move_ctxs, |move_ctx| self.evaluate(move_ctx))
    }
}

/// A named hard constraint with optional per route state.
#[derive(Clone, Default)]
pub struct Feature {
    /// A unique name.
    pub name: String,
    /// A hard constraint.
    pub constraint: Option<Arc<dyn FeatureConstraint + Send + Sync>>,
    /// A route state handler.
    pub state: Option<Arc<dyn FeatureState + Send + Sync>>,
}

/// A violated hard constraint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstraintViolation {
    /// A code of the violated constraint.
    pub code: ViolationCode,
    /// True if the caller should stop trying other positions for the same job.
    pub stopped: bool,
}

impl ConstraintViolation {
    /// A violation which stops further insertion attempts.
    pub fn fail(code: ViolationCode) -> Option<Self> {
        Some(ConstraintViolation { code, stopped: true })
    }

    /// A violation which allows trying other positions.
    pub fn skip(code: ViolationCode) -> Option<Self> {
        Some(ConstraintViolation { code, stopped: false })
    }

    /// No violation.
    pub fn success() -> Option<Self> {
        None
    }
}

/// A code which identifies a constraint in violations.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ViolationCode(pub i32);

impl From<i32> for ViolationCode {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl Display for ViolationCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a [`Feature`] checking that it is complete.
#[derive(Default)]
pub struct FeatureBuilder {
    feature: Feature,
}

impl FeatureBuilder {
    /// Sets feature name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.feature.name = name.to_string();
        self
    }

    /// Sets feature constraint.
    pub fn with_constraint<T: FeatureConstraint + Send + Sync + 'static>(mut self, constraint: T) -> Self {
        self.feature.constraint = Some(Arc::new(constraint));
        self
    }

    /// Sets feature state.
    pub fn with_state<T: FeatureState + Send + Sync + 'static>(mut self, state: T) -> Self {
        self.feature.state = Some(Arc::new(state));
        self
    }

    /// Returns the feature if it has a name and a constraint.
    pub fn build(self) -> GenericResult<Feature> {
        match self.feature {
            Feature { ref name, .. } if name.is_empty() => Err("features with default id are not allowed".into()),
            Feature { constraint: None, .. } => Err("empty feature is not allowed".into()),
            feature => Ok(feature),
        }
    }
}

/// Keeps per route state of a feature up to date.
pub trait FeatureState {
    /// Called when the route was changed. Must not add or remove activities.
    fn accept_route_state(&self, route_ctx: &mut RouteContext);
}

/// A hard constraint of a feature.
pub trait FeatureConstraint {
    /// Returns a violation if the move is not feasible.
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation>;
}
