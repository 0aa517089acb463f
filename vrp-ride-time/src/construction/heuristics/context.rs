#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/context_test.rs"]
mod context_test;

use crate::models::problem::{Actor, Job};
use crate::models::solution::{Activity, Route, Tour};
use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// A route under construction together with the state features keep for it.
pub struct RouteContext {
    route: Route,
    state: RouteState,
    is_stale: bool,
}

/// A type keyed storage of per route values owned by features, e.g. ride time slots.
///
/// Values are kept behind `Arc`, so clones of the state see the same values. A deep copy shares
/// them too, except values stored with a copy function: these are copied.
#[derive(Clone, Default)]
pub struct RouteState {
    values: FxHashMap<TypeId, StateEntry>,
}

type StateValue = Arc<dyn Any + Send + Sync>;
type StateCopier = Arc<dyn Fn(&StateValue) -> Option<StateValue> + Send + Sync>;

#[derive(Clone)]
struct StateEntry {
    value: StateValue,
    copier: Option<StateCopier>,
}

impl RouteContext {
    /// Creates a route context with an empty tour of given actor.
    pub fn new(actor: Arc<Actor>) -> Self {
        let tour = Tour::new(actor.as_ref());
        Self::new_with_state(Route { actor, tour }, RouteState::default())
    }

    /// Creates a route context from existing route and state. The context starts stale.
    pub fn new_with_state(route: Route, state: RouteState) -> Self {
        Self { route, state, is_stale: true }
    }

    /// Copies the route and its state deeply.
    pub fn deep_copy(&self) -> Self {
        Self { route: self.route.deep_copy(), state: self.state.deep_copy(), is_stale: self.is_stale }
    }

    /// Returns the route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the route state.
    pub fn state(&self) -> &RouteState {
        &self.state
    }

    /// Returns the route for modification and marks the context stale.
    pub fn route_mut(&mut self) -> &mut Route {
        self.is_stale = true;
        &mut self.route
    }

    /// Returns the route state for modification and marks the context stale.
    pub fn state_mut(&mut self) -> &mut RouteState {
        self.is_stale = true;
        &mut self.state
    }

    /// Checks whether features have to accept the route state again.
    pub fn is_stale(&self) -> bool {
        self.is_stale
    }

    pub(crate) fn mark_stale(&mut self, is_stale: bool) {
        self.is_stale = is_stale;
    }
}

impl RouteState {
    /// Returns a value stored under `K` key if it has `V` type.
    pub fn get_tour_state<K: 'static, V: Send + Sync + 'static>(&self) -> Option<&V> {
        self.values.get(&TypeId::of::<K>()).and_then(|entry| entry.value.downcast_ref::<V>())
    }

    /// Stores a value under `K` key replacing the previous one. Deep copies share the value.
    pub fn set_tour_state<K: 'static, V: Send + Sync + 'static>(&mut self, value: V) {
        self.values.insert(TypeId::of::<K>(), StateEntry { value: Arc::new(value), copier: None });
    }

    /// Stores a value under `K` key replacing the previous one. Deep copies get a value made by `copy`.
    pub fn set_copied_tour_state<K: 'static, V: Send + Sync + 'static>(&mut self, value: V, copy: fn(&V) -> V) {
        let copier: StateCopier = Arc::new(move |value: &StateValue| {
            value.downcast_ref::<V>().map(|value| Arc::new(copy(value)) as StateValue)
        });

        self.values.insert(TypeId::of::<K>(), StateEntry { value: Arc::new(value), copier: Some(copier) });
    }

    /// Copies the state: values stored with a copy function are copied, others are shared.
    pub fn deep_copy(&self) -> Self {
        let values = self
            .values
            .iter()
            .map(|(key, entry)| {
                let value =
                    entry.copier.as_ref().and_then(|copier| copier(&entry.value)).unwrap_or_else(|| entry.value.clone());

                (*key, StateEntry { value, copier: entry.copier.clone() })
            })
            .collect();

        Self { values }
    }
}

/// Describes a position where the target activity is evaluated: between `prev` and `next`.
pub struct ActivityContext<'a> {
    /// An index in the tour the target activity would get.
    pub index: usize,

    /// An activity right before the target one.
    pub prev: &'a Activity,

    /// An activity which is evaluated. It is not a part of the tour yet.
    pub target: &'a Activity,

    /// An activity right after the target one. None at the end of an open tour.
    pub next: Option<&'a Activity>,
}

/// A move which feasibility is checked by feature constraints.
pub enum MoveContext<'a> {
    /// A job is about to be inserted somewhere into the route.
    Route {
        /// A route context.
        route_ctx: &'a RouteContext,
        /// A job to insert.
        job: &'a Job,
    },
    /// An activity is about to be inserted at the specific position.
    Activity {
        /// A route context.
        route_ctx: &'a RouteContext,
        /// A position with the activity.
        activity_ctx: &'a ActivityContext<'a>,
    },
}

impl<'a> MoveContext<'a> {
    /// Creates a job level move.
    pub fn route(route_ctx: &'a RouteContext, job: &'a Job) -> MoveContext<'a> {
        MoveContext::Route { route_ctx, job }
    }

    /// Creates an activity level move.
    pub fn activity(route_ctx: &'a RouteContext, activity_ctx: &'a ActivityContext) -> MoveContext<'a> {
        MoveContext::Activity { route_ctx, activity_ctx }
    }
}
