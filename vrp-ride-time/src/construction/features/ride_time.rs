//! A feature to limit the time a shipment's load spends aboard the vehicle (maximum ride time).
//!
//! Insertion heuristics propose the pickup and the delivery of a shipment independently, often in
//! different search iterations. The evaluator reconstructs the full ride from the committed part
//! of the route and from fragments stored in [`RideTimeSlots`] by earlier evaluations on the same
//! route. The committed tour never contains the activity under evaluation.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/ride_time_test.rs"]
mod ride_time_test;

use super::*;
use crate::models::common::{Duration, Location, Profile};
use crate::models::problem::{JobIdDimension, JobTask, Single, TransportCost};
use crate::models::solution::{Activity, Route};
use crate::utils::{Environment, GenericResult, InfoLogger, compare_floats};
use std::cmp::Ordering;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

custom_tour_state!(RideTimeStore typeof RideTimeStore, copied by RideTimeStore::deep_copy);

/// Specifies a ride time verdict. It is narrower than [`ConstraintViolation`]: the evaluator
/// never asks to stop further insertion attempts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RideTimeStatus {
    /// Ride time limit holds.
    Fulfilled,
    /// Ride time limit is exceeded.
    NotFulfilled,
}

impl RideTimeStatus {
    /// Widens the verdict to a constraint violation with given code.
    pub fn into_violation(self, code: ViolationCode) -> Option<ConstraintViolation> {
        match self {
            RideTimeStatus::Fulfilled => ConstraintViolation::success(),
            RideTimeStatus::NotFulfilled => ConstraintViolation::skip(code),
        }
    }
}

/// Specifies ride time evaluation errors.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RideTimeError {
    /// A delivery of the tracked job is evaluated, but its pickup was never evaluated on the route.
    #[error("invalid evaluation order: delivery of '{job_id}' is evaluated before its pickup")]
    InvalidEvaluationOrder {
        /// Tracked job id.
        job_id: String,
    },

    /// A ride time store of the route cannot be accessed.
    #[error("ride time state is unavailable: {0}")]
    StateUnavailable(String),
}

/// A detached reference to an activity kept between evaluations: its job and its location.
/// Tour start and end have no job and never match any activity.
#[derive(Clone)]
pub struct ActivityMark {
    location: Location,
    job: Option<Arc<Single>>,
}

impl ActivityMark {
    fn new(activity: &Activity) -> Self {
        Self { location: activity.place.location, job: activity.job.clone() }
    }

    /// Returns location of marked activity.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Checks whether the mark refers to the given activity.
    pub fn is_same(&self, activity: &Activity) -> bool {
        matches!((&self.job, &activity.job), (Some(lhs), Some(rhs)) if Arc::ptr_eq(lhs, rhs))
    }
}

#[derive(Clone)]
struct PendingPickup {
    pickup: ActivityMark,
    next: Option<ActivityMark>,
}

#[derive(Clone)]
struct PlannedInsertion {
    prev: ActivityMark,
    target: ActivityMark,
    next: ActivityMark,
}

/// Keeps ride time state of one tracked job within one route.
///
/// The pending pickup is written when the tracked pickup is evaluated and consumed when its
/// delivery is evaluated. The planned insertion is written when a foreign pickup is accepted
/// inside the tracked ride and consumed when the foreign delivery is evaluated right after it.
/// Slots are never reset: later writes overwrite earlier ones.
#[derive(Clone, Default)]
pub struct RideTimeSlots {
    pending: Option<PendingPickup>,
    planned: Option<PlannedInsertion>,
}

impl RideTimeSlots {
    /// Returns the tracked pickup and its next activity stored by the latest pickup evaluation.
    pub fn pending_pickup(&self) -> Option<(&ActivityMark, Option<&ActivityMark>)> {
        self.pending.as_ref().map(|pending| (&pending.pickup, pending.next.as_ref()))
    }

    /// Returns previous, new and next activities of the latest foreign pickup accepted inside the ride.
    pub fn planned_insertion(&self) -> Option<(&ActivityMark, &ActivityMark, &ActivityMark)> {
        self.planned.as_ref().map(|planned| (&planned.prev, &planned.target, &planned.next))
    }

    /// Checks whether nothing was written yet.
    pub fn is_empty(&self) -> bool {
        self.pending.is_none() && self.planned.is_none()
    }
}

/// A per route side-table which keeps [`RideTimeSlots`] of all tracked jobs.
/// Clones share the same table, a deep copy gets its own one.
#[derive(Clone, Default)]
pub struct RideTimeStore {
    table: Arc<Mutex<FxHashMap<String, RideTimeSlots>>>,
}

impl RideTimeStore {
    /// Runs given function with mutable slots of the tracked job.
    pub fn with_slots<R>(&self, job_id: &str, func: impl FnOnce(&mut RideTimeSlots) -> R) -> Result<R, RideTimeError> {
        let mut table = self.table.lock().map_err(|err| RideTimeError::StateUnavailable(err.to_string()))?;

        Ok(func(table.entry(job_id.to_string()).or_default()))
    }

    /// Returns a copy of the slots of the tracked job, if any were created.
    pub fn get_slots(&self, job_id: &str) -> Result<Option<RideTimeSlots>, RideTimeError> {
        let table = self.table.lock().map_err(|err| RideTimeError::StateUnavailable(err.to_string()))?;

        Ok(table.get(job_id).cloned())
    }

    /// Copies the store with all slots into a new table which is not shared with this one.
    pub fn deep_copy(&self) -> Self {
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner).clone();

        Self { table: Arc::new(Mutex::new(table)) }
    }
}

/// Evaluates maximum ride time of one tracked shipment. Multiple tracked shipments require
/// multiple instances.
pub struct RideTimeLimit {
    job_id: String,
    max_ride_time: Duration,
    transport: Arc<dyn TransportCost + Send + Sync>,
    profile: Profile,
    logger: Option<InfoLogger>,
}

impl RideTimeLimit {
    /// Creates a new instance of `RideTimeLimit` for the job with given id.
    pub fn new(
        job_id: &str,
        max_ride_time: Duration,
        transport: Arc<dyn TransportCost + Send + Sync>,
    ) -> GenericResult<Self> {
        if job_id.is_empty() {
            return Err("ride time limit requires non-empty job id".into());
        }

        if !max_ride_time.is_finite() || compare_floats(max_ride_time, 0.) != Ordering::Greater {
            return Err(format!("max ride time of '{job_id}' must be positive, got: {max_ride_time}").into());
        }

        Ok(Self { job_id: job_id.to_string(), max_ride_time, transport, profile: Profile::default(), logger: None })
    }

    /// Sets a logger which receives diagnostic messages of individual evaluations.
    pub fn with_logger(mut self, logger: InfoLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Returns id of the tracked job.
    pub fn job_id(&self) -> &str {
        self.job_id.as_str()
    }

    /// Returns max allowed ride time.
    pub fn max_ride_time(&self) -> Duration {
        self.max_ride_time
    }

    /// Evaluates insertion of `target` between `prev` and `next` which are adjacent in the route.
    /// The route must not contain `target` yet. Slots must belong to this route and tracked job.
    pub fn evaluate(
        &self,
        route: &Route,
        slots: &mut RideTimeSlots,
        prev: &Activity,
        target: &Activity,
        next: Option<&Activity>,
    ) -> Result<RideTimeStatus, RideTimeError> {
        let activities = route.tour.job_activities_all().collect::<Vec<_>>();

        if self.is_tracked(target) {
            return match target.task() {
                Some(JobTask::Pickup) => {
                    slots.pending =
                        Some(PendingPickup { pickup: ActivityMark::new(target), next: next.map(ActivityMark::new) });
                    Ok(RideTimeStatus::Fulfilled)
                }
                // NOTE a delivery right after its own pickup is accepted without any check
                Some(JobTask::Delivery) if !self.is_tracked_task(prev, JobTask::Pickup) => {
                    self.evaluate_own_delivery(activities.as_slice(), slots, prev, target)
                }
                _ => Ok(RideTimeStatus::Fulfilled),
            };
        }

        let pickup_idx = activities.iter().position(|activity| self.is_tracked_task(activity, JobTask::Pickup));
        let delivery_idx = activities.iter().position(|activity| self.is_tracked_task(activity, JobTask::Delivery));

        match (pickup_idx, delivery_idx) {
            (Some(pickup_idx), Some(delivery_idx)) if pickup_idx <= delivery_idx => {
                self.evaluate_foreign(&activities[pickup_idx..=delivery_idx], slots, prev, target, next)
            }
            (Some(pickup_idx), Some(delivery_idx)) => {
                self.debug(|| format!("'{}': delivery at {delivery_idx} precedes pickup at {pickup_idx}", self.job_id));
                Ok(RideTimeStatus::Fulfilled)
            }
            _ => Ok(RideTimeStatus::Fulfilled),
        }
    }

    fn evaluate_own_delivery(
        &self,
        activities: &[&Activity],
        slots: &RideTimeSlots,
        prev: &Activity,
        target: &Activity,
    ) -> Result<RideTimeStatus, RideTimeError> {
        let pending =
            slots.pending.as_ref().ok_or_else(|| RideTimeError::InvalidEvaluationOrder { job_id: self.job_id.clone() })?;

        let Some(pending_next) = pending.next.as_ref() else {
            self.debug(|| format!("'{}': pickup was evaluated at the end of open tour", self.job_id));
            return Ok(RideTimeStatus::Fulfilled);
        };

        let next_idx = activities.iter().position(|activity| pending_next.is_same(activity));
        let prev_idx = activities.iter().position(|activity| is_same_activity(activity, prev));

        match (next_idx, prev_idx) {
            (Some(next_idx), Some(prev_idx)) if next_idx <= prev_idx => {
                let ride_time = self.travel_time([pending.pickup.location, pending_next.location])
                    + self.travel_time(activities[next_idx..=prev_idx].iter().map(|activity| activity.place.location))
                    + self.travel_time([prev.place.location, target.place.location]);

                Ok(self.check_ride_time(ride_time))
            }
            _ => {
                self.debug(|| format!("'{}': delivery is not placed after pickup's next activity", self.job_id));
                Ok(RideTimeStatus::Fulfilled)
            }
        }
    }

    fn evaluate_foreign(
        &self,
        span: &[&Activity],
        slots: &mut RideTimeSlots,
        prev: &Activity,
        target: &Activity,
        next: Option<&Activity>,
    ) -> Result<RideTimeStatus, RideTimeError> {
        let Some(next) = next else {
            return Ok(RideTimeStatus::Fulfilled);
        };

        let prev_idx = span.iter().position(|activity| is_same_activity(activity, prev));
        let next_idx = span.iter().position(|activity| is_same_activity(activity, next));

        if let (Some(prev_idx), Some(next_idx)) = (prev_idx, next_idx) {
            let ride_time = self.travel_time(get_locations(&span[..=prev_idx]))
                + self.travel_time(get_locations(&span[next_idx..]))
                + self.travel_time([prev.place.location, target.place.location, next.place.location]);

            let status = self.check_ride_time(ride_time);

            if status == RideTimeStatus::Fulfilled && target.task() == Some(JobTask::Pickup) {
                slots.planned = Some(PlannedInsertion {
                    prev: ActivityMark::new(prev),
                    target: ActivityMark::new(target),
                    next: ActivityMark::new(next),
                });
            }

            return Ok(status);
        }

        let Some(planned) =
            slots.planned.as_ref().filter(|planned| planned.target.is_same(prev) && planned.next.is_same(next))
        else {
            return Ok(RideTimeStatus::Fulfilled);
        };

        let planned_prev_idx = span.iter().position(|activity| planned.prev.is_same(activity));
        let planned_next_idx = span.iter().position(|activity| planned.next.is_same(activity));

        match (planned_prev_idx, planned_next_idx) {
            (Some(planned_prev_idx), Some(planned_next_idx)) => {
                let ride_time = self.travel_time(get_locations(&span[..=planned_prev_idx]))
                    + self.travel_time([
                        planned.prev.location,
                        prev.place.location,
                        target.place.location,
                        next.place.location,
                    ])
                    + self.travel_time(get_locations(&span[planned_next_idx..]));

                Ok(self.check_ride_time(ride_time))
            }
            _ => {
                self.debug(|| format!("'{}': planned insertion is outside of the ride", self.job_id));
                Ok(RideTimeStatus::Fulfilled)
            }
        }
    }

    /// Sums travel durations of consecutive legs starting with a leg from the first location to itself.
    fn travel_time(&self, locations: impl IntoIterator<Item = Location>) -> Duration {
        let mut locations = locations.into_iter().peekable();

        let Some(&first) = locations.peek() else {
            return 0.;
        };

        locations
            .fold((first, Duration::default()), |(from, total), to| {
                (to, total + self.transport.duration_approx(&self.profile, from, to))
            })
            .1
    }

    fn check_ride_time(&self, ride_time: Duration) -> RideTimeStatus {
        if compare_floats(ride_time, self.max_ride_time) == Ordering::Greater {
            self.debug(|| format!("'{}': ride time {ride_time} exceeds {}", self.job_id, self.max_ride_time));
            RideTimeStatus::NotFulfilled
        } else {
            RideTimeStatus::Fulfilled
        }
    }

    fn is_tracked(&self, activity: &Activity) -> bool {
        activity.retrieve_job().is_some_and(|job| job.dimens().get_job_id().is_some_and(|id| *id == self.job_id))
    }

    fn is_tracked_task(&self, activity: &Activity, task: JobTask) -> bool {
        activity.task() == Some(task) && self.is_tracked(activity)
    }

    fn debug(&self, message: impl FnOnce() -> String) {
        if let Some(logger) = self.logger.as_ref() {
            (logger)(message().as_str());
        }
    }
}

/// Creates a feature which limits ride time of the shipment tracked by `limit`.
/// This is a hard constraint.
pub fn create_ride_time_feature(
    name: &str,
    code: ViolationCode,
    limit: RideTimeLimit,
    environment: &Environment,
) -> GenericResult<Feature> {
    let limit = if environment.is_verbose { limit.with_logger(environment.logger.clone()) } else { limit };

    FeatureBuilder::default()
        .with_name(name)
        .with_constraint(RideTimeConstraint { code, limit, logger: environment.logger.clone() })
        .with_state(RideTimeState {})
        .build()
}

/// Creates ride time features for multiple tracked shipments. A feature name is built from
/// the given prefix and tracked job id.
pub fn create_ride_time_features(
    prefix: &str,
    code: ViolationCode,
    limits: Vec<RideTimeLimit>,
    environment: &Environment,
) -> GenericResult<Vec<Feature>> {
    let mut job_ids = FxHashSet::default();
    if let Some(limit) = limits.iter().find(|limit| !job_ids.insert(limit.job_id().to_string())) {
        return Err(format!("ride time limit is defined more than once for '{}'", limit.job_id()).into());
    }

    limits
        .into_iter()
        .map(|limit| {
            let name = format!("{prefix}_{}", limit.job_id());
            create_ride_time_feature(name.as_str(), code, limit, environment)
        })
        .collect()
}

struct RideTimeConstraint {
    code: ViolationCode,
    limit: RideTimeLimit,
    logger: InfoLogger,
}

impl RideTimeConstraint {
    fn evaluate_activity(
        &self,
        route_ctx: &RouteContext,
        activity_ctx: &ActivityContext,
    ) -> Result<RideTimeStatus, RideTimeError> {
        let evaluate = |slots: &mut RideTimeSlots| {
            self.limit.evaluate(route_ctx.route(), slots, activity_ctx.prev, activity_ctx.target, activity_ctx.next)
        };

        match route_ctx.state().get_ride_time_store() {
            Some(store) => store.with_slots(self.limit.job_id(), evaluate).and_then(|result| result),
            None => evaluate(&mut RideTimeSlots::default()),
        }
    }
}

impl FeatureConstraint for RideTimeConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        match move_ctx {
            MoveContext::Route { .. } => None,
            MoveContext::Activity { route_ctx, activity_ctx } => match self.evaluate_activity(route_ctx, activity_ctx) {
                Ok(status) => status.into_violation(self.code),
                Err(err) => {
                    (self.logger)(format!("ride time of '{}' cannot be evaluated: {err}", self.limit.job_id()).as_str());
                    ConstraintViolation::fail(self.code)
                }
            },
        }
    }
}

struct RideTimeState {}

impl FeatureState for RideTimeState {
    fn accept_route_state(&self, route_ctx: &mut RouteContext) {
        if route_ctx.state().get_ride_time_store().is_none() {
            route_ctx.state_mut().set_ride_time_store(RideTimeStore::default());
        }
    }
}

fn is_same_activity(lhs: &Activity, rhs: &Activity) -> bool {
    std::ptr::eq(lhs, rhs) || matches!((&lhs.job, &rhs.job), (Some(lhs), Some(rhs)) if Arc::ptr_eq(lhs, rhs))
}

fn get_locations<'a>(activities: &'a [&'a Activity]) -> impl Iterator<Item = Location> + 'a {
    activities.iter().map(|activity| activity.place.location)
}
