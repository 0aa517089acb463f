#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/evaluators_test.rs"]
mod evaluators_test;

use crate::construction::heuristics::{ActivityContext, MoveContext, RouteContext};
use crate::models::solution::Activity;
use crate::models::{ConstraintViolation, GoalContext};
use crate::utils::{GenericError, GenericResult};

/// Evaluates insertion of the target activity into the route's tour at given index, so that it
/// would be placed between activities at `index - 1` and `index`. The tour is not modified.
pub fn evaluate_activity_insertion(
    goal: &GoalContext,
    route_ctx: &RouteContext,
    target: &Activity,
    index: usize,
) -> GenericResult<Option<ConstraintViolation>> {
    let tour = &route_ctx.route().tour;
    let last_index = if tour.is_closed() { tour.total().saturating_sub(1) } else { tour.total() };

    if index == 0 || index > last_index {
        return Err(format!("insertion index {index} is out of tour bounds [1, {last_index}]").into());
    }

    let prev = tour.get(index - 1).ok_or_else(|| GenericError::from(format!("no activity at index {}", index - 1)))?;
    let activity_ctx = ActivityContext { index, prev, target, next: tour.get(index) };

    Ok(goal.evaluate(&MoveContext::activity(route_ctx, &activity_ctx)))
}
