use super::*;
use crate::construction::heuristics::RouteState;
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::*;
use crate::models::{FeatureBuilder, FeatureConstraint, ViolationCode};
use std::sync::{Arc, Mutex};

type Neighbours = Arc<Mutex<Vec<(usize, Option<usize>)>>>;

/// Records locations of evaluated neighbours and rejects insertion before the tour end.
#[derive(Default)]
struct NeighbourConstraint {
    evaluated: Neighbours,
}

impl FeatureConstraint for NeighbourConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        match move_ctx {
            MoveContext::Activity { activity_ctx, .. } => {
                let next = activity_ctx.next.map(|next| next.place.location);
                self.evaluated.lock().unwrap().push((activity_ctx.prev.place.location, next));

                if activity_ctx.next.is_some_and(|next| next.job.is_none()) {
                    ConstraintViolation::skip(ViolationCode(1))
                } else {
                    None
                }
            }
            MoveContext::Route { .. } => None,
        }
    }
}

fn create_goal_with_neighbours(evaluated: Neighbours) -> GoalContext {
    let feature = FeatureBuilder::default().with_name("neighbour").with_constraint(NeighbourConstraint { evaluated });

    GoalContext::new(&[feature.build().unwrap()]).unwrap()
}

fn create_goal() -> GoalContext {
    create_goal_with_neighbours(Neighbours::default())
}

fn create_route_ctx(end: Option<usize>) -> RouteContext {
    let route = RouteBuilder::default()
        .with_actor(test_actor_with_end(end))
        .add_activity(test_activity(&test_service("job1", 1)))
        .add_activity(test_activity(&test_service("job2", 2)))
        .build();

    RouteContext::new_with_state(route, RouteState::default())
}

parameterized_test! {can_evaluate_insertion_at_index, (end, index, expected), {
    can_evaluate_insertion_at_index_impl(end, index, expected);
}}

can_evaluate_insertion_at_index! {
    case01_closed_after_start: (Some(0), 1, None),
    case02_closed_in_the_middle: (Some(0), 2, None),
    case03_closed_before_end: (Some(0), 3, ConstraintViolation::skip(ViolationCode(1))),
    case04_open_last: (None, 3, None),
}

fn can_evaluate_insertion_at_index_impl(end: Option<usize>, index: usize, expected: Option<ConstraintViolation>) {
    let goal = create_goal();
    let route_ctx = create_route_ctx(end);
    let target = test_activity(&test_service("job3", 3));
    let tour_before = route_ctx.route().tour.total();

    let result = evaluate_activity_insertion(&goal, &route_ctx, &target, index);

    assert_eq!(result, Ok(expected));
    assert_eq!(route_ctx.route().tour.total(), tour_before);
}

parameterized_test! {can_reject_index_out_of_bounds, (end, index), {
    can_reject_index_out_of_bounds_impl(end, index);
}}

can_reject_index_out_of_bounds! {
    case01_closed_start: (Some(0), 0),
    case02_closed_after_end: (Some(0), 4),
    case03_open_start: (None, 0),
    case04_open_after_last: (None, 4),
}

fn can_reject_index_out_of_bounds_impl(end: Option<usize>, index: usize) {
    let goal = create_goal();
    let route_ctx = create_route_ctx(end);
    let target = test_activity(&test_service("job3", 3));

    let result = evaluate_activity_insertion(&goal, &route_ctx, &target, index);

    assert!(result.is_err());
}

#[test]
fn can_pass_adjacent_activities_to_constraint() {
    let evaluated = Neighbours::default();
    let goal = create_goal_with_neighbours(evaluated.clone());
    let route_ctx = create_route_ctx(None);
    let target = test_activity(&test_service("job3", 3));

    (1..=3).for_each(|index| {
        evaluate_activity_insertion(&goal, &route_ctx, &target, index).unwrap();
    });

    assert_eq!(*evaluated.lock().unwrap(), vec![(0, Some(1)), (1, Some(2)), (2, None)]);
}
