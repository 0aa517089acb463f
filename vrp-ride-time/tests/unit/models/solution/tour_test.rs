use super::*;
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::*;
use crate::models::problem::Job;
use std::sync::Arc;

fn get_test_tour() -> Tour {
    let mut tour = Tour::new(&test_actor());
    tour.insert_last(test_activity(&test_service("job1", 1)));
    tour.insert_last(test_activity(&test_service("job2", 2)));

    tour
}

#[test]
fn can_create_tour_from_actor() {
    let closed = Tour::new(&test_actor());
    let open = Tour::new(&test_actor_with_end(None));

    assert!(closed.is_closed());
    assert_eq!(closed.total(), 2);
    assert!(!open.is_closed());
    assert_eq!(open.total(), 1);
    let sentinels = [closed.get(0), closed.get(1), open.get(0)];
    assert!(sentinels.into_iter().all(|sentinel| sentinel.is_some_and(|activity| activity.job.is_none())));
    assert_eq!(closed.job_activity_count(), 0);
    assert_eq!(open.job_activity_count(), 0);
}

parameterized_test! {can_insert_at_specific_position, position, {
    can_insert_at_specific_position_impl(position);
}}

can_insert_at_specific_position! {
    case1: 1,
    case2: 2,
    case3: 3,
}

fn can_insert_at_specific_position_impl(position: usize) {
    let single = test_service("job3", 3);
    let mut tour = get_test_tour();

    tour.insert_at(test_activity(&single), position);

    let inserted = tour.get(position).and_then(|activity| activity.job.as_ref()).expect("no job activity at position");
    assert!(Arc::ptr_eq(inserted, &single));
    assert_eq!(tour.job_activity_count(), 3);
}

#[test]
fn can_insert_last_before_end() {
    let tour = get_test_tour();

    assert_eq!(tour.total(), 4);
    assert_eq!(tour.get(2).map(|activity| activity.place.location), Some(2));
    assert!(tour.get(3).is_some_and(|end| end.job.is_none()));
}

#[test]
fn can_return_job_activities_without_sentinels() {
    let tour = get_test_tour();

    let locations = tour.job_activities_all().map(|activity| activity.place.location).collect::<Vec<_>>();

    assert_eq!(locations, vec![1, 2]);
}

#[test]
fn can_insert_shipment_around_existing_activities() {
    let shipment = test_shipment("shipment", 5, 6);
    let mut tour = get_test_tour();

    tour.insert_at(pickup_activity(&shipment), 1);
    tour.insert_at(delivery_activity(&shipment), 3);

    let locations = tour.job_activities_all().map(|activity| activity.place.location).collect::<Vec<_>>();
    assert_eq!(locations, vec![5, 1, 6, 2]);
    assert_eq!(tour.job_activity_count(), 4);
    assert!(tour.get(3).and_then(|activity| activity.retrieve_job()).is_some_and(|job| match job {
        Job::Multi(multi) => Arc::ptr_eq(&multi, &shipment),
        Job::Single(_) => false,
    }));
}

#[test]
fn can_deep_copy_tour() {
    let single = test_service("job1", 1);
    let mut original = Tour::new(&test_actor());
    original.insert_last(test_activity(&single));

    let copy = original.deep_copy();

    assert_eq!(copy.total(), original.total());
    assert!(copy.is_closed());
    assert!(!std::ptr::eq(copy.get(1).unwrap(), original.get(1).unwrap()));
    assert!(Arc::ptr_eq(copy.get(1).unwrap().job.as_ref().unwrap(), &single));
}
