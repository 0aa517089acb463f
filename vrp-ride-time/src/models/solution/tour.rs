#[cfg(test)]
#[path = "../../../tests/unit/models/solution/tour_test.rs"]
mod tour_test;

use crate::models::common::Schedule;
use crate::models::problem::{Actor, VehiclePlace};
use crate::models::solution::{Activity, Place};

/// An ordered sequence of vehicle stops: an optional start, committed job activities and an
/// optional end. A tour without end is open.
#[derive(Default)]
pub struct Tour {
    activities: Vec<Activity>,
    is_closed: bool,
}

impl Tour {
    /// Creates an empty tour using actor's start and end places.
    pub fn new(actor: &Actor) -> Self {
        let mut tour = Self::default();

        if let Some(start) = actor.detail.start.as_ref() {
            tour.set_start(create_sentinel_activity(start));
            if let Some(end) = actor.detail.end.as_ref() {
                tour.set_end(create_sentinel_activity(end));
            }
        }

        tour
    }

    /// Sets tour start. Must be called on an empty tour.
    pub fn set_start(&mut self, activity: Activity) -> &mut Tour {
        assert!(activity.job.is_none() && self.activities.is_empty());
        self.activities.push(activity);

        self
    }

    /// Sets tour end and closes the tour.
    pub fn set_end(&mut self, activity: Activity) -> &mut Tour {
        assert!(activity.job.is_none() && !self.activities.is_empty());
        self.activities.push(activity);
        self.is_closed = true;

        self
    }

    /// Appends a job activity after the last job activity.
    pub fn insert_last(&mut self, activity: Activity) -> &mut Tour {
        self.insert_at(activity, self.job_activity_count() + 1)
    }

    /// Inserts a job activity at the given index.
    pub fn insert_at(&mut self, activity: Activity, index: usize) -> &mut Tour {
        assert!(activity.job.is_some() && !self.activities.is_empty());
        self.activities.insert(index, activity);

        self
    }

    /// Returns committed job activities in the order they are performed. Start and end are skipped.
    pub fn job_activities_all(&self) -> impl Iterator<Item = &Activity> + '_ {
        self.activities.iter().filter(|activity| activity.job.is_some())
    }

    /// Returns an activity at the index, start is at zero.
    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    /// Returns amount of job activities.
    pub fn job_activity_count(&self) -> usize {
        self.activities.iter().filter(|activity| activity.job.is_some()).count()
    }

    /// Returns amount of all activities including start and end.
    pub fn total(&self) -> usize {
        self.activities.len()
    }

    /// Checks whether the tour has an end.
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Copies the tour with all its activities.
    pub fn deep_copy(&self) -> Tour {
        Tour {
            activities: self.activities.iter().map(Activity::deep_copy).collect(),
            is_closed: self.is_closed,
        }
    }
}

fn create_sentinel_activity(place: &VehiclePlace) -> Activity {
    Activity {
        place: Place { location: place.location, duration: 0., time: place.time.clone() },
        schedule: Schedule::new(place.time.start, place.time.start),
        job: None,
    }
}
