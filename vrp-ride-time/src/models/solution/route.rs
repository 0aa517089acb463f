use crate::models::common::{Duration, Location, Schedule, TimeWindow};
use crate::models::problem::{Actor, Job, JobTask, JobTaskDimension, Multi, Single};
use crate::models::solution::Tour;
use std::sync::Arc;

/// Where and when an activity happens.
#[derive(Clone, Debug)]
pub struct Place {
    /// Activity location.
    pub location: Location,

    /// Service duration at the location.
    pub duration: Duration,

    /// Allowed start time of the activity.
    pub time: TimeWindow,
}

/// A stop of the vehicle: a pickup, a delivery, a service or a tour start/end.
pub struct Activity {
    /// Place of the stop.
    pub place: Place,

    /// Arrival and departure times.
    pub schedule: Schedule,

    /// A single job served at the stop. None for tour start and end.
    /// Use `retrieve_job` to get the whole shipment when the single is its pickup or delivery.
    pub job: Option<Arc<Single>>,
}

/// A vehicle's tour.
pub struct Route {
    /// An actor which performs the tour.
    pub actor: Arc<Actor>,

    /// Committed activities of the route.
    pub tour: Tour,
}

impl Route {
    /// Copies the tour deeply keeping the actor shared.
    pub fn deep_copy(&self) -> Self {
        Self { actor: self.actor.clone(), tour: self.tour.deep_copy() }
    }
}

impl Activity {
    /// Creates a job activity at the given location with unrestricted time.
    pub fn new_with_job(job: Arc<Single>, location: Location) -> Self {
        Self {
            place: Place { location, duration: 0., time: TimeWindow::max() },
            schedule: Schedule::new(0., 0.),
            job: Some(job),
        }
    }

    /// Copies the activity. The job is shared, so the copy still refers to the same job.
    pub fn deep_copy(&self) -> Self {
        Self { place: self.place.clone(), schedule: self.schedule.clone(), job: self.job.clone() }
    }

    /// Returns the job served by the activity: the parent shipment for its pickup or delivery,
    /// the single job otherwise.
    pub fn retrieve_job(&self) -> Option<Job> {
        self.job.as_ref().map(|single| Multi::roots(single).map_or_else(|| Job::Single(single.clone()), Job::Multi))
    }

    /// Returns a kind of work performed by the activity. Tour start and end have no task.
    pub fn task(&self) -> Option<JobTask> {
        self.job.as_ref().and_then(|single| single.dimens.get_job_task()).copied()
    }
}
