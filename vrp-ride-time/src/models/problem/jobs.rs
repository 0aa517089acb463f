#[cfg(test)]
#[path = "../../../tests/unit/models/problem/jobs_test.rs"]
mod jobs_test;

use crate::models::common::*;
use std::sync::{Arc, Weak};

custom_dimension!(JobId typeof String);
custom_dimension!(JobTask typeof JobTask);

/// Specifies a kind of work performed by a single job.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum JobTask {
    /// A standalone service, not a part of any shipment.
    Service,
    /// A shipment's pickup: the load gets into the vehicle.
    Pickup,
    /// A shipment's delivery: the load leaves the vehicle.
    Delivery,
}

/// A job to be served by some vehicle.
#[derive(Clone)]
pub enum Job {
    /// A job with one activity.
    Single(Arc<Single>),
    /// A job which activities must be served by the same vehicle, e.g. a shipment.
    Multi(Arc<Multi>),
}

impl Job {
    /// Returns job level dimensions. For a shipment these are not the dimensions of its parts.
    pub fn dimens(&self) -> &Dimensions {
        match self {
            Job::Single(single) => &single.dimens,
            Job::Multi(multi) => &multi.dimens,
        }
    }
}

/// Where and when a single job can be served.
#[derive(Clone, Debug)]
pub struct Place {
    /// A location, if the job is bound to one.
    pub location: Option<Location>,
    /// Service duration.
    pub duration: Duration,
    /// Time windows when service can start.
    pub times: Vec<TimeWindow>,
}

/// A job served by one activity.
pub struct Single {
    /// Alternative places, one of them is used.
    pub places: Vec<Place>,
    /// Job properties: id, task, etc.
    pub dimens: Dimensions,
}

/// A job made of several singles served in the given order by the same vehicle.
/// A shipment has exactly two of them: a pickup followed by a delivery.
pub struct Multi {
    /// Sub jobs in the order of service.
    pub jobs: Vec<Arc<Single>>,
    /// Job properties.
    pub dimens: Dimensions,
}

struct MultiRootKey;

impl Multi {
    /// Creates a multi job making each sub job aware of it.
    pub fn new_shared(jobs: Vec<Single>, dimens: Dimensions) -> Arc<Self> {
        Arc::new_cyclic(|root: &Weak<Multi>| Self {
            jobs: jobs
                .into_iter()
                .map(|mut single| {
                    single.dimens.set_value::<MultiRootKey, _>(root.clone());
                    Arc::new(single)
                })
                .collect(),
            dimens,
        })
    }

    /// Returns the multi job which owns the sub job.
    pub fn roots(single: &Single) -> Option<Arc<Multi>> {
        single.dimens.get_value::<MultiRootKey, Weak<Multi>>().and_then(Weak::upgrade)
    }
}
