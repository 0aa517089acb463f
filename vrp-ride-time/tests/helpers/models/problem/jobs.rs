use crate::models::common::{Dimensions, Location, TimeWindow};
use crate::models::problem::{JobIdDimension, JobTask, JobTaskDimension, Multi, Place, Single};
use std::sync::Arc;

pub fn test_place_with_location(location: Location) -> Place {
    Place { location: Some(location), duration: 0., times: vec![TimeWindow::max()] }
}

pub fn test_single(id: &str, task: JobTask, location: Location) -> Single {
    let mut dimens = Dimensions::default();
    dimens.set_job_id(id.to_string()).set_job_task(task);

    Single { places: vec![test_place_with_location(location)], dimens }
}

/// Creates a standalone service job.
pub fn test_service(id: &str, location: Location) -> Arc<Single> {
    Arc::new(test_single(id, JobTask::Service, location))
}

/// Creates a shipment: a multi job with pickup and delivery sub jobs.
pub fn test_shipment(id: &str, pickup: Location, delivery: Location) -> Arc<Multi> {
    let mut dimens = Dimensions::default();
    dimens.set_job_id(id.to_string());

    Multi::new_shared(
        vec![test_single(id, JobTask::Pickup, pickup), test_single(id, JobTask::Delivery, delivery)],
        dimens,
    )
}
