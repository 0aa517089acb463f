use crate::models::common::*;
use std::sync::Arc;

/// Represents a vehicle place: where and when a vehicle starts or ends its shift.
#[derive(Clone, Debug)]
pub struct VehiclePlace {
    /// Location of a place.
    pub location: Location,
    /// Time of a place.
    pub time: TimeWindow,
}

/// Represents a vehicle.
pub struct Vehicle {
    /// A vehicle profile used by routing.
    pub profile: Profile,
}

/// Represents an actor detail: a shift of the vehicle.
#[derive(Clone, Debug)]
pub struct ActorDetail {
    /// A place where actor's vehicle starts.
    pub start: Option<VehiclePlace>,
    /// A place where actor's vehicle ends. Absent for an open tour.
    pub end: Option<VehiclePlace>,
}

/// Represents an actor: a vehicle within its shift.
pub struct Actor {
    /// A vehicle associated within actor.
    pub vehicle: Arc<Vehicle>,
    /// Specifies actor detail.
    pub detail: ActorDetail,
}
