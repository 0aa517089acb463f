//! This module reimports a common used types.

// Reimport ride time types
pub use crate::construction::features::create_ride_time_feature;
pub use crate::construction::features::create_ride_time_features;
pub use crate::construction::features::RideTimeError;
pub use crate::construction::features::RideTimeLimit;
pub use crate::construction::features::RideTimeSlots;
pub use crate::construction::features::RideTimeStatus;

pub use crate::config::create_features_from_config;
pub use crate::config::read_config;

// Reimport model types
pub use crate::construction::heuristics::evaluate_activity_insertion;
pub use crate::construction::heuristics::{ActivityContext, MoveContext, RouteContext, RouteState};
pub use crate::models::problem::{create_matrix_transport_cost, MatrixData, TransportCost};
pub use crate::models::{ConstraintViolation, Feature, GoalContext, ViolationCode};

// Reimport utils
pub use crate::utils::compare_floats;
pub use crate::utils::Environment;
pub use crate::utils::GenericError;
pub use crate::utils::GenericResult;
pub use crate::utils::InfoLogger;
