//! This crate provides a maximum ride time (time in vehicle) constraint for shipments which is
//! designed to be evaluated by insertion based ***Vehicle Routing Problem*** heuristics.
//!
//! # Key points
//!
//! A shipment is a pair of pickup and delivery activities served by the same vehicle. Its ride
//! time is a cumulative travel duration from the pickup through the delivery inclusive of all
//! intervening stops. Insertion heuristics propose the pickup and the delivery independently, so
//! the constraint keeps a small per route side-table ([`construction::features::RideTimeSlots`])
//! which carries fragments of the ride between evaluations.
//!
//! The main entry points are:
//! - [`construction::features::RideTimeLimit`]: the evaluator itself;
//! - [`construction::features::create_ride_time_feature`]: wraps the evaluator into a [`models::Feature`];
//! - [`config::read_config`] and [`config::create_features_from_config`]: json driven setup.
//!
//! # Examples
//!
//! ```
//! use vrp_ride_time::prelude::*;
//!
//! // 3x3 matrix with 10 time units between any two different locations
//! let durations = vec![0., 10., 10., 10., 0., 10., 10., 10., 0.];
//! let transport = create_matrix_transport_cost(vec![MatrixData::new(0, durations.clone(), durations)])?;
//! let limit = RideTimeLimit::new("shipment1", 600., transport)?;
//!
//! let feature = create_ride_time_feature("ride_time", ViolationCode(1), limit, &Environment::default())?;
//! let goal = GoalContext::new(&[feature])?;
//! # Ok::<(), GenericError>(())
//! ```

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
#[allow(missing_docs)]
pub mod helpers;

#[macro_use]
pub(crate) mod macros;

pub mod config;
pub mod construction;
pub mod models;
pub mod prelude;
pub mod utils;
