//! Ride time configuration.
//!
//! An example of json configuration:
//!
//! ```json
//! {
//!   "violationCode": 21,
//!   "limits": [
//!     { "jobId": "job1", "maxRideTime": 600 },
//!     { "jobId": "job2", "maxRideTime": 900 }
//!   ],
//!   "logging": { "enabled": true, "verbose": false }
//! }
//! ```

#[cfg(test)]
#[path = "../tests/unit/config_test.rs"]
mod config_test;

use crate::construction::features::{RideTimeLimit, create_ride_time_features};
use crate::models::problem::TransportCost;
use crate::models::{Feature, ViolationCode};
use crate::utils::{Environment, GenericError, GenericResult};
use serde::Deserialize;
use std::io::{BufReader, Read};
use std::sync::Arc;

/// A default violation code of ride time constraint.
pub const DEFAULT_RIDE_TIME_CODE: ViolationCode = ViolationCode(21);

/// A prefix of feature names created from config.
pub const RIDE_TIME_FEATURE_PREFIX: &str = "ride_time";

/// A ride time configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RideTimeConfig {
    /// Specifies ride time limits of tracked shipments.
    pub limits: Vec<RideTimeLimitConfig>,
    /// Specifies violation code reported by constraint. Default is 21.
    pub violation_code: Option<i32>,
    /// Specifies logging configuration.
    pub logging: Option<LoggingConfig>,
}

/// A ride time limit of one shipment.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RideTimeLimitConfig {
    /// An id of the tracked shipment.
    pub job_id: String,
    /// Max time the shipment is allowed to spend in vehicle.
    pub max_ride_time: f64,
}

/// A logging configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Specifies whether logging is enabled.
    pub enabled: bool,
    /// Specifies whether diagnostic messages of individual evaluations are logged. Default is false.
    pub verbose: Option<bool>,
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> GenericResult<RideTimeConfig> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'").into())
}

/// Creates ride time features from config, one feature per tracked shipment.
pub fn create_features_from_config(
    config: &RideTimeConfig,
    transport: Arc<dyn TransportCost + Send + Sync>,
    environment: &Environment,
) -> GenericResult<Vec<Feature>> {
    let environment = configure_environment(config.logging.as_ref(), environment);
    let code = config.violation_code.map(ViolationCode).unwrap_or(DEFAULT_RIDE_TIME_CODE);

    let (limits, errors): (Vec<_>, Vec<_>) = config
        .limits
        .iter()
        .map(|limit| RideTimeLimit::new(limit.job_id.as_str(), limit.max_ride_time, transport.clone()))
        .partition(Result::is_ok);

    if !errors.is_empty() {
        let errors = errors.into_iter().filter_map(Result::err).collect::<Vec<_>>();
        return Err(GenericError::join_many(errors.as_slice(), ", ").into());
    }

    let limits = limits.into_iter().filter_map(Result::ok).collect();

    create_ride_time_features(RIDE_TIME_FEATURE_PREFIX, code, limits, &environment)
}

fn configure_environment(logging: Option<&LoggingConfig>, environment: &Environment) -> Environment {
    match logging {
        Some(LoggingConfig { enabled: false, .. }) => Environment::silent(),
        Some(LoggingConfig { enabled: true, verbose }) => {
            Environment::new(environment.logger.clone(), verbose.unwrap_or(environment.is_verbose))
        }
        None => environment.clone(),
    }
}
