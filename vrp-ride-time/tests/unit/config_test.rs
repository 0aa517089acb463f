use super::*;
use crate::construction::heuristics::evaluate_activity_insertion;
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::*;
use crate::models::GoalContext;
use crate::utils::InfoLogger;
use std::sync::Mutex;

fn parse_config(json: &str) -> GenericResult<RideTimeConfig> {
    read_config(BufReader::new(json.as_bytes()))
}

fn create_capturing_environment(is_verbose: bool) -> (Environment, Arc<Mutex<Vec<String>>>) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let logger: InfoLogger = {
        let messages = messages.clone();
        Arc::new(move |msg: &str| messages.lock().unwrap().push(msg.to_string()))
    };

    (Environment::new(logger, is_verbose), messages)
}

#[test]
fn can_read_full_config() {
    let config = parse_config(
        r#"{
          "violationCode": 7,
          "limits": [
            { "jobId": "job1", "maxRideTime": 600 },
            { "jobId": "job2", "maxRideTime": 900.5 }
          ],
          "logging": { "enabled": true, "verbose": true }
        }"#,
    )
    .unwrap();

    assert_eq!(config.violation_code, Some(7));
    assert_eq!(
        config.limits.iter().map(|limit| (limit.job_id.as_str(), limit.max_ride_time)).collect::<Vec<_>>(),
        vec![("job1", 600.), ("job2", 900.5)]
    );
    assert!(config.logging.as_ref().is_some_and(|logging| logging.enabled && logging.verbose == Some(true)));
}

#[test]
fn can_read_minimal_config() {
    let config = parse_config(r#"{ "limits": [] }"#).unwrap();

    assert!(config.limits.is_empty());
    assert!(config.violation_code.is_none());
    assert!(config.logging.is_none());
}

#[test]
fn can_report_malformed_config() {
    let result = parse_config(r#"{ "limits": [ { "jobId": "job1" } ] }"#);

    assert!(result.err().is_some_and(|err| err.to_string().starts_with("cannot deserialize config")));
}

#[test]
fn can_create_features_with_default_violation_code() {
    let config = parse_config(r#"{ "limits": [ { "jobId": "job1", "maxRideTime": 100 } ] }"#).unwrap();
    let features =
        create_features_from_config(&config, TestTransportCost::new_shared(), &Environment::silent()).unwrap();
    let goal = GoalContext::new(features.as_slice()).unwrap();
    let route_ctx = RouteContextBuilder::default()
        .with_route(RouteBuilder::default().add_activity(test_activity(&test_service("other", 1))).build())
        .build();
    let delivery = delivery_activity(&test_shipment("job1", 10, 20));

    let result = evaluate_activity_insertion(&goal, &route_ctx, &delivery, 2).unwrap();

    assert_eq!(features.iter().map(|feature| feature.name.as_str()).collect::<Vec<_>>(), vec!["ride_time_job1"]);
    assert_eq!(result.map(|violation| violation.code), Some(DEFAULT_RIDE_TIME_CODE));
}

#[test]
fn can_collect_all_invalid_limits() {
    let config = parse_config(
        r#"{ "limits": [
            { "jobId": "job1", "maxRideTime": 0 },
            { "jobId": "job2", "maxRideTime": 10 },
            { "jobId": "job3", "maxRideTime": -5 }
        ] }"#,
    )
    .unwrap();

    let result = create_features_from_config(&config, TestTransportCost::new_shared(), &Environment::silent());

    assert_eq!(
        result.err().map(|err| err.to_string()),
        Some("max ride time of 'job1' must be positive, got: 0, max ride time of 'job3' must be positive, got: -5".to_string())
    );
}

#[test]
fn can_reject_duplicate_job_ids() {
    let config = parse_config(
        r#"{ "limits": [ { "jobId": "job1", "maxRideTime": 10 }, { "jobId": "job1", "maxRideTime": 20 } ] }"#,
    )
    .unwrap();

    let result = create_features_from_config(&config, TestTransportCost::new_shared(), &Environment::silent());

    assert_eq!(
        result.err().map(|err| err.to_string()),
        Some("ride time limit is defined more than once for 'job1'".to_string())
    );
}

parameterized_test! {can_configure_environment, (logging, is_verbose, expected), {
    can_configure_environment_impl(logging, is_verbose, expected);
}}

can_configure_environment! {
    case01_no_logging_config: (None, true, (1, true)),
    case02_disabled: (Some(LoggingConfig { enabled: false, verbose: Some(true) }), true, (0, false)),
    case03_enabled_inherits_verbose: (Some(LoggingConfig { enabled: true, verbose: None }), true, (1, true)),
    case04_enabled_overrides_verbose: (Some(LoggingConfig { enabled: true, verbose: Some(false) }), true, (1, false)),
}

fn can_configure_environment_impl(logging: Option<LoggingConfig>, is_verbose: bool, expected: (usize, bool)) {
    let (environment, messages) = create_capturing_environment(is_verbose);

    let environment = configure_environment(logging.as_ref(), &environment);
    (environment.logger)("message");

    assert_eq!((messages.lock().unwrap().len(), environment.is_verbose), expected);
}
