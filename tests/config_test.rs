// ABOUTME: Tests for environment-driven client and logging configuration
// ABOUTME: Validates defaults, overrides, base URL normalization, and rejection of bad values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use mealtrack::config::environment::{parse_base_url, vars, DEFAULT_API_URL};
use mealtrack::config::ClientConfig;
use mealtrack::errors::ErrorCode;
use mealtrack::ledger::AddFailurePolicy;
use mealtrack::logging::{LogFormat, LoggingConfig};
use serial_test::serial;

const ALL_VARS: [&str; 8] = [
    vars::API_URL,
    vars::HTTP_TIMEOUT_SECS,
    vars::SEARCH_DEBOUNCE_MS,
    vars::SEARCH_MIN_QUERY_LEN,
    vars::WEIGHT_HISTORY_DAYS,
    vars::NOTIFICATION_LIMIT,
    vars::DEFAULT_CALORIE_GOAL,
    vars::ADD_FAILURE_POLICY,
];

fn clear_env() {
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

// ============================================================================
// Client configuration
// ============================================================================

#[test]
fn test_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.api_base_url, DEFAULT_API_URL);
    assert_eq!(config.search_debounce(), Duration::from_millis(300));
    assert_eq!(config.search_min_query_len, 2);
    assert_eq!(config.weight_history_days, 30);
    assert_eq!(config.notification_limit, 20);
    assert_eq!(config.default_calorie_goal, 2000);
    assert_eq!(config.add_failure_policy, AddFailurePolicy::KeepOptimistic);
}

#[test]
#[serial]
fn test_from_env_without_variables_matches_defaults() {
    clear_env();
    let config = ClientConfig::from_env().unwrap();
    let defaults = ClientConfig::default();
    assert_eq!(config.api_base_url, defaults.api_base_url);
    assert_eq!(config.request_timeout(), defaults.request_timeout());
    assert_eq!(config.default_calorie_goal, defaults.default_calorie_goal);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    env::set_var(vars::API_URL, "https://nutrition.example.org/api");
    env::set_var(vars::HTTP_TIMEOUT_SECS, "25");
    env::set_var(vars::SEARCH_DEBOUNCE_MS, " 150 ");
    env::set_var(vars::SEARCH_MIN_QUERY_LEN, "3");
    env::set_var(vars::WEIGHT_HISTORY_DAYS, "90");
    env::set_var(vars::NOTIFICATION_LIMIT, "50");
    env::set_var(vars::DEFAULT_CALORIE_GOAL, "1800");
    env::set_var(vars::ADD_FAILURE_POLICY, "Rollback");

    let config = ClientConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.api_base_url, "https://nutrition.example.org/api/");
    assert_eq!(config.request_timeout(), Duration::from_secs(25));
    assert_eq!(config.search_debounce(), Duration::from_millis(150));
    assert_eq!(config.search_min_query_len, 3);
    assert_eq!(config.weight_history_days, 90);
    assert_eq!(config.notification_limit, 50);
    assert_eq!(config.default_calorie_goal, 1800);
    assert_eq!(config.add_failure_policy, AddFailurePolicy::Rollback);
}

#[test]
#[serial]
fn test_unparseable_value_is_config_error() {
    clear_env();
    env::set_var(vars::DEFAULT_CALORIE_GOAL, "lots");
    let error = ClientConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.to_string().contains(vars::DEFAULT_CALORIE_GOAL));
}

#[test]
#[serial]
fn test_bad_api_url_is_config_error() {
    clear_env();
    env::set_var(vars::API_URL, "ftp://files.example.org");
    let error = ClientConfig::from_env().unwrap_err();
    clear_env();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_base_url_normalization() {
    assert_eq!(
        parse_base_url("http://localhost:5000").unwrap(),
        "http://localhost:5000/"
    );
    assert_eq!(
        parse_base_url(" https://example.org/app/ ").unwrap(),
        "https://example.org/app/"
    );
    assert!(parse_base_url("not a url").is_err());
    assert!(parse_base_url("ftp://example.org").is_err());
}

#[test]
fn test_failure_policy_names() {
    assert_eq!(
        AddFailurePolicy::from_str_lossy("rollback"),
        AddFailurePolicy::Rollback
    );
    assert_eq!(
        AddFailurePolicy::from_str_lossy(" UNDO "),
        AddFailurePolicy::Rollback
    );
    assert_eq!(
        AddFailurePolicy::from_str_lossy("keep"),
        AddFailurePolicy::KeepOptimistic
    );
    assert_eq!(
        AddFailurePolicy::from_str_lossy(""),
        AddFailurePolicy::KeepOptimistic
    );
}

// ============================================================================
// Logging configuration
// ============================================================================

#[test]
fn test_log_format_names() {
    assert!(matches!(LogFormat::from_str_lossy("json"), LogFormat::Json));
    assert!(matches!(LogFormat::from_str_lossy("Pretty"), LogFormat::Pretty));
    assert!(matches!(LogFormat::from_str_lossy("anything"), LogFormat::Compact));
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("LOG_INCLUDE_LOCATION", "1");
    env::set_var("SERVICE_NAME", "mealtrack-test");

    let config = LoggingConfig::from_env();

    env::remove_var("RUST_LOG");
    env::remove_var("LOG_FORMAT");
    env::remove_var("LOG_INCLUDE_LOCATION");
    env::remove_var("SERVICE_NAME");

    assert_eq!(config.level, "debug");
    assert!(matches!(config.format, LogFormat::Json));
    assert!(config.include_location);
    assert_eq!(config.service_name, "mealtrack-test");
}

#[test]
#[serial]
fn test_logging_defaults() {
    env::remove_var("RUST_LOG");
    env::remove_var("LOG_FORMAT");
    env::remove_var("LOG_INCLUDE_LOCATION");
    env::remove_var("SERVICE_NAME");

    let config = LoggingConfig::from_env();
    assert_eq!(config.level, "info");
    assert!(matches!(config.format, LogFormat::Compact));
    assert!(!config.include_location);
    assert_eq!(config.service_name, "mealtrack");
}
