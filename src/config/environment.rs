// ABOUTME: Environment configuration for the backend connection and client behavior
// ABOUTME: Parses MEALTRACK_* variables into a typed ClientConfig with documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based client configuration

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::ledger::AddFailurePolicy;

/// Default backend root
pub const DEFAULT_API_URL: &str = "http://localhost:5000/";

/// Default HTTP timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Environment variable names
pub mod vars {
    /// Backend root URL
    pub const API_URL: &str = "MEALTRACK_API_URL";
    /// HTTP request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "MEALTRACK_HTTP_TIMEOUT_SECS";
    /// Search debounce in milliseconds
    pub const SEARCH_DEBOUNCE_MS: &str = "MEALTRACK_SEARCH_DEBOUNCE_MS";
    /// Minimum search query length
    pub const SEARCH_MIN_QUERY_LEN: &str = "MEALTRACK_SEARCH_MIN_QUERY_LEN";
    /// Days of weight history to load
    pub const WEIGHT_HISTORY_DAYS: &str = "MEALTRACK_WEIGHT_HISTORY_DAYS";
    /// Notifications per inbox load
    pub const NOTIFICATION_LIMIT: &str = "MEALTRACK_NOTIFICATION_LIMIT";
    /// Calorie budget used without goal or profile
    pub const DEFAULT_CALORIE_GOAL: &str = "MEALTRACK_DEFAULT_CALORIE_GOAL";
    /// `keep` or `rollback`
    pub const ADD_FAILURE_POLICY: &str = "MEALTRACK_ADD_FAILURE_POLICY";
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend root, always ends with `/`
    pub api_base_url: String,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Delay before a typed query is searched
    pub search_debounce_ms: u64,
    /// Shorter queries hide results instead of searching
    pub search_min_query_len: usize,
    /// Days of weight history to load
    pub weight_history_days: u32,
    /// Notifications per inbox load
    pub notification_limit: u32,
    /// Calorie budget used when neither goal nor profile set one
    pub default_calorie_goal: u32,
    /// Handling of adds that fail to persist
    pub add_failure_policy: AddFailurePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            request_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            search_debounce_ms: limits::SEARCH_DEBOUNCE_MS,
            search_min_query_len: limits::SEARCH_MIN_QUERY_LEN,
            weight_history_days: limits::WEIGHT_HISTORY_DAYS,
            notification_limit: limits::NOTIFICATION_LIMIT,
            default_calorie_goal: limits::DEFAULT_CALORIE_GOAL,
            add_failure_policy: AddFailurePolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a variable is set to a value that
    /// does not parse
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            api_base_url: match env::var(vars::API_URL) {
                Ok(raw) => parse_base_url(&raw)?,
                Err(_) => DEFAULT_API_URL.to_owned(),
            },
            request_timeout_secs: env_parse_or(
                vars::HTTP_TIMEOUT_SECS,
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?,
            search_debounce_ms: env_parse_or(vars::SEARCH_DEBOUNCE_MS, limits::SEARCH_DEBOUNCE_MS)?,
            search_min_query_len: env_parse_or(
                vars::SEARCH_MIN_QUERY_LEN,
                limits::SEARCH_MIN_QUERY_LEN,
            )?,
            weight_history_days: env_parse_or(
                vars::WEIGHT_HISTORY_DAYS,
                limits::WEIGHT_HISTORY_DAYS,
            )?,
            notification_limit: env_parse_or(vars::NOTIFICATION_LIMIT, limits::NOTIFICATION_LIMIT)?,
            default_calorie_goal: env_parse_or(
                vars::DEFAULT_CALORIE_GOAL,
                limits::DEFAULT_CALORIE_GOAL,
            )?,
            add_failure_policy: env::var(vars::ADD_FAILURE_POLICY)
                .map(|raw| AddFailurePolicy::from_str_lossy(&raw))
                .unwrap_or_default(),
        };

        info!(
            api_base_url = %config.api_base_url,
            timeout_secs = config.request_timeout_secs,
            debounce_ms = config.search_debounce_ms,
            add_failure_policy = ?config.add_failure_policy,
            "Loaded client configuration from environment"
        );
        Ok(config)
    }

    /// HTTP request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Search debounce delay
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Validate a backend root, appending the trailing slash relative joins need
///
/// # Errors
///
/// Returns a configuration error for malformed or non-HTTP URLs
pub fn parse_base_url(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| AppError::config(format!("Invalid {} value '{raw}': {e}", vars::API_URL)))?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(url.into())
    } else {
        Err(AppError::config(format!(
            "Invalid {} scheme '{}', expected http or https",
            vars::API_URL,
            url.scheme()
        )))
    }
}

fn env_parse_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}
