// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for units, nutrition presets, limits, and endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single large file.

/// Serving unit gram multipliers and quantity stepping
pub mod units;

/// Macro presets, energy densities, and portion fallbacks
pub mod nutrition;

/// REST endpoint paths consumed by the HTTP backend
pub mod endpoints;

/// Validation ranges and client defaults
pub mod limits {
    /// Lowest weight accepted by the weight log (kg)
    pub const MIN_LOGGED_WEIGHT_KG: f64 = 30.0;
    /// Highest weight accepted by the weight log (kg)
    pub const MAX_LOGGED_WEIGHT_KG: f64 = 300.0;
    /// Custom macro percentages may deviate from 100 by this much
    pub const MACRO_SUM_TOLERANCE: u16 = 1;
    /// Calorie budget used when neither goal nor profile supplies one
    pub const DEFAULT_CALORIE_GOAL: u32 = 2000;
    /// Minimum characters before a search request is issued
    pub const SEARCH_MIN_QUERY_LEN: usize = 2;
    /// Debounce quantum between the last keystroke and the search request
    pub const SEARCH_DEBOUNCE_MS: u64 = 300;
    /// Days of weight history requested by default
    pub const WEIGHT_HISTORY_DAYS: u32 = 30;
    /// Notifications fetched per inbox refresh
    pub const NOTIFICATION_LIMIT: u32 = 20;
    /// Unread badge shows this text above 99
    pub const UNREAD_BADGE_OVERFLOW: &str = "99+";
    /// Weight goals default their target date this many months ahead
    pub const DEFAULT_GOAL_HORIZON_MONTHS: u32 = 3;
}

/// Energy balance constants
pub mod energy {
    /// Kilocalories in one kilogram of body weight
    pub const KCAL_PER_KG_BODY_WEIGHT: f64 = 7700.0;
    /// Lowest daily calorie target produced for a weight goal
    pub const MIN_DAILY_CALORIES: f64 = 1200.0;
    /// Highest daily calorie target produced for a weight goal
    pub const MAX_DAILY_CALORIES: f64 = 4000.0;
    /// Mifflin-St Jeor weight coefficient
    pub const BMR_WEIGHT_COEF: f64 = 10.0;
    /// Mifflin-St Jeor height coefficient
    pub const BMR_HEIGHT_COEF: f64 = 6.25;
    /// Mifflin-St Jeor age coefficient
    pub const BMR_AGE_COEF: f64 = 5.0;
    /// Mifflin-St Jeor male offset
    pub const BMR_MALE_OFFSET: f64 = 5.0;
    /// Mifflin-St Jeor female offset
    pub const BMR_FEMALE_OFFSET: f64 = -161.0;
}
