// ABOUTME: REST endpoint paths of the nutrition tracking server
// ABOUTME: Relative to the configured API base URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session login (`email`, `password`)
pub const LOGIN: &str = "login";
/// Food catalog search (`q`, `p`)
pub const SEARCH: &str = "search";
/// Named portions for one food (`id`)
pub const PORTIONS: &str = "portions";
/// Persist one meal row
pub const LOG_MEAL: &str = "log_meal";
/// Delete one meal row
pub const DELETE_MEAL: &str = "delete_meal";
/// All meal rows for a day (`date`)
pub const MEALS_FOR_DATE: &str = "get_meals_for_date";
/// Save a goal
pub const SET_GOAL: &str = "api/set_goal";
/// Log a body weight
pub const LOG_WEIGHT: &str = "api/log_weight";
/// Weight logs plus projection (`days`)
pub const WEIGHT_HISTORY: &str = "api/weight_history";
/// Current goal snapshot
pub const GOAL_STATUS: &str = "api/goal_status";
/// Save profile settings
pub const UPDATE_PROFILE: &str = "api/update_profile";
/// Notification inbox (`limit`)
pub const NOTIFICATIONS: &str = "api/notifications";
/// Mark every notification read
pub const NOTIFICATIONS_READ_ALL: &str = "api/notifications/read_all";

/// Path that marks one notification read
#[must_use]
pub fn notification_read(id: i64) -> String {
    format!("{NOTIFICATIONS}/{id}/read")
}
