// ABOUTME: Goal progress evaluator comparing logged weights against a stored goal
// ABOUTME: Percent complete, remaining weight and days, and linear weight projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Duration, NaiveDate};

use crate::intelligence::unit_conversion::round_to;
use crate::models::{Goal, GoalStatus, ProjectedWeight, WeightLog};

/// Most recent weight log by date
///
/// When several logs share the latest date the one listed last wins.
#[must_use]
pub fn latest_weight(logs: &[WeightLog]) -> Option<&WeightLog> {
    logs.iter().max_by_key(|log| log.date)
}

/// Share of the way from `start` to `target` already covered, in `0..=100`
///
/// Returns `None` when start and target coincide. Works for both loss and
/// gain goals because the sign cancels out.
#[must_use]
pub fn progress_percent(start: f64, target: f64, current: f64) -> Option<f64> {
    let total = target - start;
    if total.abs() < f64::EPSILON {
        return None;
    }
    Some(round_to((current - start) / total * 100.0, 1).clamp(0.0, 100.0))
}

/// Evaluate `goal` against the weight history as of `today`
///
/// Weight goals get a progress percentage, weight change figures, and the
/// days left until the target date (never negative). Maintenance and custom
/// calorie goals only carry their calorie budget.
#[must_use]
pub fn evaluate(goal: &Goal, history: &[WeightLog], today: NaiveDate) -> GoalStatus {
    let current_weight = latest_weight(history).map(|log| log.weight);

    let mut status = GoalStatus {
        goal_type: goal.goal_type,
        target_weight: goal.target_weight,
        target_date: goal.target_date,
        start_weight: goal.start_weight,
        current_weight,
        progress_percent: None,
        days_remaining: None,
        weight_change: None,
        weight_remaining: None,
        daily_calorie_target: goal.daily_calorie_target,
    };

    if !goal.goal_type.is_weight_goal() {
        return status;
    }

    status.days_remaining = goal
        .target_date
        .map(|date| (date - today).num_days().max(0));

    if let (Some(start), Some(target), Some(current)) =
        (goal.start_weight, goal.target_weight, current_weight)
    {
        status.progress_percent = progress_percent(start, target, current);
        status.weight_change = Some(round_to(current - start, 1));
        status.weight_remaining = Some(round_to(target - current, 1));
    }

    status
}

/// Linearly interpolated weights from goal creation to the target date
///
/// One point per day, limited to `window_start..=window_end`. Empty unless
/// the goal is a weight goal with start, target, and both dates known.
#[must_use]
pub fn project_weights(
    goal: &Goal,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<ProjectedWeight> {
    if !goal.goal_type.is_weight_goal() {
        return Vec::new();
    }
    let (Some(start_weight), Some(target_weight), Some(created), Some(target_date)) = (
        goal.start_weight,
        goal.target_weight,
        goal.created_date,
        goal.target_date,
    ) else {
        return Vec::new();
    };

    let total_days = (target_date - created).num_days();
    if total_days <= 0 {
        return Vec::new();
    }

    let first = created.max(window_start);
    let last = target_date.min(window_end);
    let mut points = Vec::new();
    let mut day = first;
    while day <= last {
        let ratio = (day - created).num_days() as f64 / total_days as f64;
        points.push(ProjectedWeight {
            date: day,
            weight: round_to((target_weight - start_weight).mul_add(ratio, start_weight), 1),
        });
        day += Duration::days(1);
    }
    points
}
