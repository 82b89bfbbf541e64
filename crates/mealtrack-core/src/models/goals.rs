// ABOUTME: Goal and body weight models for progress tracking
// ABOUTME: GoalType, Goal, GoalRequest, WeightLog, ProjectedWeight, and GoalStatus
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of goal the user is pursuing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Lose weight by a target date
    WeightLoss,
    /// Gain weight by a target date
    WeightGain,
    /// Keep the current weight
    Maintain,
    /// Follow a fixed daily calorie budget
    CustomCalories,
}

impl GoalType {
    /// Goals that track a target weight and date
    #[must_use]
    pub const fn is_weight_goal(self) -> bool {
        matches!(self, Self::WeightLoss | Self::WeightGain)
    }

    /// Snake case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::WeightGain => "weight_gain",
            Self::Maintain => "maintain",
            Self::CustomCalories => "custom_calories",
        }
    }

    /// Parse a goal type name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "weight_loss" => Some(Self::WeightLoss),
            "weight_gain" => Some(Self::WeightGain),
            "maintain" => Some(Self::Maintain),
            "custom_calories" => Some(Self::CustomCalories),
            _ => None,
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored goal parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal kind
    pub goal_type: GoalType,
    /// Body weight when the goal was set (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_weight: Option<f64>,
    /// Desired body weight (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    /// Date the target should be reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    /// Date the goal was set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDate>,
    /// Daily calorie budget derived from the goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_calorie_target: Option<u32>,
}

/// Validated goal payload sent to the goal store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRequest {
    /// Goal kind
    pub goal_type: GoalType,
    /// Target weight (weight goals only)
    pub target_weight: Option<f64>,
    /// Target date (weight goals only)
    pub target_date: Option<NaiveDate>,
    /// Daily calories (custom calorie goals only)
    pub custom_calories: Option<u32>,
}

/// One logged body weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLog {
    /// Weight in kg
    pub weight: f64,
    /// Day of the measurement
    pub date: NaiveDate,
    /// Optional note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Expected weight on a day if progress toward the target were linear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedWeight {
    /// Day
    pub date: NaiveDate,
    /// Projected weight in kg, one decimal
    pub weight: f64,
}

/// Read-only snapshot of goal progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalStatus {
    /// Goal kind
    pub goal_type: GoalType,
    /// Desired body weight (kg)
    pub target_weight: Option<f64>,
    /// Date the target should be reached
    pub target_date: Option<NaiveDate>,
    /// Body weight when the goal was set (kg)
    pub start_weight: Option<f64>,
    /// Most recent logged weight (kg)
    pub current_weight: Option<f64>,
    /// Completion in `0..=100`, one decimal
    pub progress_percent: Option<f64>,
    /// Whole days until the target date, never negative
    pub days_remaining: Option<i64>,
    /// Current minus start weight (kg)
    pub weight_change: Option<f64>,
    /// Target minus current weight (kg)
    pub weight_remaining: Option<f64>,
    /// Daily calorie budget the goal imposes
    pub daily_calorie_target: Option<u32>,
}

impl GoalStatus {
    /// Whether a weight progress bar should be displayed
    #[must_use]
    pub const fn shows_progress(&self) -> bool {
        self.goal_type.is_weight_goal() && self.progress_percent.is_some()
    }
}
