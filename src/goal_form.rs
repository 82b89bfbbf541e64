// ABOUTME: Goal-setting form modelled as an explicit state machine
// ABOUTME: Idle, type selected, validated, submitted; invalid input never reaches the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Goal Form
//!
//! ```text
//! Idle --select_type--> TypeSelected --validate--> Validated --submit--> Submitted
//!                           ^                          |
//!                           +------- any edit ---------+
//! ```
//!
//! Validation failures leave the form in `TypeSelected` and are returned to
//! the caller synchronously; no request is made.

use chrono::{Months, NaiveDate};
use tracing::info;

use crate::constants::limits::DEFAULT_GOAL_HORIZON_MONTHS;
use crate::errors::{AppError, AppResult};
use crate::models::{GoalRequest, GoalType};
use crate::providers::core::GoalStore;

/// Position of the form in its lifecycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GoalFormState {
    /// No goal type chosen
    #[default]
    Idle,
    /// A goal type is chosen, inputs are being edited
    TypeSelected(GoalType),
    /// Inputs passed validation
    Validated(GoalRequest),
    /// The store accepted the goal
    Submitted {
        /// Goal that was stored
        request: GoalRequest,
        /// Daily calorie target the store derived
        daily_calorie_target: Option<u32>,
    },
}

/// Goal-setting form
#[derive(Debug, Clone, Default)]
pub struct GoalForm {
    state: GoalFormState,
    target_weight: String,
    target_date: Option<NaiveDate>,
    custom_calories: String,
}

impl GoalForm {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &GoalFormState {
        &self.state
    }

    /// Chosen goal type, if any
    #[must_use]
    pub const fn goal_type(&self) -> Option<GoalType> {
        match &self.state {
            GoalFormState::Idle => None,
            GoalFormState::TypeSelected(goal_type) => Some(*goal_type),
            GoalFormState::Validated(request) | GoalFormState::Submitted { request, .. } => {
                Some(request.goal_type)
            }
        }
    }

    /// Target date input
    #[must_use]
    pub const fn target_date(&self) -> Option<NaiveDate> {
        self.target_date
    }

    /// Choose a goal type
    ///
    /// Weight goals get a target date three months after `today` when none
    /// has been entered.
    pub fn select_type(&mut self, goal_type: GoalType, today: NaiveDate) {
        if goal_type.is_weight_goal() && self.target_date.is_none() {
            self.target_date = today.checked_add_months(Months::new(DEFAULT_GOAL_HORIZON_MONTHS));
        }
        self.state = GoalFormState::TypeSelected(goal_type);
    }

    /// Set the target weight text
    pub fn set_target_weight(&mut self, input: &str) {
        input.trim().clone_into(&mut self.target_weight);
        self.invalidate();
    }

    /// Set the target date
    pub fn set_target_date(&mut self, date: Option<NaiveDate>) {
        self.target_date = date;
        self.invalidate();
    }

    /// Set the target date from `YYYY-MM-DD` text, anything else clears it
    pub fn set_target_date_input(&mut self, input: &str) {
        self.set_target_date(NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok());
    }

    /// Set the custom daily calories text
    pub fn set_custom_calories(&mut self, input: &str) {
        input.trim().clone_into(&mut self.custom_calories);
        self.invalidate();
    }

    /// Back to `Idle`, clearing all inputs
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn invalidate(&mut self) {
        if let Some(goal_type) = self.goal_type() {
            self.state = GoalFormState::TypeSelected(goal_type);
        }
    }

    /// Check the inputs for the chosen goal type
    ///
    /// Weight goals need a positive target weight and a target date; custom
    /// calorie goals need a positive whole number of calories.
    ///
    /// # Errors
    ///
    /// Returns a validation error when no type is chosen or an input is
    /// missing or invalid; the form stays in `TypeSelected`
    pub fn validate(&mut self) -> AppResult<GoalRequest> {
        let goal_type = self
            .goal_type()
            .ok_or_else(|| AppError::missing_field("goal_type"))?;
        self.state = GoalFormState::TypeSelected(goal_type);

        let request = match goal_type {
            GoalType::WeightLoss | GoalType::WeightGain => {
                let target_weight = parse_positive_weight(&self.target_weight)?;
                let target_date = self
                    .target_date
                    .ok_or_else(|| AppError::missing_field("target_date"))?;
                GoalRequest {
                    goal_type,
                    target_weight: Some(target_weight),
                    target_date: Some(target_date),
                    custom_calories: None,
                }
            }
            GoalType::CustomCalories => GoalRequest {
                goal_type,
                target_weight: None,
                target_date: None,
                custom_calories: Some(parse_calories(&self.custom_calories)?),
            },
            GoalType::Maintain => GoalRequest {
                goal_type,
                target_weight: None,
                target_date: None,
                custom_calories: None,
            },
        };

        self.state = GoalFormState::Validated(request.clone());
        Ok(request)
    }

    /// Validate and store the goal
    ///
    /// Returns the daily calorie target derived by the store.
    ///
    /// # Errors
    ///
    /// Returns a validation error without contacting the store, or the
    /// store's error, in which case the form stays `Validated`
    pub async fn submit(&mut self, store: &dyn GoalStore) -> AppResult<Option<u32>> {
        let request = self.validate()?;
        let daily_calorie_target = store.set_goal(&request).await?;
        info!(
            goal_type = %request.goal_type,
            daily_calorie_target = ?daily_calorie_target,
            "Goal saved"
        );
        self.state = GoalFormState::Submitted {
            request,
            daily_calorie_target,
        };
        Ok(daily_calorie_target)
    }
}

fn parse_positive_weight(input: &str) -> AppResult<f64> {
    if input.is_empty() {
        return Err(AppError::missing_field("target_weight"));
    }
    match input.replace(',', ".").parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight > 0.0 => Ok(weight),
        _ => Err(AppError::invalid_input(format!(
            "Target weight must be a positive number, got '{input}'"
        ))
        .with_resource_id("target_weight")),
    }
}

fn parse_calories(input: &str) -> AppResult<u32> {
    if input.is_empty() {
        return Err(AppError::missing_field("custom_calories"));
    }
    match input.parse::<u32>() {
        Ok(calories) if calories > 0 => Ok(calories),
        _ => Err(AppError::invalid_input(format!(
            "Daily calories must be a positive whole number, got '{input}'"
        ))
        .with_resource_id("custom_calories")),
    }
}
