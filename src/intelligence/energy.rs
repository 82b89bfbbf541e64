// ABOUTME: Energy expenditure estimates backing the goal calorie budget
// ABOUTME: Mifflin-St Jeor BMR, activity-scaled TDEE, and goal-paced daily calories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Energy expenditure
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>

use chrono::NaiveDate;

use crate::constants::energy::{
    BMR_AGE_COEF, BMR_FEMALE_OFFSET, BMR_HEIGHT_COEF, BMR_MALE_OFFSET, BMR_WEIGHT_COEF,
    KCAL_PER_KG_BODY_WEIGHT, MAX_DAILY_CALORIES, MIN_DAILY_CALORIES,
};
use crate::errors::{AppError, AppResult};
use crate::intelligence::unit_conversion::round_to;
use crate::models::{ActivityLevel, Gender, UserProfile};

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + offset,
/// with +5 for men and -161 otherwise. Rounded to one decimal.
///
/// # Errors
///
/// Returns an error if any input is zero or negative
pub fn basal_metabolic_rate(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
) -> AppResult<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 || age == 0 {
        return Err(AppError::invalid_input(
            "Weight, height, and age are required for BMR",
        ));
    }

    let offset = match gender {
        Gender::Male => BMR_MALE_OFFSET,
        Gender::Female => BMR_FEMALE_OFFSET,
    };
    let bmr = BMR_WEIGHT_COEF.mul_add(
        weight_kg,
        BMR_HEIGHT_COEF.mul_add(height_cm, BMR_AGE_COEF.mul_add(-f64::from(age), offset)),
    );
    Ok(round_to(bmr, 1))
}

/// Total Daily Energy Expenditure, rounded to one decimal
#[must_use]
pub fn total_daily_energy_expenditure(bmr: f64, level: ActivityLevel) -> f64 {
    round_to(bmr * level.multiplier(), 1)
}

/// TDEE derived from the profile, if it has weight, height, and age
///
/// A missing gender uses the female offset, a missing activity level is moderate.
#[must_use]
pub fn tdee_for_profile(profile: &UserProfile) -> Option<f64> {
    let bmr = basal_metabolic_rate(
        profile.weight_kg?,
        profile.height_cm?,
        profile.age?,
        profile.gender.unwrap_or(Gender::Female),
    )
    .ok()?;
    Some(total_daily_energy_expenditure(
        bmr,
        profile.activity_level.unwrap_or_default(),
    ))
}

/// Daily calories that reach `target_kg` from `current_kg` by `target_date`
///
/// The energy difference is spread evenly over the days from `start` to the
/// target date (7700 kcal per kg) and the result is clamped to 1200..=4000.
/// When the target date is not after `start` the TDEE is returned.
#[must_use]
pub fn daily_calories_for_goal(
    current_kg: f64,
    target_kg: f64,
    target_date: NaiveDate,
    tdee: f64,
    start: NaiveDate,
) -> u32 {
    let days = (target_date - start).num_days();
    if days <= 0 {
        return tdee.round().max(0.0) as u32;
    }

    let daily_change = (target_kg - current_kg) * KCAL_PER_KG_BODY_WEIGHT / days as f64;
    (tdee + daily_change)
        .clamp(MIN_DAILY_CALORIES, MAX_DAILY_CALORIES)
        .round() as u32
}
