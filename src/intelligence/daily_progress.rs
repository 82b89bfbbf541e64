// ABOUTME: Calorie and macro progress of the active day against its budget
// ABOUTME: Remaining calories, capped percentages, and over-budget excess
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;

use crate::intelligence::macro_distribution::{MacroTarget, MacroTargets};
use crate::models::{GoalStatus, NutritionFacts, UserProfile};

/// `consumed / target` as a percentage capped at 100, 0 for a zero target
fn capped_percent(consumed: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (consumed / target * 100.0).min(100.0)
}

/// Daily calorie budget in effect
///
/// The goal's calorie target wins, then the profile goal, then `fallback`.
#[must_use]
pub fn effective_calorie_budget(
    goal_status: Option<&GoalStatus>,
    profile: Option<&UserProfile>,
    fallback: u32,
) -> u32 {
    goal_status
        .and_then(|status| status.daily_calorie_target)
        .or_else(|| profile.and_then(|p| p.daily_calorie_goal))
        .filter(|budget| *budget > 0)
        .unwrap_or(fallback)
}

/// Progress of one macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroProgress {
    /// Grams eaten so far
    pub consumed: f64,
    /// Target grams
    pub target: u32,
    /// Percent of target, capped at 100
    pub percent: f64,
}

impl MacroProgress {
    fn new(consumed: f64, target: MacroTarget) -> Self {
        Self {
            consumed,
            target: target.grams,
            percent: capped_percent(consumed, f64::from(target.grams)),
        }
    }
}

/// Dashboard figures for the active day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyProgress {
    /// Calories eaten
    pub consumed: f64,
    /// Calorie budget
    pub budget: u32,
    /// Calories left, never negative
    pub remaining: f64,
    /// Percent of budget, capped at 100
    pub percent: f64,
    /// Budget exceeded
    pub over_budget: bool,
    /// Calories above budget, 0 when within budget
    pub excess: f64,
    /// Carbohydrate progress
    pub carbs: MacroProgress,
    /// Protein progress
    pub protein: MacroProgress,
    /// Fat progress
    pub fat: MacroProgress,
}

impl DailyProgress {
    /// Compare the day's totals with the budget and macro targets
    #[must_use]
    pub fn compute(totals: &NutritionFacts, budget: u32, targets: &MacroTargets) -> Self {
        let budget_kcal = f64::from(budget);
        let over_budget = totals.calories > budget_kcal;
        Self {
            consumed: totals.calories,
            budget,
            remaining: (budget_kcal - totals.calories).max(0.0),
            percent: capped_percent(totals.calories, budget_kcal),
            over_budget,
            excess: if over_budget {
                totals.calories - budget_kcal
            } else {
                0.0
            },
            carbs: MacroProgress::new(totals.carbs, targets.carbs),
            protein: MacroProgress::new(totals.protein, targets.protein),
            fat: MacroProgress::new(totals.fat, targets.fat),
        }
    }
}
