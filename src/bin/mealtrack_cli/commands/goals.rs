// ABOUTME: Goal, weight, and macro target commands for mealtrack-cli
// ABOUTME: Evaluates goal progress and prints gram targets for a calorie budget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use mealtrack::intelligence::macro_distribution::preset_distribution;
use mealtrack::intelligence::{distribution_for, targets_for};
use mealtrack::models::MacroPreset;
use mealtrack::profile::ProfileSettings;
use mealtrack::session::Session;
use tracing::warn;

use crate::helpers::display::{display_goal_status, display_targets};

/// Print macro targets for `budget` and `preset`
///
/// Missing arguments come from the goal and profile in effect.
pub async fn targets(session: &mut Session, budget: Option<u32>, preset: Option<&str>) -> Result<()> {
    if budget.is_none() {
        if let Err(e) = session.refresh_goal().await {
            warn!(error = %e, "Goal status unavailable, using default budget");
        }
    }
    let budget = budget.unwrap_or_else(|| session.calorie_budget());
    let distribution = preset.map_or_else(
        || distribution_for(session.profile()),
        |name| preset_distribution(MacroPreset::from_str_lossy(name)),
    );
    display_targets(budget, &targets_for(budget, distribution));
    if let Some(estimate) = session
        .profile()
        .and_then(|profile| ProfileSettings::from_profile(profile).energy_estimate())
    {
        println!(
            "Estimated BMR {:.0} kcal, TDEE {:.0} kcal",
            estimate.bmr, estimate.tdee
        );
    }
    Ok(())
}

/// Print the evaluated goal
pub async fn status(session: &mut Session) -> Result<()> {
    session.refresh_goal().await?;
    match session.goal_status() {
        Some(status) => display_goal_status(status),
        None => println!("No goal set"),
    }
    Ok(())
}

/// Log today's weight and print the updated goal
pub async fn log_weight(session: &mut Session, kg: f64) -> Result<()> {
    session.log_weight(kg).await?;
    println!("Logged {kg:.1} kg for {}", session.today());
    if let Some(status) = session.goal_status() {
        display_goal_status(status);
    }
    Ok(())
}
