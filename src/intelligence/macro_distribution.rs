// ABOUTME: Macro distribution resolver for the daily calorie budget
// ABOUTME: Maps a profile's preset or custom split to per-macro gram targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Macro Distribution Resolver
//!
//! Converts the macro preset stored on the profile into percentages, and the
//! percentages into gram targets for a calorie budget. Carbohydrate and
//! protein use 4 kcal/g, fat uses 9 kcal/g. Each gram target is rounded
//! independently, so the targets do not necessarily add back up to the
//! budget exactly.

use serde::{Deserialize, Serialize};

use crate::constants::limits::MACRO_SUM_TOLERANCE;
use crate::constants::nutrition::{presets, KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use crate::errors::{AppError, AppResult};
use crate::models::{MacroDistribution, MacroPreset, UserProfile};

/// Gram target and calorie share of one macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTarget {
    /// Target grams, rounded to the nearest gram
    pub grams: u32,
    /// Share of the calorie budget (%)
    pub percent: u8,
}

/// Gram targets for all three macronutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Carbohydrates
    pub carbs: MacroTarget,
    /// Protein
    pub protein: MacroTarget,
    /// Fat
    pub fat: MacroTarget,
}

/// Fixed split for a named preset
///
/// `Custom` has no fixed split and resolves to the balanced fallback here;
/// use [`distribution_for`] to honour a profile's stored percentages.
#[must_use]
pub const fn preset_distribution(preset: MacroPreset) -> MacroDistribution {
    let split = match preset {
        MacroPreset::Balanced | MacroPreset::Custom => presets::BALANCED,
        MacroPreset::LowCarb => presets::LOW_CARB,
        MacroPreset::HighProtein => presets::HIGH_PROTEIN,
        MacroPreset::Keto => presets::KETO,
        MacroPreset::Mediterranean => presets::MEDITERRANEAN,
    };
    MacroDistribution::from_tuple(split)
}

/// Macro split the user should follow
///
/// Without a profile the balanced split applies. A custom preset uses the
/// stored percentages, substituting the balanced value for any that are
/// missing. A stored 0 is kept as 0.
#[must_use]
pub fn distribution_for(profile: Option<&UserProfile>) -> MacroDistribution {
    let Some(profile) = profile else {
        return preset_distribution(MacroPreset::Balanced);
    };

    match profile.preset() {
        MacroPreset::Custom => {
            let (carbs, protein, fat) = presets::BALANCED;
            MacroDistribution::new(
                profile.custom_carbs_pct.unwrap_or(carbs),
                profile.custom_protein_pct.unwrap_or(protein),
                profile.custom_fat_pct.unwrap_or(fat),
            )
        }
        preset => preset_distribution(preset),
    }
}

/// Check that a custom split sums to 100 within a 1 point tolerance
///
/// # Errors
///
/// Returns `ValueOutOfRange` when the shares sum to less than 99 or more than 101
pub fn validate_distribution(distribution: MacroDistribution) -> AppResult<MacroDistribution> {
    let total = distribution.total();
    if total.abs_diff(100) > MACRO_SUM_TOLERANCE {
        return Err(AppError::value_out_of_range(format!(
            "Macro percentages must add up to 100% (currently {total}%)"
        ))
        .with_resource_id("macro_distribution"));
    }
    Ok(distribution)
}

fn target(calorie_budget: u32, percent: u8, kcal_per_gram: f64) -> MacroTarget {
    let calories = f64::from(calorie_budget) * f64::from(percent) / 100.0;
    MacroTarget {
        grams: (calories / kcal_per_gram).round() as u32,
        percent,
    }
}

/// Gram targets for `calorie_budget` under `distribution`
#[must_use]
pub fn targets_for(calorie_budget: u32, distribution: MacroDistribution) -> MacroTargets {
    MacroTargets {
        carbs: target(calorie_budget, distribution.carbs_pct, KCAL_PER_G_CARBS),
        protein: target(calorie_budget, distribution.protein_pct, KCAL_PER_G_PROTEIN),
        fat: target(calorie_budget, distribution.fat_pct, KCAL_PER_G_FAT),
    }
}
