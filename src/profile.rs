// ABOUTME: Profile settings editing with validation before anything is sent
// ABOUTME: Prefills defaults, builds the update payload, and previews energy needs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::limits::DEFAULT_CALORIE_GOAL;
use crate::constants::nutrition::presets;
use crate::errors::AppResult;
use crate::intelligence::energy::{basal_metabolic_rate, total_daily_energy_expenditure};
use crate::intelligence::macro_distribution::validate_distribution;
use crate::models::{ActivityLevel, Gender, MacroDistribution, MacroPreset, UserProfile};

/// Resting and total daily energy expenditure for the entered measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyEstimate {
    /// Basal metabolic rate (kcal)
    pub bmr: f64,
    /// BMR scaled by the activity level (kcal)
    pub tdee: f64,
}

/// Editable profile settings
///
/// Body measurements that are missing or not positive are sent as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Height in cm
    pub height_cm: Option<f64>,
    /// Weight in kg
    pub weight_kg: Option<f64>,
    /// Age in years
    pub age: Option<u32>,
    /// Sex for BMR
    pub gender: Option<Gender>,
    /// Daily calorie goal, 0 means the default
    pub daily_calorie_goal: u32,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Macro preset
    pub macro_preset: MacroPreset,
    /// Custom split, used when the preset is `Custom`
    pub custom_split: MacroDistribution,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            height_cm: None,
            weight_kg: None,
            age: None,
            gender: None,
            daily_calorie_goal: DEFAULT_CALORIE_GOAL,
            activity_level: ActivityLevel::default(),
            macro_preset: MacroPreset::default(),
            custom_split: MacroDistribution::from_tuple(presets::BALANCED),
        }
    }
}

impl ProfileSettings {
    /// Settings prefilled from `profile`, defaults where it has no value
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        let (carbs, protein, fat) = presets::BALANCED;
        Self {
            first_name: profile.first_name.clone().unwrap_or_default(),
            last_name: profile.last_name.clone().unwrap_or_default(),
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            age: profile.age,
            gender: profile.gender,
            daily_calorie_goal: profile
                .daily_calorie_goal
                .filter(|goal| *goal > 0)
                .unwrap_or(DEFAULT_CALORIE_GOAL),
            activity_level: profile.activity_level.unwrap_or_default(),
            macro_preset: profile.preset(),
            custom_split: MacroDistribution::new(
                nonzero_or(profile.custom_carbs_pct, carbs),
                nonzero_or(profile.custom_protein_pct, protein),
                nonzero_or(profile.custom_fat_pct, fat),
            ),
        }
    }

    /// Validate and build the profile sent to the store
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when the preset is custom and the split does
    /// not sum to 100 within 1 point
    pub fn to_update(&self, base: &UserProfile) -> AppResult<UserProfile> {
        if self.macro_preset == MacroPreset::Custom {
            validate_distribution(self.custom_split)?;
        }
        let (carbs, protein, fat) = presets::BALANCED;

        Ok(UserProfile {
            first_name: Some(self.first_name.trim().to_owned()),
            last_name: Some(self.last_name.trim().to_owned()),
            height_cm: self.height_cm.filter(|v| v.is_finite() && *v > 0.0),
            weight_kg: self.weight_kg.filter(|v| v.is_finite() && *v > 0.0),
            age: self.age.filter(|v| *v > 0),
            gender: self.gender,
            activity_level: Some(self.activity_level),
            daily_calorie_goal: Some(if self.daily_calorie_goal == 0 {
                DEFAULT_CALORIE_GOAL
            } else {
                self.daily_calorie_goal
            }),
            macro_preset: Some(self.macro_preset),
            custom_carbs_pct: Some(nonzero_or(Some(self.custom_split.carbs_pct), carbs)),
            custom_protein_pct: Some(nonzero_or(Some(self.custom_split.protein_pct), protein)),
            custom_fat_pct: Some(nonzero_or(Some(self.custom_split.fat_pct), fat)),
            ..base.clone()
        })
    }

    /// BMR and TDEE preview, `None` until weight, height, and age are entered
    ///
    /// A missing gender uses the female offset.
    #[must_use]
    pub fn energy_estimate(&self) -> Option<EnergyEstimate> {
        let bmr = basal_metabolic_rate(
            self.weight_kg?,
            self.height_cm?,
            self.age?,
            self.gender.unwrap_or(Gender::Female),
        )
        .ok()?;
        Some(EnergyEstimate {
            bmr,
            tdee: total_daily_energy_expenditure(bmr, self.activity_level),
        })
    }
}

fn nonzero_or(value: Option<u8>, fallback: u8) -> u8 {
    value.filter(|v| *v > 0).unwrap_or(fallback)
}
