// ABOUTME: User profile models consumed by the macro resolver and energy estimates
// ABOUTME: MacroPreset, MacroDistribution, ActivityLevel, Gender, and UserProfile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Named macro split selected in the profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MacroPreset {
    /// 40/30/30 carbs/protein/fat
    #[default]
    Balanced,
    /// 20/40/40
    LowCarb,
    /// 30/40/30
    HighProtein,
    /// 5/25/70
    Keto,
    /// 45/20/35
    Mediterranean,
    /// Percentages stored on the profile
    Custom,
}

impl MacroPreset {
    /// Parse preset from string, unknown names fall back to balanced
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "low_carb" => Self::LowCarb,
            "high_protein" => Self::HighProtein,
            "keto" => Self::Keto,
            "mediterranean" => Self::Mediterranean,
            "custom" => Self::Custom,
            _ => Self::Balanced,
        }
    }

    /// Snake case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::LowCarb => "low_carb",
            Self::HighProtein => "high_protein",
            Self::Keto => "keto",
            Self::Mediterranean => "mediterranean",
            Self::Custom => "custom",
        }
    }
}

impl From<String> for MacroPreset {
    fn from(value: String) -> Self {
        Self::from_str_lossy(&value)
    }
}

impl From<MacroPreset> for String {
    fn from(value: MacroPreset) -> Self {
        value.as_str().to_owned()
    }
}

/// Percent of calories from each macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDistribution {
    /// Carbohydrate share (%)
    pub carbs_pct: u8,
    /// Protein share (%)
    pub protein_pct: u8,
    /// Fat share (%)
    pub fat_pct: u8,
}

impl MacroDistribution {
    /// Create a distribution
    #[must_use]
    pub const fn new(carbs_pct: u8, protein_pct: u8, fat_pct: u8) -> Self {
        Self {
            carbs_pct,
            protein_pct,
            fat_pct,
        }
    }

    /// Build from a `(carbs, protein, fat)` tuple
    #[must_use]
    pub const fn from_tuple(split: (u8, u8, u8)) -> Self {
        Self::new(split.0, split.1, split.2)
    }

    /// Sum of the three shares
    #[must_use]
    pub const fn total(self) -> u16 {
        self.carbs_pct as u16 + self.protein_pct as u16 + self.fat_pct as u16
    }
}

/// Physical activity level used for energy expenditure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days a week
    Light,
    /// Moderate exercise 3-5 days a week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days a week
    Active,
    /// Physical job or twice-daily training
    VeryActive,
}

impl ActivityLevel {
    /// Parse activity level, unknown values fall back to moderate
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Self::Sedentary,
            "light" => Self::Light,
            "active" => Self::Active,
            "very_active" => Self::VeryActive,
            _ => Self::Moderate,
        }
    }

    /// Snake case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }

    /// TDEE multiplier applied to BMR
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(value: String) -> Self {
        Self::from_str_lossy(&value)
    }
}

impl From<ActivityLevel> for String {
    fn from(value: ActivityLevel) -> Self {
        value.as_str().to_owned()
    }
}

/// Sex used by the Mifflin-St Jeor offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male offset (+5)
    Male,
    /// Female offset (-161), also used when unspecified
    Female,
}

impl Gender {
    /// Parse gender, anything other than male uses the female offset
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("male") {
            Self::Male
        } else {
            Self::Female
        }
    }
}

/// Profile settings as stored by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Server user id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Login name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Given name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Height in cm
    #[serde(rename = "height", skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Weight in kg
    #[serde(rename = "weight", skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Sex for BMR, unspecified uses the female offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Activity level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    /// Daily calorie goal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_calorie_goal: Option<u32>,
    /// Selected macro preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macro_preset: Option<MacroPreset>,
    /// Custom carbohydrate share (%)
    #[serde(rename = "carbs_percent", skip_serializing_if = "Option::is_none")]
    pub custom_carbs_pct: Option<u8>,
    /// Custom protein share (%)
    #[serde(rename = "protein_percent", skip_serializing_if = "Option::is_none")]
    pub custom_protein_pct: Option<u8>,
    /// Custom fat share (%)
    #[serde(rename = "fat_percent", skip_serializing_if = "Option::is_none")]
    pub custom_fat_pct: Option<u8>,
}

impl UserProfile {
    /// Selected preset, balanced when unset
    #[must_use]
    pub fn preset(&self) -> MacroPreset {
        self.macro_preset.unwrap_or_default()
    }
}
