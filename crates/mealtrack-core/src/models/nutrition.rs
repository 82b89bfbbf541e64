// ABOUTME: Nutrition models for food catalog items and logged meal slots
// ABOUTME: NutritionFacts, MealSlot, ServingUnit, CatalogFood, and search pagination
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::units::{
    COARSE_STEP, FINE_STEP, GRAMS_PER_CUP, GRAMS_PER_DECAGRAM, GRAMS_PER_GRAM,
    GRAMS_PER_KILOGRAM, GRAMS_PER_PIECE, GRAMS_PER_SLICE,
};
use crate::errors::AppError;

/// Upstream nutrient value, with negative and non-finite values as 0
#[must_use]
pub fn sanitize_nutrient(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Calories and macronutrients for some amount of food
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionFacts {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Fat (g)
    pub fat: f64,
}

impl NutritionFacts {
    /// All fields zero
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create nutrition facts from raw values
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Same facts with every field passed through [`sanitize_nutrient`]
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new(
            sanitize_nutrient(self.calories),
            sanitize_nutrient(self.protein),
            sanitize_nutrient(self.carbs),
            sanitize_nutrient(self.fat),
        )
    }

    /// Multiply every field by `factor`
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(
            self.calories * factor,
            self.protein * factor,
            self.carbs * factor,
            self.fat * factor,
        )
    }
}

impl Add for NutritionFacts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.calories + rhs.calories,
            self.protein + rhs.protein,
            self.carbs + rhs.carbs,
            self.fat + rhs.fat,
        )
    }
}

impl AddAssign for NutritionFacts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutritionFacts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for NutritionFacts {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// One of the six fixed daily meal slots
///
/// Serialized as snake case English names. The legacy server keys
/// (`reggeli`, `tizorai`, `ebed`, `uzsonna`, `vacsora`, `nasi`) are accepted
/// on input and produced by [`MealSlot::wire_key`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Breakfast
    #[serde(alias = "reggeli")]
    Breakfast,
    /// Mid-morning snack
    #[serde(alias = "tizorai", alias = "morning-snack")]
    MorningSnack,
    /// Lunch
    #[default]
    #[serde(alias = "ebed")]
    Lunch,
    /// Afternoon snack
    #[serde(alias = "uzsonna", alias = "afternoon-snack")]
    AfternoonSnack,
    /// Dinner
    #[serde(alias = "vacsora")]
    Dinner,
    /// Anything eaten outside the regular meals
    #[serde(alias = "nasi")]
    Extra,
}

impl MealSlot {
    /// All slots in display order
    pub const ALL: [Self; 6] = [
        Self::Breakfast,
        Self::MorningSnack,
        Self::Lunch,
        Self::AfternoonSnack,
        Self::Dinner,
        Self::Extra,
    ];

    /// Canonical snake case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::MorningSnack => "morning_snack",
            Self::Lunch => "lunch",
            Self::AfternoonSnack => "afternoon_snack",
            Self::Dinner => "dinner",
            Self::Extra => "extra",
        }
    }

    /// Key stored by the meal log server
    #[must_use]
    pub const fn wire_key(self) -> &'static str {
        match self {
            Self::Breakfast => "reggeli",
            Self::MorningSnack => "tizorai",
            Self::Lunch => "ebed",
            Self::AfternoonSnack => "uzsonna",
            Self::Dinner => "vacsora",
            Self::Extra => "nasi",
        }
    }

    /// Human readable heading
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::MorningSnack => "Morning snack",
            Self::Lunch => "Lunch",
            Self::AfternoonSnack => "Afternoon snack",
            Self::Dinner => "Dinner",
            Self::Extra => "Extra",
        }
    }

    /// Parse a canonical, kebab case, or legacy key
    ///
    /// Returns `None` for anything else so callers decide how to treat
    /// unrecognized slots instead of silently remapping them.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == normalized || slot.wire_key() == normalized)
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AppError::invalid_input(format!("Unknown meal slot: {s}")))
    }
}

/// User-facing serving unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServingUnit {
    /// Gram
    #[default]
    #[serde(rename = "g")]
    Gram,
    /// Decagram (10 g)
    #[serde(rename = "dkg")]
    Decagram,
    /// Kilogram
    #[serde(rename = "kg")]
    Kilogram,
    /// One slice
    #[serde(rename = "slice")]
    Slice,
    /// One piece
    #[serde(rename = "piece")]
    Piece,
    /// One cup
    #[serde(rename = "cup")]
    Cup,
}

impl ServingUnit {
    /// Every known unit
    pub const ALL: [Self; 6] = [
        Self::Gram,
        Self::Decagram,
        Self::Kilogram,
        Self::Slice,
        Self::Piece,
        Self::Cup,
    ];

    /// Short label used in the picker and on the wire
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gram => "g",
            Self::Decagram => "dkg",
            Self::Kilogram => "kg",
            Self::Slice => "slice",
            Self::Piece => "piece",
            Self::Cup => "cup",
        }
    }

    /// Grams represented by one of this unit
    #[must_use]
    pub const fn grams_per_unit(self) -> f64 {
        match self {
            Self::Gram => GRAMS_PER_GRAM,
            Self::Decagram => GRAMS_PER_DECAGRAM,
            Self::Kilogram => GRAMS_PER_KILOGRAM,
            Self::Slice => GRAMS_PER_SLICE,
            Self::Piece => GRAMS_PER_PIECE,
            Self::Cup => GRAMS_PER_CUP,
        }
    }

    /// Increment used by the quantity stepper
    #[must_use]
    pub const fn step(self) -> f64 {
        match self {
            Self::Decagram | Self::Kilogram => FINE_STEP,
            Self::Gram | Self::Slice | Self::Piece | Self::Cup => COARSE_STEP,
        }
    }

    /// Parse a unit label, case-insensitive
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|unit| unit.label() == label)
    }
}

impl fmt::Display for ServingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a catalog item came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodSource {
    /// Local food database
    #[default]
    Local,
    /// Third-party nutrition API
    Api,
}

impl FoodSource {
    /// Parse source from string, defaulting to local
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        if s.eq_ignore_ascii_case("api") {
            Self::Api
        } else {
            Self::Local
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Api => "api",
        }
    }
}

/// Food item returned by the catalog, nutrition per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFood {
    /// Catalog identifier, absent for ad-hoc foods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Nutrition per 100 g
    pub per_100g: NutritionFacts,
    /// Catalog source
    #[serde(default)]
    pub source: FoodSource,
}

/// Paging metadata of one search response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// 1-based page number
    pub current_page: u32,
    /// Matches across all pages
    pub total_results: u32,
    /// Number of pages
    pub total_pages: u32,
    /// Matches from the local database
    pub local_count: u32,
    /// Matches from the third-party API
    pub api_count: u32,
}

/// One page of food search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Query the server answered
    pub query: String,
    /// Matching foods
    pub foods: Vec<CatalogFood>,
    /// Paging metadata
    pub pagination: Pagination,
}

/// Named portion suggested by the portion catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerPortion {
    /// Display label
    pub label: String,
    /// Portion weight in grams
    #[serde(rename = "weight")]
    pub weight_grams: f64,
}
