// ABOUTME: Logged food entry with derived, serving-scaled nutrition
// ABOUTME: Entry identity, construction from catalog foods, and server row back-conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::nutrition::REFERENCE_GRAMS;
use crate::errors::{AppError, AppResult};
use crate::intelligence::unit_conversion::{grams_for_unit, round_to};
use crate::models::{CatalogFood, FoodSource, MealSlot, NutritionFacts, ServingUnit};
use crate::providers::core::LoggedMeal;

/// Session-unique identifier of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Fresh random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Nutrition of `grams` of a food whose facts are given per 100 g
///
/// Calories are rounded to whole kcal, macros to one decimal.
#[must_use]
pub fn adjust_nutrition(base: NutritionFacts, grams: f64) -> NutritionFacts {
    let scaled = base.scaled(grams / REFERENCE_GRAMS);
    NutritionFacts::new(
        scaled.calories.round(),
        round_to(scaled.protein, 1),
        round_to(scaled.carbs, 1),
        round_to(scaled.fat, 1),
    )
}

/// Serving the user chose: display quantity and unit plus canonical grams
///
/// Grams always follow from the quantity and unit, or from the portion picker
/// that produced the serving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Serving {
    quantity: f64,
    unit: ServingUnit,
    grams: f64,
}

impl Serving {
    /// Serving expressed directly in grams
    #[must_use]
    pub const fn in_grams(grams: f64) -> Self {
        Self {
            quantity: grams,
            unit: ServingUnit::Gram,
            grams,
        }
    }

    /// Serving of `quantity` of `unit`, grams from the unit table
    #[must_use]
    pub fn of(quantity: f64, unit: ServingUnit) -> Self {
        Self {
            quantity,
            unit,
            grams: grams_for_unit(unit, quantity),
        }
    }

    /// Serving taken from the portion picker, whose grams are canonical
    #[must_use]
    pub(crate) const fn from_picker(quantity: f64, unit: ServingUnit, grams: f64) -> Self {
        Self {
            quantity,
            unit,
            grams,
        }
    }

    /// Quantity in `unit`
    #[must_use]
    pub const fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Display unit
    #[must_use]
    pub const fn unit(&self) -> ServingUnit {
        self.unit
    }

    /// Canonical grams
    #[must_use]
    pub const fn grams(&self) -> f64 {
        self.grams
    }

    /// Reject non-positive or non-finite servings
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when the gram quantity is not a positive number
    pub fn validated(self) -> AppResult<Self> {
        if self.grams.is_finite() && self.grams > 0.0 {
            Ok(self)
        } else {
            Err(AppError::value_out_of_range(format!(
                "Quantity must be greater than 0 (got {})",
                self.grams
            ))
            .with_resource_id("quantity"))
        }
    }
}

/// One logged food instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    id: EntryId,
    food_id: Option<String>,
    name: String,
    base: NutritionFacts,
    serving: Serving,
    meal_slot: MealSlot,
    source: FoodSource,
}

impl FoodEntry {
    /// New entry for a catalog food
    ///
    /// Base nutrition is sanitized so malformed upstream data counts as 0.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the serving is not a positive gram amount
    pub fn from_catalog(food: &CatalogFood, serving: Serving, meal_slot: MealSlot) -> AppResult<Self> {
        Ok(Self {
            id: EntryId::new(),
            food_id: food.id.clone(),
            name: food.name.clone(),
            base: food.per_100g.sanitized(),
            serving: serving.validated()?,
            meal_slot,
            source: food.source,
        })
    }

    /// Rebuild an entry from a persisted row
    ///
    /// Rows store already-scaled nutrition; the per-100 g base is recovered by
    /// dividing by `quantity / 100`. Returns `None` when the row's slot is not
    /// recognized or its quantity is not positive.
    #[must_use]
    pub fn from_logged(row: &LoggedMeal) -> Option<Self> {
        let meal_slot = MealSlot::parse(&row.meal_slot)?;
        let serving = Serving::in_grams(row.quantity_grams).validated().ok()?;
        let base = row
            .totals
            .scaled(REFERENCE_GRAMS / serving.grams)
            .sanitized();
        Some(Self {
            id: EntryId::new(),
            food_id: row.food_id.clone(),
            name: row.name.clone(),
            base,
            serving,
            meal_slot,
            source: FoodSource::Local,
        })
    }

    /// Replacement carrying the same id with a new serving and slot
    ///
    /// # Errors
    ///
    /// Returns a validation error when the serving is not a positive gram amount
    pub fn with_changes(&self, serving: Serving, meal_slot: MealSlot) -> AppResult<Self> {
        Ok(Self {
            serving: serving.validated()?,
            meal_slot,
            ..self.clone()
        })
    }

    /// Entry id
    #[must_use]
    pub const fn id(&self) -> EntryId {
        self.id
    }

    /// Catalog food id
    #[must_use]
    pub fn food_id(&self) -> Option<&str> {
        self.food_id.as_deref()
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nutrition per 100 g
    #[must_use]
    pub const fn base_nutrition(&self) -> NutritionFacts {
        self.base
    }

    /// Chosen serving
    #[must_use]
    pub const fn serving(&self) -> Serving {
        self.serving
    }

    /// Canonical grams
    #[must_use]
    pub const fn quantity_grams(&self) -> f64 {
        self.serving.grams
    }

    /// Meal slot
    #[must_use]
    pub const fn meal_slot(&self) -> MealSlot {
        self.meal_slot
    }

    /// Catalog source
    #[must_use]
    pub const fn source(&self) -> FoodSource {
        self.source
    }

    /// Nutrition of the logged serving, recomputed on every call
    #[must_use]
    pub fn adjusted_nutrition(&self) -> NutritionFacts {
        adjust_nutrition(self.base, self.serving.grams)
    }

    /// Catalog view of the food, used when persisting
    #[must_use]
    pub fn as_catalog_food(&self) -> CatalogFood {
        CatalogFood {
            id: self.food_id.clone(),
            name: self.name.clone(),
            per_100g: self.base,
            source: self.source,
        }
    }
}
