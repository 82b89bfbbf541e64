// ABOUTME: Core data models shared across the mealtrack workspace
// ABOUTME: Foods and meal slots, goals and weights, profile settings, notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Core data models
//!
//! Plain data types with serde support. Behavior that derives new values from
//! these models lives in the `mealtrack` crate.

/// Nutrition facts, serving units, meal slots, catalog foods
pub mod nutrition;

/// Goal types, weight logs, and goal status snapshots
pub mod goals;

/// User profile settings, macro presets, activity levels
pub mod profile;

/// Inbox notifications
pub mod notification;

pub use goals::{Goal, GoalRequest, GoalStatus, GoalType, ProjectedWeight, WeightLog};
pub use notification::Notification;
pub use nutrition::{
    sanitize_nutrient, CatalogFood, FoodSource, MealSlot, NutritionFacts, Pagination,
    SearchPage, ServerPortion, ServingUnit,
};
pub use profile::{ActivityLevel, Gender, MacroDistribution, MacroPreset, UserProfile};
