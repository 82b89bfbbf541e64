// ABOUTME: Collaborator traits the ledger, search, goals, and inbox depend on
// ABOUTME: Request/response contracts for catalog, meal log, goals, profile, and notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Collaborator Contracts
//!
//! Every remote capability is a small `Send + Sync` trait so components can be
//! wired against the HTTP backend in production and the synthetic backend in
//! tests. Implementations map every failure to `AppError`; malformed nutrient
//! values are defaulted to 0 rather than reported.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::ledger::entry::FoodEntry;
use crate::models::{
    CatalogFood, Goal, GoalRequest, MealSlot, Notification, NutritionFacts, ProjectedWeight,
    SearchPage, ServerPortion, UserProfile, WeightLog,
};

/// Persisted meal row as returned for a day
///
/// Nutrition values are absolute for the logged quantity, not per 100 g.
/// The slot is kept as the raw server key so unknown slots can be reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMeal {
    /// Catalog food id
    pub food_id: Option<String>,
    /// Food name
    pub name: String,
    /// Raw meal slot key
    pub meal_slot: String,
    /// Logged grams
    pub quantity_grams: f64,
    /// Nutrition of the logged quantity
    pub totals: NutritionFacts,
    /// Server timestamp, verbatim
    pub logged_at: Option<String>,
}

/// Request to persist one meal row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMealRequest {
    /// Food with per-100 g nutrition
    pub food: CatalogFood,
    /// Slot
    pub meal_slot: MealSlot,
    /// Grams eaten
    pub quantity_grams: f64,
    /// Day eaten
    pub date: NaiveDate,
}

impl LogMealRequest {
    /// Request persisting `entry` on `date`
    #[must_use]
    pub fn for_entry(entry: &FoodEntry, date: NaiveDate) -> Self {
        Self {
            food: entry.as_catalog_food(),
            meal_slot: entry.meal_slot(),
            quantity_grams: entry.quantity_grams(),
            date,
        }
    }
}

/// Request to delete one meal row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteMealRequest {
    /// Catalog food id
    pub food_id: Option<String>,
    /// Slot
    pub meal_slot: MealSlot,
    /// Logged grams
    pub quantity_grams: f64,
    /// Day eaten
    pub date: NaiveDate,
}

impl DeleteMealRequest {
    /// Request deleting the row behind `entry` on `date`
    #[must_use]
    pub fn for_entry(entry: &FoodEntry, date: NaiveDate) -> Self {
        Self {
            food_id: entry.food_id().map(str::to_owned),
            meal_slot: entry.meal_slot(),
            quantity_grams: entry.quantity_grams(),
            date,
        }
    }
}

/// Weight logs with the stored goal and its projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightHistory {
    /// Logs in ascending date order
    pub logs: Vec<WeightLog>,
    /// Stored goal, if any
    pub goal: Option<Goal>,
    /// Server-side linear projection
    pub projected: Vec<ProjectedWeight>,
}

/// Stored goal with the latest logged weight
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalSnapshot {
    /// Stored goal, `None` when the user has not set one
    pub goal: Option<Goal>,
    /// Most recent weight log
    pub latest_weight: Option<WeightLog>,
    /// Basal metabolic rate computed when the goal was set
    pub bmr: Option<f64>,
    /// Energy expenditure computed when the goal was set
    pub tdee: Option<f64>,
}

/// Latest notifications with the unread count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPage {
    /// Newest first
    pub notifications: Vec<Notification>,
    /// Unread notifications across the whole inbox
    pub unread_count: u32,
}

/// Food catalog search
#[async_trait]
pub trait FoodCatalog: Send + Sync {
    /// One page of foods matching `query`, pages are 1-based
    async fn search(&self, query: &str, page: u32) -> AppResult<SearchPage>;
}

/// Named portions per food
#[async_trait]
pub trait PortionCatalog: Send + Sync {
    /// Portions for `food_id`, possibly empty
    async fn portions(&self, food_id: &str) -> AppResult<Vec<ServerPortion>>;
}

/// Meal log persistence
#[async_trait]
pub trait MealLogStore: Send + Sync {
    /// Persist one meal row
    async fn log_meal(&self, request: &LogMealRequest) -> AppResult<()>;

    /// Delete one meal row matching food, slot, quantity, and date
    async fn delete_meal(&self, request: &DeleteMealRequest) -> AppResult<()>;

    /// All rows logged on `date`
    async fn meals_for_date(&self, date: NaiveDate) -> AppResult<Vec<LoggedMeal>>;
}

/// Goal and body weight persistence
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Store a validated goal, returns the daily calorie target it implies
    async fn set_goal(&self, request: &GoalRequest) -> AppResult<Option<u32>>;

    /// Log a body weight for `date`
    async fn log_weight(&self, weight_kg: f64, date: NaiveDate) -> AppResult<()>;

    /// Weight logs of the last `days` days
    async fn weight_history(&self, days: u32) -> AppResult<WeightHistory>;

    /// Stored goal and latest weight
    async fn goal_status(&self) -> AppResult<GoalSnapshot>;
}

/// Profile settings persistence
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Save settings, returns the stored profile
    async fn update_profile(&self, profile: &UserProfile) -> AppResult<UserProfile>;
}

/// Notification inbox
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// Latest `limit` notifications
    async fn notifications(&self, limit: u32) -> AppResult<NotificationPage>;

    /// Mark one notification read
    async fn mark_read(&self, id: i64) -> AppResult<()>;

    /// Mark every notification read
    async fn mark_all_read(&self) -> AppResult<()>;
}

/// Every collaborator a session needs
#[derive(Clone)]
pub struct Collaborators {
    /// Food search
    pub catalog: Arc<dyn FoodCatalog>,
    /// Portion presets
    pub portions: Arc<dyn PortionCatalog>,
    /// Meal rows
    pub meals: Arc<dyn MealLogStore>,
    /// Goals and weights
    pub goals: Arc<dyn GoalStore>,
    /// Profile settings
    pub profile: Arc<dyn ProfileStore>,
    /// Notifications
    pub inbox: Arc<dyn NotificationInbox>,
}

impl Collaborators {
    /// Use one backend for every collaborator
    #[must_use]
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: FoodCatalog
            + PortionCatalog
            + MealLogStore
            + GoalStore
            + ProfileStore
            + NotificationInbox
            + 'static,
    {
        Self {
            catalog: backend.clone(),
            portions: backend.clone(),
            meals: backend.clone(),
            goals: backend.clone(),
            profile: backend.clone(),
            inbox: backend,
        }
    }
}
