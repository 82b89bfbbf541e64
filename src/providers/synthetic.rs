// ABOUTME: In-memory backend implementing every collaborator for tests and offline runs
// ABOUTME: Records requests, injects failures per operation, and delays chosen searches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock poisoning errors are converted to AppError::internal
// for proper error propagation through the application

//! # Synthetic Backend
//!
//! A stand-in for the nutrition server that keeps all state in memory:
//!
//! - Every request is recorded and can be inspected afterwards
//! - Any operation can be told to fail until recovered
//! - Searches for a given query can be delayed, which lets tests reorder
//!   responses against the search controller's generation fence
//! - Goal storage derives the daily calorie target the way the server does
//!
//! ## Thread Safety
//!
//! All data access is protected by `RwLock`. Guards are never held across an
//! await point.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use tokio::time::sleep;

use crate::constants::limits::DEFAULT_CALORIE_GOAL;
use crate::errors::{AppError, AppResult};
use crate::intelligence::energy::{
    basal_metabolic_rate, daily_calories_for_goal, tdee_for_profile,
};
use crate::intelligence::goal_progress::{latest_weight, project_weights};
use crate::ledger::adjust_nutrition;
use crate::models::{
    CatalogFood, FoodSource, Gender, Goal, GoalRequest, GoalType, MealSlot, Notification,
    Pagination, SearchPage, ServerPortion, UserProfile, WeightLog,
};
use crate::providers::core::{
    DeleteMealRequest, FoodCatalog, GoalSnapshot, GoalStore, LogMealRequest, LoggedMeal,
    MealLogStore, NotificationInbox, NotificationPage, PortionCatalog, ProfileStore,
    WeightHistory,
};

/// Foods per search page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Collaborator operation, used to target failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Catalog search
    Search,
    /// Portion lookup
    Portions,
    /// Persist a meal row
    LogMeal,
    /// Delete a meal row
    DeleteMeal,
    /// Load a day's rows
    MealsForDate,
    /// Store a goal
    SetGoal,
    /// Log a body weight
    LogWeight,
    /// Load weight history
    WeightHistory,
    /// Load goal status
    GoalStatus,
    /// Save the profile
    UpdateProfile,
    /// Load notifications
    Notifications,
    /// Mark one notification read
    MarkRead,
    /// Mark all notifications read
    MarkAllRead,
}

/// A request as received by the backend
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    /// Catalog search
    Search {
        /// Query text
        query: String,
        /// 1-based page
        page: u32,
    },
    /// Portion lookup
    Portions {
        /// Food id
        food_id: String,
    },
    /// Persist a meal row
    LogMeal(LogMealRequest),
    /// Delete a meal row
    DeleteMeal(DeleteMealRequest),
    /// Load a day's rows
    MealsForDate(NaiveDate),
    /// Store a goal
    SetGoal(GoalRequest),
    /// Log a body weight
    LogWeight {
        /// Weight in kg
        weight_kg: f64,
        /// Day
        date: NaiveDate,
    },
    /// Load weight history
    WeightHistory {
        /// Days requested
        days: u32,
    },
    /// Load goal status
    GoalStatus,
    /// Save the profile
    UpdateProfile(UserProfile),
    /// Load notifications
    Notifications {
        /// Maximum count
        limit: u32,
    },
    /// Mark one notification read
    MarkRead(i64),
    /// Mark all notifications read
    MarkAllRead,
}

impl RecordedRequest {
    /// Operation this request belongs to
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Search { .. } => Operation::Search,
            Self::Portions { .. } => Operation::Portions,
            Self::LogMeal(_) => Operation::LogMeal,
            Self::DeleteMeal(_) => Operation::DeleteMeal,
            Self::MealsForDate(_) => Operation::MealsForDate,
            Self::SetGoal(_) => Operation::SetGoal,
            Self::LogWeight { .. } => Operation::LogWeight,
            Self::WeightHistory { .. } => Operation::WeightHistory,
            Self::GoalStatus => Operation::GoalStatus,
            Self::UpdateProfile(_) => Operation::UpdateProfile,
            Self::Notifications { .. } => Operation::Notifications,
            Self::MarkRead(_) => Operation::MarkRead,
            Self::MarkAllRead => Operation::MarkAllRead,
        }
    }
}

#[derive(Debug)]
struct BackendState {
    today: NaiveDate,
    page_size: usize,
    foods: Vec<CatalogFood>,
    portions: HashMap<String, Vec<ServerPortion>>,
    meals: BTreeMap<NaiveDate, Vec<LoggedMeal>>,
    goal: Option<Goal>,
    weights: Vec<WeightLog>,
    profile: UserProfile,
    notifications: Vec<Notification>,
    failures: HashSet<Operation>,
    search_delays: HashMap<String, Duration>,
    requests: Vec<RecordedRequest>,
}

/// In-memory nutrition backend
#[derive(Debug, Clone)]
pub struct SyntheticBackend {
    state: Arc<RwLock<BackendState>>,
}

impl Default for SyntheticBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticBackend {
    /// Empty backend whose "today" is the local date
    #[must_use]
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Empty backend with a fixed "today" for goal creation and history windows
    #[must_use]
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            state: Arc::new(RwLock::new(BackendState {
                today,
                page_size: DEFAULT_PAGE_SIZE,
                foods: Vec::new(),
                portions: HashMap::new(),
                meals: BTreeMap::new(),
                goal: None,
                weights: Vec::new(),
                profile: UserProfile::default(),
                notifications: Vec::new(),
                failures: HashSet::new(),
                search_delays: HashMap::new(),
                requests: Vec::new(),
            })),
        }
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, BackendState>> {
        self.state
            .read()
            .map_err(|_| AppError::internal("Synthetic backend lock poisoned"))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, BackendState>> {
        self.state
            .write()
            .map_err(|_| AppError::internal("Synthetic backend lock poisoned"))
    }

    /// Record `request` and fail it if its operation is marked failing
    fn receive(&self, request: RecordedRequest) -> AppResult<RwLockWriteGuard<'_, BackendState>> {
        let mut state = self.write()?;
        let operation = request.operation();
        state.requests.push(request);
        if state.failures.contains(&operation) {
            return Err(AppError::external_service(
                "synthetic backend",
                format!("{operation:?} failed"),
            ));
        }
        Ok(state)
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    /// Add a food to the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn add_food(&self, food: CatalogFood) -> AppResult<()> {
        self.write()?.foods.push(food);
        Ok(())
    }

    /// Set the portions served for `food_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn set_portions(&self, food_id: &str, portions: Vec<ServerPortion>) -> AppResult<()> {
        self.write()?.portions.insert(food_id.to_owned(), portions);
        Ok(())
    }

    /// Insert a raw meal row, bypassing request recording
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn insert_meal_row(&self, date: NaiveDate, row: LoggedMeal) -> AppResult<()> {
        self.write()?.meals.entry(date).or_default().push(row);
        Ok(())
    }

    /// Replace the stored profile
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn set_profile(&self, profile: UserProfile) -> AppResult<()> {
        self.write()?.profile = profile;
        Ok(())
    }

    /// Replace the stored goal
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn set_stored_goal(&self, goal: Option<Goal>) -> AppResult<()> {
        self.write()?.goal = goal;
        Ok(())
    }

    /// Add a weight log, replacing any log on the same day
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn add_weight_log(&self, log: WeightLog) -> AppResult<()> {
        upsert_weight(&mut self.write()?.weights, log);
        Ok(())
    }

    /// Add a notification
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn add_notification(&self, notification: Notification) -> AppResult<()> {
        self.write()?.notifications.push(notification);
        Ok(())
    }

    /// Change the number of foods per search page
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn set_page_size(&self, page_size: usize) -> AppResult<()> {
        self.write()?.page_size = page_size.max(1);
        Ok(())
    }

    // ========================================================================
    // Fault and timing control
    // ========================================================================

    /// Make every `operation` request fail until [`SyntheticBackend::recover`]
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn fail(&self, operation: Operation) -> AppResult<()> {
        self.write()?.failures.insert(operation);
        Ok(())
    }

    /// Let `operation` succeed again
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn recover(&self, operation: Operation) -> AppResult<()> {
        self.write()?.failures.remove(&operation);
        Ok(())
    }

    /// Delay responses to searches for exactly `query`
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn set_search_delay(&self, query: &str, delay: Duration) -> AppResult<()> {
        self.write()?.search_delays.insert(query.to_owned(), delay);
        Ok(())
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Every request received so far, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn requests(&self) -> AppResult<Vec<RecordedRequest>> {
        Ok(self.read()?.requests.clone())
    }

    /// Number of requests received for `operation`
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn request_count(&self, operation: Operation) -> AppResult<usize> {
        Ok(self
            .read()?
            .requests
            .iter()
            .filter(|request| request.operation() == operation)
            .count())
    }

    /// Stored rows for `date`
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn meal_rows(&self, date: NaiveDate) -> AppResult<Vec<LoggedMeal>> {
        Ok(self.read()?.meals.get(&date).cloned().unwrap_or_default())
    }

    /// Stored goal
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn stored_goal(&self) -> AppResult<Option<Goal>> {
        Ok(self.read()?.goal.clone())
    }

    /// Stored weight logs in date order
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn weight_logs(&self) -> AppResult<Vec<WeightLog>> {
        Ok(self.read()?.weights.clone())
    }

    /// Stored profile
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    pub fn stored_profile(&self) -> AppResult<UserProfile> {
        Ok(self.read()?.profile.clone())
    }
}

fn upsert_weight(weights: &mut Vec<WeightLog>, log: WeightLog) {
    weights.retain(|existing| existing.date != log.date);
    weights.push(log);
    weights.sort_by_key(|existing| existing.date);
}

fn search_page(state: &BackendState, query: &str, page: u32) -> SearchPage {
    let needle = query.trim().to_lowercase();
    let matches: Vec<&CatalogFood> = state
        .foods
        .iter()
        .filter(|food| food.name.to_lowercase().contains(&needle))
        .collect();

    let page_size = state.page_size;
    let total_pages = matches.len().div_ceil(page_size);
    let current_page = page.max(1);
    let skip = (current_page as usize - 1) * page_size;
    let foods: Vec<CatalogFood> = matches
        .iter()
        .skip(skip)
        .take(page_size)
        .map(|food| (*food).clone())
        .collect();
    let local_count = foods
        .iter()
        .filter(|food| food.source == FoodSource::Local)
        .count();

    SearchPage {
        query: query.to_owned(),
        pagination: Pagination {
            current_page,
            total_results: matches.len() as u32,
            total_pages: total_pages as u32,
            local_count: local_count as u32,
            api_count: (foods.len() - local_count) as u32,
        },
        foods,
    }
}

/// Daily calorie target for `request`, mirroring the server's derivation
fn derive_calorie_target(state: &BackendState, request: &GoalRequest) -> Option<u32> {
    let profile_goal = state.profile.daily_calorie_goal;
    let tdee = tdee_for_profile(&state.profile);
    match request.goal_type {
        GoalType::CustomCalories => request.custom_calories,
        GoalType::Maintain => Some(
            tdee.map_or(profile_goal.unwrap_or(DEFAULT_CALORIE_GOAL), |tdee| {
                tdee.round() as u32
            }),
        ),
        GoalType::WeightLoss | GoalType::WeightGain => {
            let current = current_weight(state);
            match (current, request.target_weight, request.target_date, tdee) {
                (Some(current), Some(target), Some(date), Some(tdee)) => Some(
                    daily_calories_for_goal(current, target, date, tdee, state.today),
                ),
                _ => Some(profile_goal.unwrap_or(DEFAULT_CALORIE_GOAL)),
            }
        }
    }
}

fn current_weight(state: &BackendState) -> Option<f64> {
    latest_weight(&state.weights)
        .map(|log| log.weight)
        .or(state.profile.weight_kg)
}

#[async_trait]
impl FoodCatalog for SyntheticBackend {
    async fn search(&self, query: &str, page: u32) -> AppResult<SearchPage> {
        let delay = {
            let state = self.receive(RecordedRequest::Search {
                query: query.to_owned(),
                page,
            })?;
            state.search_delays.get(query).copied()
        };
        if let Some(delay) = delay {
            sleep(delay).await;
        }
        let state = self.read()?;
        Ok(search_page(&state, query, page))
    }
}

#[async_trait]
impl PortionCatalog for SyntheticBackend {
    async fn portions(&self, food_id: &str) -> AppResult<Vec<ServerPortion>> {
        let state = self.receive(RecordedRequest::Portions {
            food_id: food_id.to_owned(),
        })?;
        Ok(state.portions.get(food_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl MealLogStore for SyntheticBackend {
    async fn log_meal(&self, request: &LogMealRequest) -> AppResult<()> {
        let mut state = self.receive(RecordedRequest::LogMeal(request.clone()))?;
        let row = LoggedMeal {
            food_id: request.food.id.clone(),
            name: request.food.name.clone(),
            meal_slot: request.meal_slot.wire_key().to_owned(),
            quantity_grams: request.quantity_grams,
            totals: adjust_nutrition(request.food.per_100g, request.quantity_grams),
            logged_at: None,
        };
        state.meals.entry(request.date).or_default().push(row);
        Ok(())
    }

    async fn delete_meal(&self, request: &DeleteMealRequest) -> AppResult<()> {
        let mut state = self.receive(RecordedRequest::DeleteMeal(request.clone()))?;
        let rows = state.meals.entry(request.date).or_default();
        let position = rows.iter().position(|row| {
            row.food_id == request.food_id
                && MealSlot::parse(&row.meal_slot) == Some(request.meal_slot)
                && (row.quantity_grams - request.quantity_grams).abs() < 0.01
        });
        match position {
            Some(index) => {
                rows.remove(index);
                Ok(())
            }
            None => Err(AppError::not_found("Meal row")),
        }
    }

    async fn meals_for_date(&self, date: NaiveDate) -> AppResult<Vec<LoggedMeal>> {
        let state = self.receive(RecordedRequest::MealsForDate(date))?;
        Ok(state.meals.get(&date).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl GoalStore for SyntheticBackend {
    async fn set_goal(&self, request: &GoalRequest) -> AppResult<Option<u32>> {
        let mut state = self.receive(RecordedRequest::SetGoal(request.clone()))?;
        let daily_calorie_target = derive_calorie_target(&state, request);
        let weight_goal = request.goal_type.is_weight_goal();
        state.goal = Some(Goal {
            goal_type: request.goal_type,
            start_weight: current_weight(&state),
            target_weight: request.target_weight.filter(|_| weight_goal),
            target_date: request.target_date.filter(|_| weight_goal),
            created_date: Some(state.today),
            daily_calorie_target,
        });
        Ok(daily_calorie_target)
    }

    async fn log_weight(&self, weight_kg: f64, date: NaiveDate) -> AppResult<()> {
        let mut state = self.receive(RecordedRequest::LogWeight { weight_kg, date })?;
        upsert_weight(
            &mut state.weights,
            WeightLog {
                weight: weight_kg,
                date,
                notes: None,
            },
        );
        Ok(())
    }

    async fn weight_history(&self, days: u32) -> AppResult<WeightHistory> {
        let state = self.receive(RecordedRequest::WeightHistory { days })?;
        let since = state
            .today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        let projected = state.goal.as_ref().map_or_else(Vec::new, |goal| {
            project_weights(goal, since, goal.target_date.unwrap_or(state.today))
        });
        Ok(WeightHistory {
            logs: state
                .weights
                .iter()
                .filter(|log| log.date >= since)
                .cloned()
                .collect(),
            goal: state.goal.clone(),
            projected,
        })
    }

    async fn goal_status(&self) -> AppResult<GoalSnapshot> {
        let state = self.receive(RecordedRequest::GoalStatus)?;
        let profile = &state.profile;
        let bmr = match (profile.weight_kg, profile.height_cm, profile.age) {
            (Some(weight), Some(height), Some(age)) => basal_metabolic_rate(
                weight,
                height,
                age,
                profile.gender.unwrap_or(Gender::Female),
            )
            .ok(),
            _ => None,
        };
        Ok(GoalSnapshot {
            goal: state.goal.clone(),
            latest_weight: latest_weight(&state.weights).cloned(),
            bmr,
            tdee: tdee_for_profile(profile),
        })
    }
}

#[async_trait]
impl ProfileStore for SyntheticBackend {
    async fn update_profile(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        let mut state = self.receive(RecordedRequest::UpdateProfile(profile.clone()))?;
        let stored = UserProfile {
            id: profile.id.or(state.profile.id),
            username: profile.username.clone().or_else(|| state.profile.username.clone()),
            ..profile.clone()
        };
        state.profile = stored.clone();
        Ok(stored)
    }
}

#[async_trait]
impl NotificationInbox for SyntheticBackend {
    async fn notifications(&self, limit: u32) -> AppResult<NotificationPage> {
        let state = self.receive(RecordedRequest::Notifications { limit })?;
        let mut notifications = state.notifications.clone();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        notifications.truncate(limit as usize);
        let unread_count = state
            .notifications
            .iter()
            .filter(|notification| !notification.is_read)
            .count() as u32;
        Ok(NotificationPage {
            notifications,
            unread_count,
        })
    }

    async fn mark_read(&self, id: i64) -> AppResult<()> {
        let mut state = self.receive(RecordedRequest::MarkRead(id))?;
        let notification = state
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id)
            .ok_or_else(|| AppError::not_found(format!("Notification {id}")))?;
        notification.is_read = true;
        Ok(())
    }

    async fn mark_all_read(&self) -> AppResult<()> {
        let mut state = self.receive(RecordedRequest::MarkAllRead)?;
        for notification in &mut state.notifications {
            notification.is_read = true;
        }
        Ok(())
    }
}
