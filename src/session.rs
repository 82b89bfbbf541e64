// ABOUTME: Explicit session state tying the ledger, picker, goals, profile, and inbox together
// ABOUTME: Every user-facing operation goes through a Session method; there is no global state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session
//!
//! A [`Session`] owns everything that was module-level state in a browser
//! client: the active date and its [`Ledger`], the open portion picker, the
//! user profile, the evaluated goal, the notification inbox, the goal form,
//! and the search controller. Collaborators are injected once at
//! construction.
//!
//! Validation always runs before any collaborator is contacted. Transport
//! failures are returned to the caller and leave the session usable.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::constants::limits::{MAX_LOGGED_WEIGHT_KG, MIN_LOGGED_WEIGHT_KG};
use crate::dates::shift_days;
use crate::errors::{AppError, AppResult};
use crate::goal_form::GoalForm;
use crate::inbox::Inbox;
use crate::intelligence::daily_progress::effective_calorie_budget;
use crate::intelligence::goal_progress::evaluate;
use crate::intelligence::{distribution_for, targets_for, DailyProgress, MacroTargets};
use crate::intelligence::portion_resolver::PortionPicker;
use crate::ledger::{
    AddFailurePolicy, EntryId, FoodEntry, Ledger, LedgerCommand, MealAggregates, Serving,
};
use crate::models::{
    CatalogFood, GoalStatus, GoalType, MealSlot, NutritionFacts, ServerPortion, UserProfile,
};
use crate::profile::ProfileSettings;
use crate::providers::core::{Collaborators, WeightHistory};
use crate::search::SearchController;

/// Reject body weights outside 30..=300 kg
///
/// # Errors
///
/// Returns `ValueOutOfRange` for weights outside the range or not finite
pub fn validate_logged_weight(weight_kg: f64) -> AppResult<f64> {
    if weight_kg.is_finite() && (MIN_LOGGED_WEIGHT_KG..=MAX_LOGGED_WEIGHT_KG).contains(&weight_kg)
    {
        Ok(weight_kg)
    } else {
        Err(AppError::value_out_of_range(format!(
            "Weight must be between {MIN_LOGGED_WEIGHT_KG} and {MAX_LOGGED_WEIGHT_KG} kg"
        ))
        .with_resource_id("weight"))
    }
}

/// What the open portion picker will produce when confirmed
#[derive(Debug, Clone, PartialEq)]
pub enum PickerTarget {
    /// A catalog food not yet in the ledger
    NewFood(CatalogFood),
    /// An existing ledger entry
    Entry(EntryId),
}

/// Portion picker opened for a food or an entry
#[derive(Debug, Clone)]
pub struct OpenPicker {
    /// What confirming produces
    pub target: PickerTarget,
    /// Meal slot the serving goes into
    pub meal_slot: MealSlot,
    /// Serving options and the active selection
    pub picker: PortionPicker,
}

impl OpenPicker {
    /// Serving currently selected
    #[must_use]
    pub const fn serving(&self) -> Serving {
        Serving::from_picker(
            self.picker.quantity(),
            self.picker.unit(),
            self.picker.grams(),
        )
    }
}

/// State of one user session
pub struct Session {
    collaborators: Collaborators,
    config: ClientConfig,
    today: NaiveDate,
    ledger: Ledger,
    profile: Option<UserProfile>,
    goal_status: Option<GoalStatus>,
    weight_history: WeightHistory,
    picker: Option<OpenPicker>,
    inbox: Inbox,
    goal_form: GoalForm,
    search: SearchController,
}

impl Session {
    /// Session with an empty ledger for `today`
    #[must_use]
    pub fn new(collaborators: Collaborators, config: ClientConfig, today: NaiveDate) -> Self {
        let search = SearchController::new(collaborators.catalog.clone(), &config);
        Self {
            collaborators,
            config,
            today,
            ledger: Ledger::new(today),
            profile: None,
            goal_status: None,
            weight_history: WeightHistory::default(),
            picker: None,
            inbox: Inbox::new(),
            goal_form: GoalForm::new(),
            search,
        }
    }

    /// Set the profile the server rendered the page with
    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    /// Move the session's notion of today, e.g. after midnight
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Configuration in effect
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current day
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Day the ledger shows
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.ledger.date()
    }

    /// Ledger of the active day
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Stored profile, if loaded
    #[must_use]
    pub const fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Evaluated goal, `None` without a stored goal
    #[must_use]
    pub const fn goal_status(&self) -> Option<&GoalStatus> {
        self.goal_status.as_ref()
    }

    /// Weight history fetched with the goal
    #[must_use]
    pub const fn weight_history(&self) -> &WeightHistory {
        &self.weight_history
    }

    /// Notification inbox
    #[must_use]
    pub const fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    /// Goal form
    #[must_use]
    pub const fn goal_form(&self) -> &GoalForm {
        &self.goal_form
    }

    /// Goal form for editing
    pub fn goal_form_mut(&mut self) -> &mut GoalForm {
        &mut self.goal_form
    }

    /// Food search controller
    #[must_use]
    pub const fn search(&self) -> &SearchController {
        &self.search
    }

    // ------------------------------------------------------------------
    // Date navigation
    // ------------------------------------------------------------------

    /// Replace the ledger with the rows stored for `date`
    ///
    /// # Errors
    ///
    /// Returns the meal log store's error; the current ledger is kept
    pub async fn load_day(&mut self, date: NaiveDate) -> AppResult<()> {
        let rows = self.collaborators.meals.meals_for_date(date).await?;
        let ledger = Ledger::from_rows(date, rows);
        debug!(
            date = %date,
            entries = ledger.len(),
            unrecognized = ledger.unrecognized().len(),
            "Loaded day"
        );
        self.ledger = ledger;
        self.picker = None;
        Ok(())
    }

    /// Move the active day by `delta` days
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` past the calendar range, or the store's error
    pub async fn change_date(&mut self, delta: i64) -> AppResult<()> {
        let date = shift_days(self.date(), delta).ok_or_else(|| {
            AppError::value_out_of_range(format!("Cannot move {delta} days from {}", self.date()))
        })?;
        self.load_day(date).await
    }

    /// Show today
    ///
    /// # Errors
    ///
    /// Returns the meal log store's error
    pub async fn go_to_today(&mut self) -> AppResult<()> {
        self.load_day(self.today).await
    }

    /// Show `date`, as picked from the calendar
    ///
    /// # Errors
    ///
    /// Returns the meal log store's error
    pub async fn select_date(&mut self, date: NaiveDate) -> AppResult<()> {
        self.load_day(date).await
    }

    // ------------------------------------------------------------------
    // Portion picker
    // ------------------------------------------------------------------

    /// Open portion picker, if any
    #[must_use]
    pub const fn picker(&self) -> Option<&OpenPicker> {
        self.picker.as_ref()
    }

    /// Open portion picker for changing the selection
    pub fn picker_mut(&mut self) -> Option<&mut OpenPicker> {
        self.picker.as_mut()
    }

    /// Close the picker without logging anything
    pub fn close_picker(&mut self) {
        self.picker = None;
    }

    async fn server_portions(&self, food_id: Option<&str>) -> Vec<ServerPortion> {
        let Some(food_id) = food_id else {
            return Vec::new();
        };
        match self.collaborators.portions.portions(food_id).await {
            Ok(portions) => portions,
            Err(e) => {
                warn!(food_id, error = %e, "Portion lookup failed, using default presets");
                Vec::new()
            }
        }
    }

    /// Open the picker for a catalog food, starting at 1 g
    ///
    /// A failed or empty portion lookup falls back to the built-in presets.
    pub async fn open_picker_for_food(&mut self, food: CatalogFood, meal_slot: MealSlot) {
        let portions = self.server_portions(food.id.as_deref()).await;
        self.picker = Some(OpenPicker {
            target: PickerTarget::NewFood(food),
            meal_slot,
            picker: PortionPicker::new(portions),
        });
    }

    /// Open the picker on an existing entry's serving
    ///
    /// Returns `false` when no entry has that id.
    pub async fn open_picker_for_entry(&mut self, id: EntryId) -> bool {
        let Some(entry) = self.ledger.get(id).cloned() else {
            return false;
        };
        let portions = self.server_portions(entry.food_id()).await;
        let serving = entry.serving();
        self.picker = Some(OpenPicker {
            target: PickerTarget::Entry(id),
            meal_slot: entry.meal_slot(),
            picker: PortionPicker::for_existing(
                serving.quantity(),
                serving.unit(),
                serving.grams(),
                portions,
            ),
        });
        true
    }

    /// Log the picker's serving and close it
    ///
    /// Returns the id of the added or edited entry, `None` when no picker is
    /// open or the edited entry has disappeared.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving the picker open, or the store's
    /// error after the optimistic change was applied
    pub async fn confirm_picker(&mut self) -> AppResult<Option<EntryId>> {
        let Some(open) = self.picker.clone() else {
            return Ok(None);
        };
        let serving = open.serving().validated()?;
        self.picker = None;
        match open.target {
            PickerTarget::NewFood(food) => self
                .add_entry(&food, serving, open.meal_slot)
                .await
                .map(Some),
            PickerTarget::Entry(id) => Ok(self
                .edit_entry(id, serving, open.meal_slot)
                .await?
                .then_some(id)),
        }
    }

    // ------------------------------------------------------------------
    // Ledger mutations
    // ------------------------------------------------------------------

    const fn add_failure_policy(&self) -> AddFailurePolicy {
        self.config.add_failure_policy
    }

    /// Add `serving` of `food` to `meal_slot` of the active day
    ///
    /// The entry is appended before the store confirms. Whether it stays after
    /// a failure depends on the configured [`AddFailurePolicy`].
    ///
    /// # Errors
    ///
    /// Returns a validation error without touching the ledger, or the store's error
    pub async fn add_entry(
        &mut self,
        food: &CatalogFood,
        serving: Serving,
        meal_slot: MealSlot,
    ) -> AppResult<EntryId> {
        let entry = FoodEntry::from_catalog(food, serving, meal_slot)?;
        let id = entry.id();
        let policy = self.add_failure_policy();
        LedgerCommand::add(entry)
            .execute(&mut self.ledger, self.collaborators.meals.as_ref(), policy)
            .await?;
        info!(
            entry_id = %id,
            meal_slot = %meal_slot,
            date = %self.date(),
            "Food logged"
        );
        Ok(id)
    }

    /// Change the serving and slot of entry `id`
    ///
    /// Returns `false` without any request when no entry has that id.
    ///
    /// # Errors
    ///
    /// Returns a validation error without touching the ledger, or the store's error
    pub async fn edit_entry(
        &mut self,
        id: EntryId,
        serving: Serving,
        meal_slot: MealSlot,
    ) -> AppResult<bool> {
        let Some(command) = LedgerCommand::edit(&self.ledger, id, serving, meal_slot)? else {
            return Ok(false);
        };
        let policy = self.add_failure_policy();
        command
            .execute(&mut self.ledger, self.collaborators.meals.as_ref(), policy)
            .await?;
        Ok(true)
    }

    /// Remove entry `id`
    ///
    /// Returns `false` without any request when no entry has that id. On
    /// failure the entry is put back where it was.
    ///
    /// # Errors
    ///
    /// Returns the store's error after the entry was restored
    pub async fn remove_entry(&mut self, id: EntryId) -> AppResult<bool> {
        let Some(command) = LedgerCommand::remove(&self.ledger, id) else {
            debug!(entry_id = %id, "Remove ignored, entry not in ledger");
            return Ok(false);
        };
        let policy = self.add_failure_policy();
        command
            .execute(&mut self.ledger, self.collaborators.meals.as_ref(), policy)
            .await?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Aggregates and targets
    // ------------------------------------------------------------------

    /// Entries and totals per meal slot
    #[must_use]
    pub fn aggregates_by_meal(&self) -> MealAggregates<'_> {
        self.ledger.aggregates_by_meal()
    }

    /// Totals of the active day
    #[must_use]
    pub fn daily_aggregate(&self) -> NutritionFacts {
        self.ledger.daily_aggregate()
    }

    /// Daily calorie budget in effect
    #[must_use]
    pub fn calorie_budget(&self) -> u32 {
        effective_calorie_budget(
            self.goal_status.as_ref(),
            self.profile.as_ref(),
            self.config.default_calorie_goal,
        )
    }

    /// Macro gram targets for the calorie budget
    #[must_use]
    pub fn macro_targets(&self) -> MacroTargets {
        targets_for(self.calorie_budget(), distribution_for(self.profile.as_ref()))
    }

    /// Dashboard figures for the active day
    #[must_use]
    pub fn daily_progress(&self) -> DailyProgress {
        DailyProgress::compute(
            &self.daily_aggregate(),
            self.calorie_budget(),
            &self.macro_targets(),
        )
    }

    // ------------------------------------------------------------------
    // Goals and weight
    // ------------------------------------------------------------------

    /// Fetch the stored goal and weight history and evaluate progress
    ///
    /// # Errors
    ///
    /// Returns the goal store's error; the previous status is kept
    pub async fn refresh_goal(&mut self) -> AppResult<()> {
        let snapshot = self.collaborators.goals.goal_status().await?;
        let mut history = self
            .collaborators
            .goals
            .weight_history(self.config.weight_history_days)
            .await?;

        if let Some(latest) = snapshot.latest_weight {
            if !history.logs.iter().any(|log| log.date >= latest.date) {
                history.logs.push(latest);
            }
        }

        self.goal_status = snapshot
            .goal
            .as_ref()
            .map(|goal| evaluate(goal, &history.logs, self.today));
        debug!(
            has_goal = self.goal_status.is_some(),
            weight_logs = history.logs.len(),
            "Goal status refreshed"
        );
        self.weight_history = history;
        Ok(())
    }

    /// Log today's body weight, then refresh the goal
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` without any request for weights outside
    /// 30..=300 kg, or the goal store's error
    pub async fn log_weight(&mut self, weight_kg: f64) -> AppResult<()> {
        let weight_kg = validate_logged_weight(weight_kg)?;
        self.collaborators
            .goals
            .log_weight(weight_kg, self.today)
            .await?;
        info!(weight_kg, date = %self.today, "Weight logged");
        self.refresh_goal().await
    }

    /// Choose a goal type on the form
    pub fn select_goal_type(&mut self, goal_type: GoalType) {
        self.goal_form.select_type(goal_type, self.today);
    }

    /// Submit the goal form, then refresh the goal
    ///
    /// # Errors
    ///
    /// Returns a validation error without any request, or a collaborator error
    pub async fn submit_goal(&mut self) -> AppResult<Option<u32>> {
        let target = self
            .goal_form
            .submit(self.collaborators.goals.as_ref())
            .await?;
        self.refresh_goal().await?;
        Ok(target)
    }

    // ------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------

    /// Settings form prefilled from the stored profile
    #[must_use]
    pub fn profile_settings(&self) -> ProfileSettings {
        self.profile
            .as_ref()
            .map_or_else(ProfileSettings::default, ProfileSettings::from_profile)
    }

    /// Save profile settings and adopt the stored result
    ///
    /// # Errors
    ///
    /// Returns a validation error without any request, or the store's error
    pub async fn save_profile(&mut self, settings: &ProfileSettings) -> AppResult<()> {
        let base = self.profile.clone().unwrap_or_default();
        let update = settings.to_update(&base)?;
        let saved = self.collaborators.profile.update_profile(&update).await?;
        info!(preset = saved.preset().as_str(), "Profile saved");
        self.profile = Some(saved);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    /// Load the latest notifications
    ///
    /// # Errors
    ///
    /// Returns the inbox collaborator's error
    pub async fn load_notifications(&mut self) -> AppResult<()> {
        let limit = self.config.notification_limit;
        self.inbox
            .load(self.collaborators.inbox.as_ref(), limit)
            .await
    }

    /// Mark one notification read
    ///
    /// # Errors
    ///
    /// Returns the inbox collaborator's error
    pub async fn mark_notification_read(&mut self, id: i64) -> AppResult<()> {
        self.inbox
            .mark_read(self.collaborators.inbox.as_ref(), id)
            .await
    }

    /// Mark every notification read
    ///
    /// # Errors
    ///
    /// Returns the inbox collaborator's error
    pub async fn mark_all_notifications_read(&mut self) -> AppResult<()> {
        self.inbox
            .mark_all_read(self.collaborators.inbox.as_ref())
            .await
    }
}
