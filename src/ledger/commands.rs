// ABOUTME: Optimistic ledger mutations modelled as commands with compensating actions
// ABOUTME: Apply locally, persist through the meal log store, undo where defined on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppResult;
use crate::ledger::entry::{EntryId, FoodEntry, Serving};
use crate::ledger::Ledger;
use crate::models::MealSlot;
use crate::providers::core::{DeleteMealRequest, LogMealRequest, MealLogStore};

/// What to do with an optimistically added entry when persisting it fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddFailurePolicy {
    /// Keep the entry locally and surface the error
    #[default]
    KeepOptimistic,
    /// Remove the entry again and surface the error
    Rollback,
}

impl AddFailurePolicy {
    /// Parse policy from string, unknown values keep the optimistic entry
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "rollback" | "undo" => Self::Rollback,
            _ => Self::KeepOptimistic,
        }
    }
}

/// One optimistic ledger mutation
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCommand {
    /// Append a new entry
    Add {
        /// Entry to append
        entry: FoodEntry,
    },
    /// Replace an entry, keeping its id
    Edit {
        /// Entry before the change
        previous: FoodEntry,
        /// Entry after the change
        replacement: FoodEntry,
    },
    /// Remove an entry
    Remove {
        /// Removed entry
        entry: FoodEntry,
        /// Position it occupied, filled in by [`LedgerCommand::apply`]
        index: Option<usize>,
    },
}

impl LedgerCommand {
    /// Command appending `entry`
    #[must_use]
    pub const fn add(entry: FoodEntry) -> Self {
        Self::Add { entry }
    }

    /// Command replacing entry `id` with a new serving and slot
    ///
    /// Returns `Ok(None)` when no entry has that id.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the serving is not a positive gram amount
    pub fn edit(
        ledger: &Ledger,
        id: EntryId,
        serving: Serving,
        meal_slot: MealSlot,
    ) -> AppResult<Option<Self>> {
        let Some(previous) = ledger.get(id) else {
            return Ok(None);
        };
        let replacement = previous.with_changes(serving, meal_slot)?;
        Ok(Some(Self::Edit {
            previous: previous.clone(),
            replacement,
        }))
    }

    /// Command removing entry `id`, `None` when no entry has that id
    #[must_use]
    pub fn remove(ledger: &Ledger, id: EntryId) -> Option<Self> {
        ledger.get(id).map(|entry| Self::Remove {
            entry: entry.clone(),
            index: None,
        })
    }

    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Edit { .. } => "edit",
            Self::Remove { .. } => "remove",
        }
    }

    /// Id of the entry the command touches
    #[must_use]
    pub const fn entry_id(&self) -> EntryId {
        match self {
            Self::Add { entry } | Self::Remove { entry, .. } => entry.id(),
            Self::Edit { replacement, .. } => replacement.id(),
        }
    }

    /// Apply the change to local state
    ///
    /// An edit removes the previous entry and appends the replacement.
    pub fn apply(&mut self, ledger: &mut Ledger) {
        match self {
            Self::Add { entry } => ledger.push(entry.clone()),
            Self::Edit {
                previous,
                replacement,
            } => {
                if ledger.take(previous.id()).is_some() {
                    ledger.push(replacement.clone());
                }
            }
            Self::Remove { entry, index } => {
                *index = ledger.take(entry.id()).map(|(position, _)| position);
            }
        }
    }

    /// Persist the change through the meal log store
    ///
    /// An edit deletes the previous row, then logs the replacement.
    ///
    /// # Errors
    ///
    /// Returns the store's error when any request fails
    pub async fn persist(&self, store: &dyn MealLogStore, date: NaiveDate) -> AppResult<()> {
        match self {
            Self::Add { entry } => store.log_meal(&LogMealRequest::for_entry(entry, date)).await,
            Self::Edit {
                previous,
                replacement,
            } => {
                store
                    .delete_meal(&DeleteMealRequest::for_entry(previous, date))
                    .await?;
                store
                    .log_meal(&LogMealRequest::for_entry(replacement, date))
                    .await
            }
            Self::Remove { entry, .. } => {
                store
                    .delete_meal(&DeleteMealRequest::for_entry(entry, date))
                    .await
            }
        }
    }

    /// Undo the local change after a failed persist
    ///
    /// Removes are always undone by re-inserting the entry at its old
    /// position. Adds are rolled back only under [`AddFailurePolicy::Rollback`].
    /// Edits keep the replacement. Returns whether local state changed.
    pub fn compensate(&self, ledger: &mut Ledger, policy: AddFailurePolicy) -> bool {
        match self {
            Self::Add { entry } => match policy {
                AddFailurePolicy::Rollback => ledger.take(entry.id()).is_some(),
                AddFailurePolicy::KeepOptimistic => false,
            },
            Self::Edit { .. } => false,
            Self::Remove { entry, index } => match index {
                Some(index) if !ledger.contains(entry.id()) => {
                    ledger.restore(*index, entry.clone());
                    true
                }
                _ => false,
            },
        }
    }

    /// Apply, persist, and compensate on failure
    ///
    /// # Errors
    ///
    /// Returns the persistence error after compensation has run
    pub async fn execute(
        mut self,
        ledger: &mut Ledger,
        store: &dyn MealLogStore,
        policy: AddFailurePolicy,
    ) -> AppResult<Self> {
        self.apply(ledger);
        debug!(
            command = self.name(),
            entry_id = %self.entry_id(),
            date = %ledger.date(),
            "Applied ledger command"
        );

        match self.persist(store, ledger.date()).await {
            Ok(()) => Ok(self),
            Err(error) => {
                let compensated = self.compensate(ledger, policy);
                warn!(
                    command = self.name(),
                    entry_id = %self.entry_id(),
                    date = %ledger.date(),
                    compensated,
                    error = %error,
                    "Persisting ledger command failed"
                );
                Err(error)
            }
        }
    }
}
