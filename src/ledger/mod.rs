// ABOUTME: In-memory ledger of the foods logged on the active day
// ABOUTME: Entry storage, optimistic mutation commands, and derived aggregates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ledger
//!
//! Owns the food entries of exactly one calendar day. The ledger is replaced
//! wholesale on date navigation and mutated only through
//! [`commands::LedgerCommand`], which pairs each optimistic local change with
//! its persistence call and its compensating action.
//!
//! Aggregates are computed from the entry list on every call, so they cannot
//! drift from the entries they summarize.

/// Per-meal and daily totals
pub mod aggregates;

/// Add/edit/remove commands with persistence and undo
pub mod commands;

/// Food entries and nutrition scaling
pub mod entry;

use chrono::NaiveDate;
use tracing::warn;

use crate::models::NutritionFacts;
use crate::providers::core::LoggedMeal;

pub use aggregates::{daily_total, group_by_meal, MealAggregate, MealAggregates};
pub use commands::{AddFailurePolicy, LedgerCommand};
pub use entry::{adjust_nutrition, EntryId, FoodEntry, Serving};

/// Food entries of one day
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    date: NaiveDate,
    entries: Vec<FoodEntry>,
    unrecognized: Vec<LoggedMeal>,
}

impl Ledger {
    /// Empty ledger for `date`
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: Vec::new(),
            unrecognized: Vec::new(),
        }
    }

    /// Ledger rebuilt from persisted rows
    ///
    /// Rows with an unknown meal slot or a non-positive quantity are kept
    /// aside in [`Ledger::unrecognized`] and excluded from all totals.
    #[must_use]
    pub fn from_rows(date: NaiveDate, rows: Vec<LoggedMeal>) -> Self {
        let mut ledger = Self::new(date);
        for row in rows {
            if let Some(entry) = FoodEntry::from_logged(&row) {
                ledger.entries.push(entry);
            } else {
                warn!(
                    date = %date,
                    meal_slot = %row.meal_slot,
                    food = %row.name,
                    quantity = row.quantity_grams,
                    "Skipping meal row with unrecognized slot or quantity"
                );
                ledger.unrecognized.push(row);
            }
        }
        ledger
    }

    /// Day this ledger belongs to
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[FoodEntry] {
        &self.entries
    }

    /// Rows the server returned that could not be placed in a meal slot
    #[must_use]
    pub fn unrecognized(&self) -> &[LoggedMeal] {
        &self.unrecognized
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by id
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&FoodEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Whether an entry with `id` exists
    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn push(&mut self, entry: FoodEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn take(&mut self, id: EntryId) -> Option<(usize, FoodEntry)> {
        let index = self.entries.iter().position(|entry| entry.id() == id)?;
        Some((index, self.entries.remove(index)))
    }

    pub(crate) fn restore(&mut self, index: usize, entry: FoodEntry) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
    }

    /// Entries grouped into the six meal slots
    #[must_use]
    pub fn aggregates_by_meal(&self) -> MealAggregates<'_> {
        group_by_meal(&self.entries)
    }

    /// Totals across all meal slots
    #[must_use]
    pub fn daily_aggregate(&self) -> NutritionFacts {
        daily_total(&self.aggregates_by_meal())
    }
}
