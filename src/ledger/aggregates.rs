// ABOUTME: Per-meal and daily nutrition totals derived from ledger entries
// ABOUTME: Always recomputed from the current entries, never maintained incrementally
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use crate::ledger::entry::FoodEntry;
use crate::models::{MealSlot, NutritionFacts};

/// Entries and totals of one meal slot
#[derive(Debug, Clone, PartialEq)]
pub struct MealAggregate<'a> {
    /// Slot
    pub slot: MealSlot,
    /// Summed adjusted nutrition
    pub totals: NutritionFacts,
    /// Entries in the slot, in ledger order
    pub entries: Vec<&'a FoodEntry>,
}

impl MealAggregate<'_> {
    /// Whether nothing was logged in this slot
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All six slots keyed in display order
pub type MealAggregates<'a> = BTreeMap<MealSlot, MealAggregate<'a>>;

/// Group `entries` into the six meal slots
///
/// Every slot is present, empty ones with zero totals.
#[must_use]
pub fn group_by_meal(entries: &[FoodEntry]) -> MealAggregates<'_> {
    let mut groups: MealAggregates<'_> = MealSlot::ALL
        .into_iter()
        .map(|slot| {
            (
                slot,
                MealAggregate {
                    slot,
                    totals: NutritionFacts::ZERO,
                    entries: Vec::new(),
                },
            )
        })
        .collect();

    for entry in entries {
        if let Some(group) = groups.get_mut(&entry.meal_slot()) {
            group.totals += entry.adjusted_nutrition();
            group.entries.push(entry);
        }
    }
    groups
}

/// Sum of the per-meal totals
#[must_use]
pub fn daily_total(groups: &MealAggregates<'_>) -> NutritionFacts {
    groups.values().map(|group| group.totals).sum()
}
