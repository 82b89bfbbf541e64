// ABOUTME: Integration tests for the food ledger, its aggregates, and its commands
// ABOUTME: Validates nutrition scaling, per-meal totals, optimistic updates, and compensation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{apple, approx_eq, chicken_breast, oats, seeded_backend, today};
use mealtrack::errors::{AppResult, ErrorCode};
use mealtrack::ledger::{
    adjust_nutrition, AddFailurePolicy, FoodEntry, Ledger, LedgerCommand, Serving,
};
use mealtrack::models::{CatalogFood, MealSlot, NutritionFacts, ServingUnit};
use mealtrack::providers::core::LoggedMeal;
use mealtrack::providers::synthetic::{Operation, RecordedRequest, SyntheticBackend};

async fn add(
    ledger: &mut Ledger,
    backend: &SyntheticBackend,
    entry: FoodEntry,
) -> AppResult<LedgerCommand> {
    LedgerCommand::add(entry)
        .execute(ledger, backend, AddFailurePolicy::KeepOptimistic)
        .await
}

fn entry(food: &CatalogFood, grams: f64, slot: MealSlot) -> FoodEntry {
    FoodEntry::from_catalog(food, Serving::in_grams(grams), slot).unwrap()
}

// ============================================================================
// Entries and derived nutrition
// ============================================================================

#[test]
fn test_adjusted_nutrition_scales_and_rounds() {
    let facts = adjust_nutrition(NutritionFacts::new(52.0, 0.3, 14.0, 0.2), 150.0);
    assert!(approx_eq(facts.calories, 78.0, 1e-9));
    assert!(approx_eq(facts.protein, 0.5, 1e-9));
    assert!(approx_eq(facts.carbs, 21.0, 1e-9));
    assert!(approx_eq(facts.fat, 0.3, 1e-9));
}

#[test]
fn test_entry_nutrition_matches_formula() {
    for grams in [1.0, 37.5, 100.0, 150.0, 333.0] {
        let food = oats();
        let logged = entry(&food, grams, MealSlot::Breakfast);
        let facts = logged.adjusted_nutrition();
        let factor = grams / 100.0;
        assert!(approx_eq(
            facts.calories,
            (food.per_100g.calories * factor).round(),
            1e-9
        ));
        assert!(approx_eq(
            facts.protein,
            (food.per_100g.protein * factor * 10.0).round() / 10.0,
            1e-9
        ));
    }
}

#[test]
fn test_serving_units_convert_to_grams() {
    let logged = FoodEntry::from_catalog(
        &apple(),
        Serving::of(2.0, ServingUnit::Piece),
        MealSlot::MorningSnack,
    )
    .unwrap();
    assert!(approx_eq(logged.quantity_grams(), 100.0, 1e-9));
    assert_eq!(logged.serving().unit(), ServingUnit::Piece);
}

#[test]
fn test_non_positive_serving_is_rejected() {
    for grams in [0.0, -5.0, f64::NAN] {
        let error = FoodEntry::from_catalog(&apple(), Serving::in_grams(grams), MealSlot::Lunch)
            .unwrap_err();
        assert!(error.is_validation());
    }
}

#[test]
fn test_malformed_base_nutrition_counts_as_zero() {
    let mut food = apple();
    food.per_100g = NutritionFacts::new(f64::NAN, -3.0, 14.0, f64::INFINITY);
    let logged = entry(&food, 100.0, MealSlot::Lunch);
    let facts = logged.adjusted_nutrition();
    assert!(approx_eq(facts.calories, 0.0, 1e-9));
    assert!(approx_eq(facts.protein, 0.0, 1e-9));
    assert!(approx_eq(facts.carbs, 14.0, 1e-9));
    assert!(approx_eq(facts.fat, 0.0, 1e-9));
}

// ============================================================================
// Loading rows
// ============================================================================

fn row(slot: &str, grams: f64, calories: f64) -> LoggedMeal {
    LoggedMeal {
        food_id: Some("9".to_owned()),
        name: "Row food".to_owned(),
        meal_slot: slot.to_owned(),
        quantity_grams: grams,
        totals: NutritionFacts::new(calories, 10.0, 20.0, 5.0),
        logged_at: None,
    }
}

#[test]
fn test_rows_recover_base_nutrition() {
    let ledger = Ledger::from_rows(today(), vec![row("ebed", 200.0, 300.0)]);
    assert_eq!(ledger.len(), 1);
    let logged = &ledger.entries()[0];
    assert_eq!(logged.meal_slot(), MealSlot::Lunch);
    assert!(approx_eq(logged.base_nutrition().calories, 150.0, 1e-9));
    assert!(approx_eq(logged.adjusted_nutrition().calories, 300.0, 1e-9));
}

#[test]
fn test_tiny_rows_keep_their_stored_totals() {
    let ledger = Ledger::from_rows(today(), vec![row("vacsora", 0.1, 20.0)]);
    let logged = &ledger.entries()[0];
    assert!(approx_eq(logged.base_nutrition().calories, 20_000.0, 1e-6));
    let facts = logged.adjusted_nutrition();
    assert!(approx_eq(facts.calories, 20.0, 1e-6));
    assert!(approx_eq(facts.protein, 10.0, 1e-6));
    assert!(approx_eq(ledger.daily_aggregate().calories, 20.0, 1e-6));
}

#[test]
fn test_unknown_slot_rows_are_kept_aside() {
    let rows = vec![
        row("reggeli", 100.0, 100.0),
        row("brunch", 100.0, 999.0),
        row("dinner", 0.0, 50.0),
    ];
    let ledger = Ledger::from_rows(today(), rows);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.unrecognized().len(), 2);
    assert!(approx_eq(ledger.daily_aggregate().calories, 100.0, 1e-9));
}

// ============================================================================
// Aggregates
// ============================================================================

#[tokio::test]
async fn test_every_slot_is_present_and_sums_match() {
    let backend = seeded_backend();
    let mut ledger = Ledger::new(today());
    add(&mut ledger, &backend, entry(&oats(), 60.0, MealSlot::Breakfast)).await.unwrap();
    add(&mut ledger, &backend, entry(&apple(), 150.0, MealSlot::Breakfast)).await.unwrap();
    add(&mut ledger, &backend, entry(&chicken_breast(), 180.0, MealSlot::Dinner)).await.unwrap();

    let meals = ledger.aggregates_by_meal();
    assert_eq!(meals.len(), 6);
    assert_eq!(meals[&MealSlot::Breakfast].entries.len(), 2);
    assert!(meals[&MealSlot::Lunch].is_empty());
    assert_eq!(meals[&MealSlot::Lunch].totals, NutritionFacts::ZERO);

    let summed: NutritionFacts = meals.values().map(|meal| meal.totals).sum();
    assert_eq!(summed, ledger.daily_aggregate());
}

#[tokio::test]
async fn test_totals_do_not_depend_on_insertion_order() {
    let backend = seeded_backend();
    let items = [
        (oats(), 45.0, MealSlot::Breakfast),
        (apple(), 130.0, MealSlot::AfternoonSnack),
        (chicken_breast(), 210.0, MealSlot::Lunch),
        (apple(), 90.0, MealSlot::Extra),
    ];

    let mut forward = Ledger::new(today());
    for (food, grams, slot) in &items {
        add(&mut forward, &backend, entry(food, *grams, *slot)).await.unwrap();
    }
    let mut backward = Ledger::new(today());
    for (food, grams, slot) in items.iter().rev() {
        add(&mut backward, &backend, entry(food, *grams, *slot)).await.unwrap();
    }

    let a = forward.daily_aggregate();
    let b = backward.daily_aggregate();
    assert!(approx_eq(a.calories, b.calories, 1e-9));
    assert!(approx_eq(a.protein, b.protein, 1e-9));
    assert!(approx_eq(a.carbs, b.carbs, 1e-9));
    assert!(approx_eq(a.fat, b.fat, 1e-9));
}

// ============================================================================
// Commands
// ============================================================================

#[tokio::test]
async fn test_add_persists_with_wire_slot() {
    let backend = seeded_backend();
    let mut ledger = Ledger::new(today());
    add(&mut ledger, &backend, entry(&apple(), 150.0, MealSlot::Lunch)).await.unwrap();

    let rows = backend.meal_rows(today()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].meal_slot, "ebed");
    assert!(approx_eq(rows[0].quantity_grams, 150.0, 1e-9));
    assert!(approx_eq(rows[0].totals.calories, 78.0, 1e-9));
}

#[tokio::test]
async fn test_failed_add_keeps_optimistic_entry_by_default() {
    let backend = seeded_backend();
    backend.fail(Operation::LogMeal).unwrap();
    let mut ledger = Ledger::new(today());

    let error = add(&mut ledger, &backend, entry(&apple(), 100.0, MealSlot::Lunch))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert_eq!(ledger.len(), 1);
    assert!(backend.meal_rows(today()).unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_add_rolls_back_when_configured() {
    let backend = seeded_backend();
    backend.fail(Operation::LogMeal).unwrap();
    let mut ledger = Ledger::new(today());

    let result = LedgerCommand::add(entry(&apple(), 100.0, MealSlot::Lunch))
        .execute(&mut ledger, backend.as_ref(), AddFailurePolicy::Rollback)
        .await;
    assert!(result.is_err());
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_remove_unknown_id_is_noop() {
    let backend = seeded_backend();
    let mut ledger = Ledger::new(today());
    add(&mut ledger, &backend, entry(&apple(), 100.0, MealSlot::Lunch)).await.unwrap();

    let stranger = entry(&apple(), 100.0, MealSlot::Lunch);
    assert!(LedgerCommand::remove(&ledger, stranger.id()).is_none());
    assert_eq!(backend.request_count(Operation::DeleteMeal).unwrap(), 0);
    assert_eq!(ledger.len(), 1);
}

#[tokio::test]
async fn test_failed_remove_restores_entry_in_place() {
    let backend = seeded_backend();
    let mut ledger = Ledger::new(today());
    for food in [oats(), apple(), chicken_breast()] {
        add(&mut ledger, &backend, entry(&food, 100.0, MealSlot::Lunch)).await.unwrap();
    }
    let before: Vec<_> = ledger.entries().iter().map(FoodEntry::id).collect();
    backend.fail(Operation::DeleteMeal).unwrap();

    let command = LedgerCommand::remove(&ledger, before[1]).unwrap();
    let result = command
        .execute(&mut ledger, backend.as_ref(), AddFailurePolicy::KeepOptimistic)
        .await;

    assert!(result.is_err());
    let after: Vec<_> = ledger.entries().iter().map(FoodEntry::id).collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_remove_deletes_row() {
    let backend = seeded_backend();
    let mut ledger = Ledger::new(today());
    add(&mut ledger, &backend, entry(&apple(), 120.0, MealSlot::Dinner)).await.unwrap();
    let id = ledger.entries()[0].id();

    LedgerCommand::remove(&ledger, id)
        .unwrap()
        .execute(&mut ledger, backend.as_ref(), AddFailurePolicy::KeepOptimistic)
        .await
        .unwrap();
    assert!(ledger.is_empty());
    assert!(backend.meal_rows(today()).unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_changes_only_that_entry() {
    let backend = seeded_backend();
    let mut ledger = Ledger::new(today());
    add(&mut ledger, &backend, entry(&apple(), 100.0, MealSlot::Lunch)).await.unwrap();
    add(&mut ledger, &backend, entry(&oats(), 50.0, MealSlot::Breakfast)).await.unwrap();
    let apple_id = ledger.entries()[0].id();
    let oats_before = ledger.entries()[1].clone();

    LedgerCommand::edit(&ledger, apple_id, Serving::in_grams(200.0), MealSlot::Dinner)
        .unwrap()
        .unwrap()
        .execute(&mut ledger, backend.as_ref(), AddFailurePolicy::KeepOptimistic)
        .await
        .unwrap();

    assert_eq!(ledger.len(), 2);
    let edited = ledger.get(apple_id).unwrap();
    assert_eq!(edited.meal_slot(), MealSlot::Dinner);
    assert!(approx_eq(edited.adjusted_nutrition().calories, 104.0, 1e-9));
    assert_eq!(ledger.get(oats_before.id()), Some(&oats_before));

    let requests = backend.requests().unwrap();
    let tail: Vec<Operation> = requests
        .iter()
        .rev()
        .take(2)
        .map(RecordedRequest::operation)
        .collect();
    assert_eq!(tail, vec![Operation::LogMeal, Operation::DeleteMeal]);
}

#[tokio::test]
async fn test_edit_unknown_id_returns_none() {
    let ledger = Ledger::new(today());
    let stranger = entry(&apple(), 100.0, MealSlot::Lunch);
    let command =
        LedgerCommand::edit(&ledger, stranger.id(), Serving::in_grams(10.0), MealSlot::Lunch).unwrap();
    assert!(command.is_none());
}

#[tokio::test]
async fn test_edit_with_invalid_serving_is_rejected_before_persisting() {
    let backend = seeded_backend();
    let mut ledger = Ledger::new(today());
    add(&mut ledger, &backend, entry(&apple(), 100.0, MealSlot::Lunch)).await.unwrap();
    let id = ledger.entries()[0].id();
    let requests_before = backend.requests().unwrap().len();

    let error = LedgerCommand::edit(&ledger, id, Serving::in_grams(0.0), MealSlot::Lunch).unwrap_err();
    assert!(error.is_validation());
    assert_eq!(backend.requests().unwrap().len(), requests_before);
}
