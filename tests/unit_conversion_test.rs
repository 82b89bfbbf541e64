// ABOUTME: Unit tests for serving unit conversion and quantity stepping
// ABOUTME: Validates the multiplier table, unknown-unit fallback, and quantity input parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::approx_eq;
use mealtrack::intelligence::unit_conversion::{
    grams_for, grams_for_unit, parse_quantity, step_quantity,
};
use mealtrack::models::ServingUnit;

// ============================================================================
// Multiplier table
// ============================================================================

#[test]
fn test_known_unit_multipliers() {
    let cases = [
        ("g", 1.0),
        ("dkg", 10.0),
        ("kg", 1000.0),
        ("slice", 30.0),
        ("piece", 50.0),
        ("cup", 250.0),
    ];
    for (label, per_unit) in cases {
        assert!(
            approx_eq(grams_for(label, 2.0), 2.0 * per_unit, 1e-9),
            "unit {label}"
        );
    }
}

#[test]
fn test_labels_are_case_insensitive() {
    assert!(approx_eq(grams_for("DKG", 3.0), 30.0, 1e-9));
    assert!(approx_eq(grams_for(" Kg ", 0.5), 500.0, 1e-9));
}

#[test]
fn test_unknown_unit_is_treated_as_grams() {
    assert!(approx_eq(grams_for("handful", 42.0), 42.0, 1e-9));
    assert!(approx_eq(grams_for("", 7.5), 7.5, 1e-9));
}

#[test]
fn test_typed_units_match_labels() {
    for unit in ServingUnit::ALL {
        assert!(approx_eq(
            grams_for_unit(unit, 1.5),
            grams_for(unit.label(), 1.5),
            1e-9
        ));
        assert_eq!(ServingUnit::parse(unit.label()), Some(unit));
    }
}

// ============================================================================
// Quantity stepping and input
// ============================================================================

#[test]
fn test_step_uses_fine_increment_for_dkg_and_kg() {
    assert!(approx_eq(step_quantity(1.0, 1, ServingUnit::Kilogram), 1.1, 1e-9));
    assert!(approx_eq(step_quantity(2.5, -2, ServingUnit::Decagram), 2.3, 1e-9));
}

#[test]
fn test_step_uses_whole_increment_for_other_units() {
    assert!(approx_eq(step_quantity(100.0, 5, ServingUnit::Gram), 105.0, 1e-9));
    assert!(approx_eq(step_quantity(2.0, -1, ServingUnit::Slice), 1.0, 1e-9));
}

#[test]
fn test_step_never_goes_below_minimum() {
    assert!(approx_eq(step_quantity(1.0, -5, ServingUnit::Gram), 0.1, 1e-9));
    assert!(approx_eq(step_quantity(0.1, -1, ServingUnit::Kilogram), 0.1, 1e-9));
}

#[test]
fn test_repeated_fine_steps_do_not_drift() {
    let mut quantity = 0.1;
    for _ in 0..29 {
        quantity = step_quantity(quantity, 1, ServingUnit::Kilogram);
    }
    assert!(approx_eq(quantity, 3.0, 1e-9));
}

#[test]
fn test_quantity_input_parsing() {
    assert!(approx_eq(parse_quantity("150"), 150.0, 1e-9));
    assert!(approx_eq(parse_quantity("1,5"), 1.5, 1e-9));
    assert!(approx_eq(parse_quantity(" 2.25 "), 2.25, 1e-9));
    assert!(approx_eq(parse_quantity("0"), 0.1, 1e-9));
    assert!(approx_eq(parse_quantity("lots"), 0.1, 1e-9));
}
