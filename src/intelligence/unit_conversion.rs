// ABOUTME: Serving unit to gram conversion for the portion picker and ledger
// ABOUTME: Fixed multiplier table with a neutral default for unknown labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::units::{MIN_QUANTITY, UNKNOWN_UNIT_MULTIPLIER};
use crate::models::ServingUnit;

/// Round `value` to `places` decimal places, halves away from zero
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Grams represented by `quantity` of the unit labelled `unit`
///
/// Unknown labels use a multiplier of 1, so the quantity is taken as grams.
#[must_use]
pub fn grams_for(unit: &str, quantity: f64) -> f64 {
    ServingUnit::parse(unit).map_or(UNKNOWN_UNIT_MULTIPLIER, ServingUnit::grams_per_unit) * quantity
}

/// Grams represented by `quantity` of `unit`
#[must_use]
pub fn grams_for_unit(unit: ServingUnit, quantity: f64) -> f64 {
    unit.grams_per_unit() * quantity
}

/// Apply `delta` steps of the unit's increment, never going below 0.1
///
/// The result is rounded to one decimal so repeated 0.1 steps do not
/// accumulate floating point noise.
#[must_use]
pub fn step_quantity(current: f64, delta: i32, unit: ServingUnit) -> f64 {
    let stepped = f64::from(delta).mul_add(unit.step(), current).max(MIN_QUANTITY);
    round_to(stepped, 1)
}

/// Parse free-form quantity input, falling back to 0.1
///
/// A decimal comma is accepted.
#[must_use]
pub fn parse_quantity(input: &str) -> f64 {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|q| q.is_finite() && *q > 0.0)
        .unwrap_or(MIN_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert!((round_to(1.25, 1) - 1.3).abs() < f64::EPSILON);
        assert!((round_to(0.567, 2) - 0.57).abs() < f64::EPSILON);
        assert!((round_to(66.67, 0) - 67.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_quantity_fallbacks() {
        assert!((parse_quantity("abc") - 0.1).abs() < f64::EPSILON);
        assert!((parse_quantity("") - 0.1).abs() < f64::EPSILON);
        assert!((parse_quantity("-3") - 0.1).abs() < f64::EPSILON);
        assert!((parse_quantity("2,5") - 2.5).abs() < f64::EPSILON);
    }
}
