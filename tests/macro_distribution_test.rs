// ABOUTME: Unit tests for macro distribution resolution and gram targets
// ABOUTME: Validates presets, custom splits, sum validation, and documented rounding tolerance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use mealtrack::constants::nutrition::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use mealtrack::errors::ErrorCode;
use mealtrack::intelligence::macro_distribution::{
    distribution_for, preset_distribution, targets_for, validate_distribution,
};
use mealtrack::models::{MacroDistribution, MacroPreset, UserProfile};

fn custom_profile(carbs: Option<u8>, protein: Option<u8>, fat: Option<u8>) -> UserProfile {
    UserProfile {
        macro_preset: Some(MacroPreset::Custom),
        custom_carbs_pct: carbs,
        custom_protein_pct: protein,
        custom_fat_pct: fat,
        ..UserProfile::default()
    }
}

// ============================================================================
// Distribution resolution
// ============================================================================

#[test]
fn test_no_profile_is_balanced() {
    assert_eq!(distribution_for(None), MacroDistribution::new(40, 30, 30));
}

#[test]
fn test_named_presets() {
    let cases = [
        (MacroPreset::Balanced, (40, 30, 30)),
        (MacroPreset::LowCarb, (20, 40, 40)),
        (MacroPreset::HighProtein, (30, 40, 30)),
        (MacroPreset::Keto, (5, 25, 70)),
        (MacroPreset::Mediterranean, (45, 20, 35)),
    ];
    for (preset, split) in cases {
        let profile = UserProfile {
            macro_preset: Some(preset),
            ..UserProfile::default()
        };
        assert_eq!(
            distribution_for(Some(&profile)),
            MacroDistribution::from_tuple(split),
            "{preset:?}"
        );
        assert_eq!(preset_distribution(preset).total(), 100);
    }
}

#[test]
fn test_unknown_preset_name_falls_back_to_balanced() {
    assert_eq!(MacroPreset::from_str_lossy("paleo"), MacroPreset::Balanced);
    assert_eq!(MacroPreset::from_str_lossy("high-protein"), MacroPreset::HighProtein);
}

#[test]
fn test_custom_uses_stored_percentages() {
    let profile = custom_profile(Some(50), Some(25), Some(25));
    assert_eq!(
        distribution_for(Some(&profile)),
        MacroDistribution::new(50, 25, 25)
    );
}

#[test]
fn test_custom_missing_values_use_balanced_defaults() {
    let profile = custom_profile(Some(50), None, None);
    assert_eq!(
        distribution_for(Some(&profile)),
        MacroDistribution::new(50, 30, 30)
    );
}

#[test]
fn test_custom_zero_is_kept() {
    let profile = custom_profile(Some(0), Some(40), Some(60));
    assert_eq!(
        distribution_for(Some(&profile)),
        MacroDistribution::new(0, 40, 60)
    );
}

// ============================================================================
// Custom split validation
// ============================================================================

#[test]
fn test_split_within_one_point_is_valid() {
    for split in [(40, 30, 30), (40, 30, 29), (40, 30, 31)] {
        assert!(validate_distribution(MacroDistribution::from_tuple(split)).is_ok());
    }
}

#[test]
fn test_split_off_by_more_than_one_point_is_rejected() {
    for split in [(40, 30, 28), (50, 30, 22), (0, 0, 0)] {
        let error = validate_distribution(MacroDistribution::from_tuple(split)).unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        assert!(error.is_validation());
    }
}

// ============================================================================
// Gram targets
// ============================================================================

#[test]
fn test_balanced_targets_for_2000_kcal() {
    let targets = targets_for(2000, MacroDistribution::new(40, 30, 30));
    assert_eq!(targets.carbs.grams, 200);
    assert_eq!(targets.protein.grams, 150);
    // 600 kcal / 9 = 66.67, rounded
    assert_eq!(targets.fat.grams, 67);
    assert_eq!(targets.carbs.percent, 40);
}

#[test]
fn test_zero_budget_gives_zero_targets() {
    let targets = targets_for(0, MacroDistribution::new(40, 30, 30));
    assert_eq!(targets.carbs.grams + targets.protein.grams + targets.fat.grams, 0);
}

/// Each macro is rounded independently, so calories rebuilt from the gram
/// targets may miss the budget. The error is bounded by half a gram per macro.
#[test]
fn test_rebuilt_calories_stay_within_rounding_tolerance() {
    let tolerance = 0.5 * (KCAL_PER_G_CARBS + KCAL_PER_G_PROTEIN + KCAL_PER_G_FAT);
    let splits = [(40, 30, 30), (5, 25, 70), (45, 20, 35), (33, 33, 34)];
    for budget in [1200_u32, 1777, 2000, 2650, 3999] {
        for split in splits {
            let targets = targets_for(budget, MacroDistribution::from_tuple(split));
            let rebuilt = f64::from(targets.carbs.grams).mul_add(
                KCAL_PER_G_CARBS,
                f64::from(targets.protein.grams)
                    .mul_add(KCAL_PER_G_PROTEIN, f64::from(targets.fat.grams) * KCAL_PER_G_FAT),
            );
            assert!(
                (rebuilt - f64::from(budget)).abs() <= tolerance,
                "budget {budget} split {split:?} rebuilt {rebuilt}"
            );
        }
    }
}
