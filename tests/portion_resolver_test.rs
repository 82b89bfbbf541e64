// ABOUTME: Unit tests for portion option resolution and the portion picker
// ABOUTME: Validates unit thresholds, preset fallbacks, single selection, and idempotence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::approx_eq;
use mealtrack::intelligence::portion_resolver::{
    resolve_options, PortionKind, PortionOption, PortionPicker,
};
use mealtrack::models::{ServerPortion, ServingUnit};

fn portion(label: &str, weight_grams: f64) -> ServerPortion {
    ServerPortion {
        label: label.to_owned(),
        weight_grams,
    }
}

fn labels(options: &[PortionOption]) -> Vec<&str> {
    options.iter().map(|option| option.label.as_str()).collect()
}

fn selected_count(picker: &PortionPicker) -> usize {
    picker.options().iter().filter(|option| option.selected).count()
}

// ============================================================================
// Option list
// ============================================================================

#[test]
fn test_small_quantity_has_no_dkg_option() {
    let options = resolve_options(5.0, &[]);
    assert_eq!(labels(&options), vec!["g", "small", "medium", "large"]);
    assert!(!labels(&options).contains(&"dkg"));
}

#[test]
fn test_dkg_option_from_ten_grams() {
    let options = resolve_options(10.0, &[]);
    assert_eq!(options[1].label, "dkg");
    assert!(approx_eq(options[1].value, 1.0, 1e-9));
    assert!(approx_eq(options[1].grams, 10.0, 1e-9));
}

#[test]
fn test_large_quantity_adds_kg_option_last() {
    let options = resolve_options(600.0, &[]);
    let last = options.last().unwrap();
    assert_eq!(last.label, "kg");
    assert_eq!(last.kind, PortionKind::UnitBased);
    assert!(approx_eq(last.value, 0.6, 1e-9));
    assert!(approx_eq(last.grams, 600.0, 1e-9));
}

#[test]
fn test_large_preset_adds_kg_option() {
    let options = resolve_options(100.0, &[portion("whole cake", 900.0)]);
    assert_eq!(labels(&options), vec!["g", "dkg", "whole cake", "kg"]);
}

#[test]
fn test_server_presets_replace_fallbacks_and_are_capped() {
    let server = [
        portion("slice", 30.0),
        portion("bad", 0.0),
        portion("cup", 240.0),
        portion("tbsp", 15.0),
        portion("tsp", 5.0),
        portion("bowl", 350.0),
    ];
    let options = resolve_options(50.0, &server);
    assert_eq!(labels(&options), vec!["g", "dkg", "slice", "cup", "tbsp", "tsp"]);
    assert!(options
        .iter()
        .skip(2)
        .all(|option| option.kind == PortionKind::PresetBased));
}

#[test]
fn test_fallback_preset_weights() {
    let options = resolve_options(1.0, &[]);
    let weights: Vec<f64> = options.iter().skip(1).map(|option| option.grams).collect();
    assert_eq!(weights, vec![80.0, 150.0, 220.0]);
}

#[test]
fn test_resolution_is_idempotent() {
    let server = [portion("slice", 30.0), portion("loaf", 800.0)];
    let first = resolve_options(250.0, &server);
    let second = resolve_options(250.0, &server);
    assert_eq!(first, second);
}

// ============================================================================
// Picker selection
// ============================================================================

#[test]
fn test_new_picker_starts_at_one_gram() {
    let picker = PortionPicker::new(Vec::new());
    assert!(approx_eq(picker.grams(), 1.0, 1e-9));
    assert_eq!(picker.unit(), ServingUnit::Gram);
    assert_eq!(selected_count(&picker), 1);
    assert_eq!(picker.selected().unwrap().label, "g");
}

#[test]
fn test_selecting_preset_sets_grams() {
    let mut picker = PortionPicker::new(Vec::new());
    let medium = picker
        .options()
        .iter()
        .position(|option| option.label == "medium")
        .unwrap();
    assert!(picker.select(medium));
    assert!(approx_eq(picker.grams(), 150.0, 1e-9));
    assert_eq!(picker.selected().unwrap().label, "medium");
    assert_eq!(selected_count(&picker), 1);
}

#[test]
fn test_selecting_unit_keeps_grams() {
    let mut picker = PortionPicker::new(Vec::new());
    picker.set_quantity_input("250");
    let dkg = picker
        .options()
        .iter()
        .position(|option| option.label == "dkg")
        .unwrap();
    assert!(picker.select(dkg));
    assert_eq!(picker.unit(), ServingUnit::Decagram);
    assert!(approx_eq(picker.quantity(), 25.0, 1e-9));
    assert!(approx_eq(picker.grams(), 250.0, 1e-9));
    assert_eq!(picker.selected().unwrap().label, "dkg");
}

#[test]
fn test_out_of_range_selection_is_rejected() {
    let mut picker = PortionPicker::new(Vec::new());
    let before = picker.options().to_vec();
    assert!(!picker.select(99));
    assert_eq!(picker.options(), before.as_slice());
}

#[test]
fn test_selecting_twice_is_stable() {
    let slice_index = |picker: &PortionPicker| {
        picker
            .options()
            .iter()
            .position(|option| option.label == "slice")
            .unwrap()
    };
    let mut picker = PortionPicker::new(vec![portion("slice", 30.0)]);
    assert!(picker.select(slice_index(&picker)));
    let once = picker.options().to_vec();
    assert!(picker.select(slice_index(&picker)));
    assert_eq!(picker.options(), once.as_slice());
    assert_eq!(picker.selected().unwrap().label, "slice");
}

#[test]
fn test_manual_edit_clears_preset_choice() {
    let mut picker = PortionPicker::new(Vec::new());
    assert!(picker.select(2));
    assert_eq!(picker.selected().unwrap().label, "medium");
    picker.adjust(1);
    assert!(approx_eq(picker.grams(), 151.0, 1e-9));
    assert_eq!(picker.selected().unwrap().label, "g");
    assert_eq!(selected_count(&picker), 1);
}

#[test]
fn test_kg_stepping_updates_grams() {
    let mut picker = PortionPicker::new(Vec::new());
    picker.set_quantity_input("1200");
    let kg = picker
        .options()
        .iter()
        .position(|option| option.label == "kg")
        .unwrap();
    assert!(picker.select(kg));
    picker.adjust(-2);
    assert!(approx_eq(picker.quantity(), 1.0, 1e-9));
    assert!(approx_eq(picker.grams(), 1000.0, 1e-9));
}

#[test]
fn test_existing_entry_restores_unit() {
    let picker = PortionPicker::for_existing(3.0, ServingUnit::Decagram, 30.0, Vec::new());
    assert_eq!(picker.selected().unwrap().label, "dkg");
    assert!(approx_eq(picker.grams(), 30.0, 1e-9));
}

#[test]
fn test_late_server_portions_refresh_options() {
    let mut picker = PortionPicker::new(Vec::new());
    picker.set_server_portions(vec![portion("scoop", 40.0)]);
    assert_eq!(labels(picker.options()), vec!["g", "scoop"]);
    assert_eq!(selected_count(&picker), 1);
}

#[test]
fn test_small_kg_entry_keeps_its_unit_selected() {
    let mut picker = PortionPicker::for_existing(0.2, ServingUnit::Kilogram, 200.0, Vec::new());
    let selected = picker.selected().unwrap().clone();
    assert_eq!(selected.label, "kg");
    assert!(approx_eq(selected.value, 0.2, 1e-9));
    assert_eq!(selected_count(&picker), 1);

    let index = picker
        .options()
        .iter()
        .position(|option| option.selected)
        .unwrap();
    let before = picker.selection().clone();
    assert!(picker.select(index));
    assert_eq!(picker.selection(), &before);
    assert_eq!(picker.unit(), ServingUnit::Kilogram);
    assert!(approx_eq(picker.quantity(), 0.2, 1e-9));
}

#[test]
fn test_slice_entry_reselect_leaves_state_unchanged() {
    let mut picker =
        PortionPicker::for_existing(2.0, ServingUnit::Slice, 60.0, vec![portion("bowl", 60.0)]);
    assert_eq!(picker.selected().unwrap().label, "slice");
    assert_eq!(selected_count(&picker), 1);

    let index = picker
        .options()
        .iter()
        .position(|option| option.selected)
        .unwrap();
    let before = picker.selection().clone();
    assert!(picker.select(index));
    assert_eq!(picker.selection(), &before);
    assert_eq!(picker.unit(), ServingUnit::Slice);
    assert!(approx_eq(picker.grams(), 60.0, 1e-9));
}
