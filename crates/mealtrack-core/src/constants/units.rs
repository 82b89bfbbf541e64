// ABOUTME: Serving unit constants for the gram conversion table
// ABOUTME: Multipliers for g/dkg/kg/slice/piece/cup plus quantity stepping values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Grams in one gram
pub const GRAMS_PER_GRAM: f64 = 1.0;
/// Grams in one decagram
pub const GRAMS_PER_DECAGRAM: f64 = 10.0;
/// Grams in one kilogram
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;
/// Grams assumed for one slice
pub const GRAMS_PER_SLICE: f64 = 30.0;
/// Grams assumed for one piece
pub const GRAMS_PER_PIECE: f64 = 50.0;
/// Grams assumed for one cup
pub const GRAMS_PER_CUP: f64 = 250.0;
/// Multiplier applied to unrecognized unit labels
pub const UNKNOWN_UNIT_MULTIPLIER: f64 = 1.0;

/// Smallest quantity the portion picker accepts
pub const MIN_QUANTITY: f64 = 0.1;
/// Step for decagram and kilogram quantities
pub const FINE_STEP: f64 = 0.1;
/// Step for every other unit
pub const COARSE_STEP: f64 = 1.0;

/// Decagram option appears once the gram quantity reaches this value
pub const DKG_OPTION_THRESHOLD: f64 = 10.0;
/// Kilogram option appears once any option exceeds this many grams
pub const KG_OPTION_THRESHOLD: f64 = 500.0;
/// Preset options count as selected within this many grams
pub const PRESET_MATCH_TOLERANCE_G: f64 = 1.0;
