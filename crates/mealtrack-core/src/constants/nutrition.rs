// ABOUTME: Nutrition constants for macro presets, energy densities, and portions
// ABOUTME: Pure data shared by the macro resolver and the portion resolver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Kilocalories per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// Kilocalories per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Kilocalories per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Nutrition facts in the catalog are expressed per this many grams
pub const REFERENCE_GRAMS: f64 = 100.0;

/// Named macro splits as (carbs %, protein %, fat %)
pub mod presets {
    /// Balanced split, also the fallback for unknown preset names
    pub const BALANCED: (u8, u8, u8) = (40, 30, 30);
    /// Low carbohydrate split
    pub const LOW_CARB: (u8, u8, u8) = (20, 40, 40);
    /// High protein split
    pub const HIGH_PROTEIN: (u8, u8, u8) = (30, 40, 30);
    /// Ketogenic split
    pub const KETO: (u8, u8, u8) = (5, 25, 70);
    /// Mediterranean split
    pub const MEDITERRANEAN: (u8, u8, u8) = (45, 20, 35);
}

/// Fallback presets used when the portion catalog returns nothing
pub mod portions {
    /// Maximum server portions shown in the picker
    pub const MAX_SERVER_PORTIONS: usize = 4;
    /// Small fallback portion
    pub const SMALL: (&str, f64) = ("small", 80.0);
    /// Medium fallback portion
    pub const MEDIUM: (&str, f64) = ("medium", 150.0);
    /// Large fallback portion
    pub const LARGE: (&str, f64) = ("large", 220.0);
    /// Fallback presets in display order
    pub const FALLBACK: [(&str, f64); 3] = [SMALL, MEDIUM, LARGE];
}
