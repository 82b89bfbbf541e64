// ABOUTME: Portion resolver merging unit options with named serving presets
// ABOUTME: Builds the selectable option list and tracks the active selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Portion Resolver
//!
//! The option list is derived from the canonical gram quantity and the
//! presets supplied by the portion catalog:
//!
//! 1. a `g` option for the current grams
//! 2. a `dkg` option once the quantity reaches 10 g
//! 3. up to four catalog presets, or small/medium/large fallbacks
//! 4. a `kg` option once any option (or the quantity) exceeds 500 g
//!
//! The picker also appends a unit option for its active unit when the list
//! above has none (a `kg` amount under 500 g, or slices, pieces and cups),
//! so the flagged option always describes the active state.
//!
//! The list is rebuilt from scratch after every change and never stored
//! elsewhere. Exactly one option is flagged as selected.

use serde::Serialize;

use crate::constants::nutrition::portions::{FALLBACK, MAX_SERVER_PORTIONS};
use crate::constants::units::{
    DKG_OPTION_THRESHOLD, GRAMS_PER_DECAGRAM, GRAMS_PER_KILOGRAM, KG_OPTION_THRESHOLD,
    PRESET_MATCH_TOLERANCE_G,
};
use crate::intelligence::unit_conversion::{
    grams_for_unit, parse_quantity, round_to, step_quantity,
};
use crate::models::{ServerPortion, ServingUnit};

/// Whether an option switches the unit or picks a named serving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortionKind {
    /// Same amount expressed in another unit
    UnitBased,
    /// Named serving with a fixed weight
    PresetBased,
}

/// One selectable serving choice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortionOption {
    /// Unit label or preset name
    pub label: String,
    /// Quantity shown to the user
    pub value: f64,
    /// Canonical grams the option stands for
    pub grams: f64,
    /// Option kind
    pub kind: PortionKind,
    /// Whether this is the active choice
    pub selected: bool,
}

impl PortionOption {
    fn unit(unit: ServingUnit, value: f64, grams: f64) -> Self {
        Self {
            label: unit.label().to_owned(),
            value,
            grams,
            kind: PortionKind::UnitBased,
            selected: false,
        }
    }

    fn preset(label: impl Into<String>, grams: f64) -> Self {
        Self {
            label: label.into(),
            value: grams,
            grams,
            kind: PortionKind::PresetBased,
            selected: false,
        }
    }

    /// Unit a unit-based option switches to
    #[must_use]
    pub fn serving_unit(&self) -> Option<ServingUnit> {
        match self.kind {
            PortionKind::UnitBased => ServingUnit::parse(&self.label),
            PortionKind::PresetBased => None,
        }
    }
}

/// Build the ordered option list for `current_grams`
///
/// No option is flagged as selected; see [`PortionPicker`] for selection.
/// Catalog presets with a non-positive weight are skipped.
#[must_use]
pub fn resolve_options(current_grams: f64, server_portions: &[ServerPortion]) -> Vec<PortionOption> {
    let mut options = vec![PortionOption::unit(
        ServingUnit::Gram,
        current_grams,
        current_grams,
    )];

    if current_grams >= DKG_OPTION_THRESHOLD {
        options.push(PortionOption::unit(
            ServingUnit::Decagram,
            round_to(current_grams / GRAMS_PER_DECAGRAM, 1),
            current_grams,
        ));
    }

    let presets: Vec<PortionOption> = server_portions
        .iter()
        .filter(|portion| portion.weight_grams > 0.0)
        .take(MAX_SERVER_PORTIONS)
        .map(|portion| PortionOption::preset(portion.label.clone(), portion.weight_grams))
        .collect();

    if presets.is_empty() {
        options.extend(
            FALLBACK
                .iter()
                .map(|(label, grams)| PortionOption::preset(*label, *grams)),
        );
    } else {
        options.extend(presets);
    }

    let has_large = options.iter().any(|option| option.grams > KG_OPTION_THRESHOLD);
    if has_large || current_grams > KG_OPTION_THRESHOLD {
        options.push(PortionOption::unit(
            ServingUnit::Kilogram,
            round_to(current_grams / GRAMS_PER_KILOGRAM, 2),
            current_grams,
        ));
    }

    options
}

/// Active quantity, unit, and canonical grams of the picker
#[derive(Debug, Clone, PartialEq)]
pub struct PortionSelection {
    /// Quantity in `unit`
    pub quantity: f64,
    /// Active unit
    pub unit: ServingUnit,
    /// Canonical grams
    pub unit_grams: f64,
    /// Preset label chosen explicitly, cleared by manual edits
    pub preset: Option<String>,
}

impl Default for PortionSelection {
    fn default() -> Self {
        Self {
            quantity: 1.0,
            unit: ServingUnit::Gram,
            unit_grams: 1.0,
            preset: None,
        }
    }
}

fn grams_match(option: &PortionOption, grams: f64) -> bool {
    (option.grams - grams).abs() < PRESET_MATCH_TOLERANCE_G
}

/// Index of the option that matches `selection`
///
/// An explicitly chosen preset wins when its weight is within 1 g. Otherwise
/// the unit option for the active unit wins, then the first preset within
/// 1 g, and finally the gram option.
#[must_use]
pub fn selected_index(options: &[PortionOption], selection: &PortionSelection) -> usize {
    let chosen_preset = selection.preset.as_deref().and_then(|label| {
        options.iter().position(|option| {
            option.kind == PortionKind::PresetBased
                && option.label == label
                && grams_match(option, selection.unit_grams)
        })
    });

    chosen_preset
        .or_else(|| {
            options.iter().position(|option| {
                option.kind == PortionKind::UnitBased && option.label == selection.unit.label()
            })
        })
        .or_else(|| {
            options.iter().position(|option| {
                option.kind == PortionKind::PresetBased && grams_match(option, selection.unit_grams)
            })
        })
        .unwrap_or(0)
}

/// Portion picker state for one food
#[derive(Debug, Clone)]
pub struct PortionPicker {
    selection: PortionSelection,
    server_portions: Vec<ServerPortion>,
    options: Vec<PortionOption>,
}

impl PortionPicker {
    /// Picker for a newly chosen food, starting at 1 g
    #[must_use]
    pub fn new(server_portions: Vec<ServerPortion>) -> Self {
        Self::with_selection(PortionSelection::default(), server_portions)
    }

    /// Picker restored from an existing entry
    #[must_use]
    pub fn for_existing(
        quantity: f64,
        unit: ServingUnit,
        grams: f64,
        server_portions: Vec<ServerPortion>,
    ) -> Self {
        Self::with_selection(
            PortionSelection {
                quantity,
                unit,
                unit_grams: grams,
                preset: None,
            },
            server_portions,
        )
    }

    /// Picker with an explicit selection
    #[must_use]
    pub fn with_selection(selection: PortionSelection, server_portions: Vec<ServerPortion>) -> Self {
        let mut picker = Self {
            selection,
            server_portions,
            options: Vec::new(),
        };
        picker.refresh();
        picker
    }

    /// Replace the catalog presets once they arrive
    ///
    /// An empty list falls back to the built-in presets.
    pub fn set_server_portions(&mut self, server_portions: Vec<ServerPortion>) {
        self.server_portions = server_portions;
        self.refresh();
    }

    /// Current option list, exactly one flagged as selected
    #[must_use]
    pub fn options(&self) -> &[PortionOption] {
        &self.options
    }

    /// The selected option
    #[must_use]
    pub fn selected(&self) -> Option<&PortionOption> {
        self.options.iter().find(|option| option.selected)
    }

    /// Active selection
    #[must_use]
    pub const fn selection(&self) -> &PortionSelection {
        &self.selection
    }

    /// Quantity in the active unit
    #[must_use]
    pub const fn quantity(&self) -> f64 {
        self.selection.quantity
    }

    /// Active unit
    #[must_use]
    pub const fn unit(&self) -> ServingUnit {
        self.selection.unit
    }

    /// Canonical grams to log
    #[must_use]
    pub const fn grams(&self) -> f64 {
        self.selection.unit_grams
    }

    /// Choose the option at `index`
    ///
    /// Returns `false` when the index is out of range. Choosing the option
    /// that is already selected leaves the state unchanged.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(option) = self.options.get(index).cloned() else {
            return false;
        };
        if option.selected {
            self.refresh();
            return true;
        }

        self.selection = match option.kind {
            PortionKind::UnitBased => PortionSelection {
                quantity: option.value,
                unit: option.serving_unit().unwrap_or_default(),
                unit_grams: option.grams,
                preset: None,
            },
            PortionKind::PresetBased => PortionSelection {
                quantity: option.value,
                unit: ServingUnit::Gram,
                unit_grams: option.grams,
                preset: Some(option.label),
            },
        };
        self.refresh();
        true
    }

    /// Apply free-form quantity input in the active unit
    pub fn set_quantity_input(&mut self, input: &str) {
        self.set_quantity(parse_quantity(input));
    }

    /// Step the quantity up or down by `delta` unit steps
    pub fn adjust(&mut self, delta: i32) {
        self.set_quantity(step_quantity(self.selection.quantity, delta, self.selection.unit));
    }

    fn set_quantity(&mut self, quantity: f64) {
        self.selection.quantity = quantity;
        self.selection.unit_grams = grams_for_unit(self.selection.unit, quantity);
        self.selection.preset = None;
        self.refresh();
    }

    fn refresh(&mut self) {
        let mut options = resolve_options(self.selection.unit_grams, &self.server_portions);
        let unit = self.selection.unit;
        let has_unit_option = options.iter().any(|option| {
            option.kind == PortionKind::UnitBased && option.label == unit.label()
        });
        if !has_unit_option {
            options.push(PortionOption::unit(
                unit,
                self.selection.quantity,
                self.selection.unit_grams,
            ));
        }
        let index = selected_index(&options, &self.selection);
        if let Some(option) = options.get_mut(index) {
            option.selected = true;
        }
        self.options = options;
    }
}
