// ABOUTME: Pure nutrition and goal derivations used by the ledger and dashboard
// ABOUTME: Unit conversion, macro targets, portion options, energy, and goal progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence
//!
//! Side-effect free calculations. Nothing in this module talks to a
//! collaborator; every function is a deterministic function of its inputs
//! (the current day is always passed in explicitly).

/// Serving unit to gram conversion and quantity stepping
pub mod unit_conversion;

/// Macro preset resolution and gram targets for a calorie budget
pub mod macro_distribution;

/// Selectable portion options and the stateful portion picker
pub mod portion_resolver;

/// BMR, TDEE, and goal calorie budgets
pub mod energy;

/// Goal progress evaluation and linear weight projection
pub mod goal_progress;

/// Calorie and macro progress against the daily budget
pub mod daily_progress;

pub use daily_progress::{DailyProgress, MacroProgress};
pub use goal_progress::{evaluate, latest_weight, project_weights};
pub use macro_distribution::{distribution_for, targets_for, MacroTarget, MacroTargets};
pub use portion_resolver::{resolve_options, PortionKind, PortionOption, PortionPicker};
pub use unit_conversion::{grams_for, round_to};
