// ABOUTME: Main library entry point for the mealtrack nutrition client
// ABOUTME: Selected-foods ledger, portion resolver, goal tracking, and REST collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Mealtrack
//!
//! Client-side state for a calorie and macro tracker backed by a REST API.
//!
//! ## Features
//!
//! - **Ledger**: foods logged per day with optimistic add, edit, and remove
//! - **Portion resolver**: unit and preset serving options in canonical grams
//! - **Macro targets**: preset or custom splits turned into gram targets
//! - **Goals**: weight and calorie goals with progress and projection
//! - **Search**: debounced catalog search that never applies stale results
//!
//! ## Architecture
//!
//! - **Intelligence**: pure calculations with no I/O
//! - **Ledger**: one day's entries, mutated only through commands
//! - **Providers**: collaborator traits with HTTP and synthetic backends
//! - **Session**: the explicit state object the operations run against
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chrono::Local;
//! use mealtrack::config::ClientConfig;
//! use mealtrack::errors::AppResult;
//! use mealtrack::providers::{Collaborators, HttpBackend};
//! use mealtrack::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ClientConfig::from_env()?;
//!     let backend = Arc::new(HttpBackend::from_config(&config)?);
//!     let mut session = Session::new(
//!         Collaborators::from_backend(backend),
//!         config,
//!         Local::now().date_naive(),
//!     );
//!     session.go_to_today().await?;
//!     println!("{} kcal left", session.daily_progress().remaining);
//!     Ok(())
//! }
//! ```

/// Error types, re-exported from the core crate
pub use mealtrack_core::errors;

/// Domain models, re-exported from the core crate
pub use mealtrack_core::models;

/// Constants, re-exported from the core crate
pub use mealtrack_core::constants;

/// Environment configuration
pub mod config;

/// Day labels and the month grid
pub mod dates;

/// Goal-setting form state machine
pub mod goal_form;

/// Notification inbox
pub mod inbox;

/// Pure nutrition and goal calculations
pub mod intelligence;

/// Food entries of one day and their mutations
pub mod ledger;

/// Tracing subscriber setup
pub mod logging;

/// Profile settings editing
pub mod profile;

/// Collaborator contracts and backends
pub mod providers;

/// Debounced food search
pub mod search;

/// Session state object
pub mod session;
