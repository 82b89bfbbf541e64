// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Quiet logging setup, sample foods, and a session wired to the synthetic backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `mealtrack`

use std::env;
use std::sync::{Arc, Once};

use chrono::NaiveDate;
use mealtrack::config::ClientConfig;
use mealtrack::models::{CatalogFood, FoodSource, NutritionFacts};
use mealtrack::providers::synthetic::SyntheticBackend;
use mealtrack::providers::Collaborators;
use mealtrack::session::Session;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Float comparison with an explicit tolerance
pub fn approx_eq(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance
}

/// Fixed "today" used across tests (a Monday)
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn food(id: &str, name: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> CatalogFood {
    CatalogFood {
        id: Some(id.to_owned()),
        name: name.to_owned(),
        per_100g: NutritionFacts::new(calories, protein, carbs, fat),
        source: FoodSource::Local,
    }
}

pub fn apple() -> CatalogFood {
    food("1", "Apple", 52.0, 0.3, 14.0, 0.2)
}

pub fn apple_pie() -> CatalogFood {
    food("2", "Apple pie", 237.0, 1.9, 34.0, 11.0)
}

pub fn chicken_breast() -> CatalogFood {
    food("3", "Chicken breast", 165.0, 31.0, 0.0, 3.6)
}

pub fn oats() -> CatalogFood {
    food("4", "Rolled oats", 389.0, 16.9, 66.3, 6.9)
}

/// Synthetic backend seeded with a small catalog
pub fn seeded_backend() -> Arc<SyntheticBackend> {
    let backend = Arc::new(SyntheticBackend::with_today(today()));
    for item in [apple(), apple_pie(), chicken_breast(), oats()] {
        backend.add_food(item).unwrap();
    }
    backend
}

/// Session over `backend` with default configuration
pub fn session_with(backend: &Arc<SyntheticBackend>, config: ClientConfig) -> Session {
    init_test_logging();
    Session::new(
        Collaborators::from_backend(Arc::clone(backend)),
        config,
        today(),
    )
}

/// Seeded backend and a default session over it
pub fn test_session() -> (Arc<SyntheticBackend>, Session) {
    let backend = seeded_backend();
    let session = session_with(&backend, ClientConfig::default());
    (backend, session)
}
