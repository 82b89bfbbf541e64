// ABOUTME: Backend integrations for the nutrition REST API and an in-memory stand-in
// ABOUTME: Collaborator traits, wire formats, the reqwest client, and the synthetic backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Collaborator traits and request types
pub mod core;

/// HTTP backend built on reqwest
pub mod http;

/// In-memory backend for tests and offline runs
pub mod synthetic;

/// JSON payloads exchanged with the server
pub mod wire;

pub use self::core::{
    Collaborators, DeleteMealRequest, FoodCatalog, GoalSnapshot, GoalStore, LogMealRequest,
    LoggedMeal, MealLogStore, NotificationInbox, NotificationPage, PortionCatalog, ProfileStore,
    WeightHistory,
};
pub use http::HttpBackend;
pub use synthetic::SyntheticBackend;
