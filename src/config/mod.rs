// ABOUTME: Configuration management for the mealtrack client
// ABOUTME: Environment-driven settings for the backend connection, search, and ledger policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration is read from environment variables only. There are no config
//! files; every setting has a documented default.

/// Environment variable parsing
pub mod environment;

pub use environment::ClientConfig;
