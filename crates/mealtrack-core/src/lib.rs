// ABOUTME: Core types and constants for the mealtrack nutrition client
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealtrack Core
//!
//! Foundation crate providing shared types and constants for the mealtrack
//! nutrition client. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Unit table, macro presets, validation ranges, endpoint paths
//! - **models**: Foods, meal slots, goals, profiles, and notifications

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (foods, meal slots, goals, profile, notifications)
pub mod models;
