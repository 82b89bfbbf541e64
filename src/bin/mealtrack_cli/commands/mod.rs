// ABOUTME: Re-exports command modules for mealtrack-cli
// ABOUTME: Food search and logging, day view, goals, and notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod day;
pub mod food;
pub mod goals;
pub mod inbox;
