// ABOUTME: Mealtrack CLI - command-line client for the nutrition REST API
// ABOUTME: Searches foods, logs meals, and shows daily progress, goals, and notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Search the food catalog
//! mealtrack-cli search "greek yogurt" --page 2
//!
//! # Show today's meals, totals, and progress
//! mealtrack-cli day
//!
//! # Log 150 g of the first search hit as lunch
//! mealtrack-cli log apple --grams 150 --meal lunch
//!
//! # Macro targets for a budget and preset
//! mealtrack-cli targets --budget 1800 --preset high_protein
//!
//! # Goal progress, weight logging, notifications
//! mealtrack-cli goal-status
//! mealtrack-cli weight 82.4
//! mealtrack-cli notifications --mark-all-read
//! ```

mod commands;
mod helpers;

use std::env;
use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use mealtrack::config::environment::parse_base_url;
use mealtrack::config::ClientConfig;
use mealtrack::logging::LoggingConfig;
use mealtrack::providers::{Collaborators, HttpBackend};
use mealtrack::session::Session;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "mealtrack-cli",
    about = "Mealtrack nutrition client",
    long_about = "Command-line client for logging meals and tracking calorie, macro, and weight goals."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API base URL override
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Account email, falls back to `MEALTRACK_EMAIL`
    #[arg(long, global = true)]
    email: Option<String>,

    /// Account password, falls back to `MEALTRACK_PASSWORD`
    #[arg(long, global = true)]
    password: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Search the food catalog
    Search {
        /// Search text, at least two characters
        query: String,

        /// Result page
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Show the meals, totals, and progress of a day
    Day {
        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Log a food found by search
    Log {
        /// Search text identifying the food
        query: String,

        /// Position of the food in the first result page, starting at 1
        #[arg(long, default_value = "1")]
        pick: usize,

        /// Grams eaten
        #[arg(long)]
        grams: f64,

        /// Meal slot (breakfast, morning_snack, lunch, afternoon_snack, dinner, extra)
        #[arg(long)]
        meal: String,

        /// Day to log on (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show macro gram targets
    Targets {
        /// Calorie budget, defaults to the effective budget
        #[arg(long)]
        budget: Option<u32>,

        /// Macro preset, defaults to the profile's
        #[arg(long)]
        preset: Option<String>,
    },

    /// Show goal progress
    GoalStatus,

    /// Log today's body weight in kg
    Weight {
        /// Weight in kg (30-300)
        kg: f64,
    },

    /// Show notifications
    Notifications {
        /// Mark every notification read afterwards
        #[arg(long)]
        mark_all_read: bool,
    },
}

fn credential(flag: Option<String>, var: &str) -> Option<String> {
    flag.or_else(|| env::var(var).ok())
        .filter(|value| !value.is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config.api_base_url = parse_base_url(url)?;
    }
    info!(api = %config.api_base_url, "Mealtrack CLI");

    let backend = Arc::new(HttpBackend::from_config(&config)?);
    if let (Some(email), Some(password)) = (
        credential(cli.email, "MEALTRACK_EMAIL"),
        credential(cli.password, "MEALTRACK_PASSWORD"),
    ) {
        backend.login(&email, &password).await?;
        debug!(email = %email, "Logged in");
    }

    let today = Local::now().date_naive();
    let mut session = Session::new(Collaborators::from_backend(backend), config, today);

    match cli.command {
        Command::Search { query, page } => {
            commands::food::search(&session, &query, page).await?;
        }
        Command::Day { date } => {
            commands::day::show(&mut session, date.unwrap_or(today)).await?;
        }
        Command::Log {
            query,
            pick,
            grams,
            meal,
            date,
        } => {
            commands::food::log(
                &mut session,
                &query,
                pick,
                grams,
                &meal,
                date.unwrap_or(today),
            )
            .await?;
        }
        Command::Targets { budget, preset } => {
            commands::goals::targets(&mut session, budget, preset.as_deref()).await?;
        }
        Command::GoalStatus => {
            commands::goals::status(&mut session).await?;
        }
        Command::Weight { kg } => {
            commands::goals::log_weight(&mut session, kg).await?;
        }
        Command::Notifications { mark_all_read } => {
            commands::inbox::show(&mut session, mark_all_read).await?;
        }
    }

    Ok(())
}
