// ABOUTME: Day view command for mealtrack-cli
// ABOUTME: Loads a day's ledger and prints meals, totals, and progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::NaiveDate;
use mealtrack::dates::meals_title;
use mealtrack::session::Session;
use tracing::warn;

use crate::helpers::display::{display_meals, display_progress};

/// Print the meals and progress of `date`
pub async fn show(session: &mut Session, date: NaiveDate) -> Result<()> {
    session.select_date(date).await?;
    if let Err(e) = session.refresh_goal().await {
        warn!(error = %e, "Goal status unavailable, using profile budget");
    }

    println!("\n{}", meals_title(date, session.today()));
    display_meals(&session.aggregates_by_meal());

    let skipped = session.ledger().unrecognized().len();
    if skipped > 0 {
        println!("({skipped} stored rows have an unknown meal slot and are not counted)");
    }

    display_progress(&session.daily_progress());
    Ok(())
}
