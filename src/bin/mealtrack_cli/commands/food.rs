// ABOUTME: Food search and meal logging commands for mealtrack-cli
// ABOUTME: Runs the debounced search controller and logs through the session ledger
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use mealtrack::ledger::Serving;
use mealtrack::models::{CatalogFood, MealSlot};
use mealtrack::search::{SearchController, SearchView};
use mealtrack::session::Session;
use tracing::info;

use crate::helpers::display::{display_entry_logged, display_search_page};

async fn run_search(search: &SearchController, query: &str, page: u32) -> SearchView {
    search.on_query_changed(query).await;
    search.settle().await;
    if page > 1 && search.go_to_page(page).await {
        search.settle().await;
    }
    search.state().await.view
}

/// Print one page of catalog results
pub async fn search(session: &Session, query: &str, page: u32) -> Result<()> {
    match run_search(session.search(), query, page).await {
        SearchView::Results(results) => display_search_page(&results),
        SearchView::Failed(message) => bail!(message),
        SearchView::Hidden | SearchView::Loading => {
            println!("Query too short, type at least two characters");
        }
    }
    Ok(())
}

/// Result index for a 1-based `--pick` position
const fn result_index(pick: usize) -> Option<usize> {
    pick.checked_sub(1)
}

async fn find_food(session: &Session, query: &str, pick: usize) -> Result<CatalogFood> {
    let index = result_index(pick).ok_or_else(|| anyhow!("--pick starts at 1"))?;
    if let SearchView::Failed(message) = run_search(session.search(), query, 1).await {
        bail!(message);
    }
    session
        .search()
        .select_result(index)
        .await
        .ok_or_else(|| anyhow!("No search result #{pick} for '{query}'"))
}

/// Log `grams` of the food found by `query` into `meal` on `date`
pub async fn log(
    session: &mut Session,
    query: &str,
    pick: usize,
    grams: f64,
    meal: &str,
    date: NaiveDate,
) -> Result<()> {
    let meal_slot =
        MealSlot::parse(meal).ok_or_else(|| anyhow!("Unknown meal slot '{meal}'"))?;
    let food = find_food(session, query, pick).await?;

    session.select_date(date).await?;
    let id = session
        .add_entry(&food, Serving::in_grams(grams), meal_slot)
        .await?;
    info!(entry_id = %id, food = %food.name, "Logged from CLI");

    if let Some(entry) = session.ledger().get(id) {
        display_entry_logged(entry);
    }
    Ok(())
}
