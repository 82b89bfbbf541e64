// ABOUTME: Integration tests for the debounced, generation-fenced food search
// ABOUTME: Validates debounce coalescing, short queries, stale response dropping, and paging bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{food, init_test_logging, seeded_backend};
use mealtrack::providers::core::FoodCatalog;
use mealtrack::providers::synthetic::{Operation, RecordedRequest, SyntheticBackend};
use mealtrack::search::{SearchController, SearchView};
use tokio::time::sleep;

const DEBOUNCE: Duration = Duration::from_millis(300);

fn controller(backend: &Arc<SyntheticBackend>) -> SearchController {
    init_test_logging();
    let catalog: Arc<dyn FoodCatalog> = backend.clone();
    SearchController::with_settings(catalog, DEBOUNCE, 2)
}

fn searched_queries(backend: &SyntheticBackend) -> Vec<(String, u32)> {
    backend
        .requests()
        .unwrap()
        .into_iter()
        .filter_map(|request| match request {
            RecordedRequest::Search { query, page } => Some((query, page)),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Debounce and short queries
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_rapid_typing_sends_one_request() {
    let backend = seeded_backend();
    let search = controller(&backend);

    for input in ["ap", "app", "appl", "apple"] {
        search.on_query_changed(input).await;
        sleep(Duration::from_millis(100)).await;
    }
    search.settle().await;

    assert_eq!(searched_queries(&backend), vec![("apple".to_owned(), 1)]);
    let state = search.state().await;
    assert_eq!(state.query, "apple");
    assert_eq!(state.results().unwrap().foods.len(), 2);
    assert_eq!(state.applied_generation, search.current_generation());
}

#[tokio::test(start_paused = true)]
async fn test_nothing_sent_before_debounce_elapses() {
    let backend = seeded_backend();
    let search = controller(&backend);

    search.on_query_changed("oats").await;
    sleep(Duration::from_millis(200)).await;
    assert_eq!(backend.request_count(Operation::Search).unwrap(), 0);
    assert_eq!(search.state().await.view, SearchView::Hidden);

    search.settle().await;
    assert_eq!(backend.request_count(Operation::Search).unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_short_query_hides_results() {
    let backend = seeded_backend();
    let search = controller(&backend);

    search.on_query_changed("chicken").await;
    search.settle().await;
    assert!(search.state().await.results().is_some());

    search.on_query_changed(" c ").await;
    search.settle().await;
    let state = search.state().await;
    assert_eq!(state.view, SearchView::Hidden);
    assert!(state.query.is_empty());
    assert_eq!(backend.request_count(Operation::Search).unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_short_query_cancels_pending_search() {
    let backend = seeded_backend();
    let search = controller(&backend);

    search.on_query_changed("apple").await;
    search.on_query_changed("a").await;
    search.settle().await;

    assert_eq!(backend.request_count(Operation::Search).unwrap(), 0);
    assert_eq!(search.state().await.view, SearchView::Hidden);
}

// ============================================================================
// Generation fencing
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_slow_stale_response_is_dropped() {
    let backend = seeded_backend();
    backend
        .set_search_delay("apple", Duration::from_secs(2))
        .unwrap();
    let search = controller(&backend);

    search.on_query_changed("apple").await;
    // Let the first request leave, then type a new query while it is in flight.
    sleep(DEBOUNCE + Duration::from_millis(50)).await;
    search.on_query_changed("oats").await;
    search.settle().await;

    assert_eq!(
        searched_queries(&backend),
        vec![("apple".to_owned(), 1), ("oats".to_owned(), 1)]
    );
    let state = search.state().await;
    assert_eq!(state.query, "oats");
    let names: Vec<&str> = state
        .results()
        .unwrap()
        .foods
        .iter()
        .map(|food| food.name.as_str())
        .collect();
    assert_eq!(names, vec!["Rolled oats"]);
}

#[tokio::test(start_paused = true)]
async fn test_clear_supersedes_in_flight_request() {
    let backend = seeded_backend();
    backend
        .set_search_delay("apple", Duration::from_secs(1))
        .unwrap();
    let search = controller(&backend);

    search.on_query_changed("apple").await;
    sleep(DEBOUNCE + Duration::from_millis(10)).await;
    search.clear().await;
    search.settle().await;

    assert_eq!(backend.request_count(Operation::Search).unwrap(), 1);
    assert_eq!(search.state().await.view, SearchView::Hidden);
}

#[tokio::test(start_paused = true)]
async fn test_search_error_becomes_dismissible_message() {
    let backend = seeded_backend();
    backend.fail(Operation::Search).unwrap();
    let search = controller(&backend);

    search.on_query_changed("apple").await;
    search.settle().await;
    let SearchView::Failed(message) = search.state().await.view else {
        panic!("expected a failed search");
    };
    assert!(!message.is_empty());

    backend.recover(Operation::Search).unwrap();
    search.on_query_changed("apple pie").await;
    search.settle().await;
    assert_eq!(search.state().await.results().unwrap().foods.len(), 1);
}

// ============================================================================
// Pagination
// ============================================================================

fn paged_backend() -> Arc<SyntheticBackend> {
    let backend = seeded_backend();
    backend.set_page_size(2).unwrap();
    for (index, name) in ["Bread roll", "Bread, rye", "Bread, white", "Breadsticks", "Bread pudding"]
        .into_iter()
        .enumerate()
    {
        backend
            .add_food(food(&format!("b{index}"), name, 260.0, 9.0, 49.0, 3.2))
            .unwrap();
    }
    backend
}

#[tokio::test(start_paused = true)]
async fn test_page_navigation_within_bounds() {
    let backend = paged_backend();
    let search = controller(&backend);

    search.on_query_changed("bread").await;
    search.settle().await;
    let first = search.state().await;
    let pagination = first.results().unwrap().pagination;
    assert_eq!(pagination.total_results, 5);
    assert_eq!(pagination.total_pages, 3);
    assert_eq!(pagination.current_page, 1);

    assert!(search.go_to_page(3).await);
    search.settle().await;
    let last = search.state().await;
    assert_eq!(last.page, 3);
    assert_eq!(last.results().unwrap().foods.len(), 1);
    assert_eq!(last.results().unwrap().foods[0].name, "Bread pudding");
}

#[tokio::test(start_paused = true)]
async fn test_page_outside_range_is_ignored() {
    let backend = paged_backend();
    let search = controller(&backend);

    assert!(!search.go_to_page(1).await);

    search.on_query_changed("bread").await;
    search.settle().await;
    let before = backend.request_count(Operation::Search).unwrap();

    assert!(!search.go_to_page(0).await);
    assert!(!search.go_to_page(4).await);
    search.settle().await;
    assert_eq!(backend.request_count(Operation::Search).unwrap(), before);
    assert_eq!(search.state().await.page, 1);
}

#[tokio::test(start_paused = true)]
async fn test_selecting_result_by_index() {
    let backend = seeded_backend();
    let search = controller(&backend);

    assert!(search.select_result(0).await.is_none());
    search.on_query_changed("apple").await;
    search.settle().await;
    assert_eq!(search.select_result(1).await.unwrap().name, "Apple pie");
    assert!(search.select_result(2).await.is_none());
}
