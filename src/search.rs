// ABOUTME: Debounced food search with a monotonic request generation fence
// ABOUTME: Only the response to the most recently issued request is ever applied
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Food Search Controller
//!
//! Every input change and page change issues a new generation number. A
//! spawned task waits for the debounce delay, gives up if its generation is
//! no longer current, then calls the catalog. When the response arrives it is
//! applied only if its generation is still the latest; otherwise it is
//! dropped. In-flight requests are never aborted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::models::{CatalogFood, SearchPage};
use crate::providers::core::FoodCatalog;

/// What the result list currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchView {
    /// Query too short, nothing shown
    #[default]
    Hidden,
    /// Waiting for the catalog
    Loading,
    /// Results for the active query
    Results(SearchPage),
    /// Dismissible error message
    Failed(String),
}

/// Observable search state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    /// Active query, empty when hidden
    pub query: String,
    /// Page of the active query
    pub page: u32,
    /// Result list contents
    pub view: SearchView,
    /// Generation of the applied response
    pub applied_generation: u64,
}

impl SearchState {
    /// Results currently shown
    #[must_use]
    pub const fn results(&self) -> Option<&SearchPage> {
        match &self.view {
            SearchView::Results(page) => Some(page),
            _ => None,
        }
    }
}

/// Debounced, generation-fenced food search
pub struct SearchController {
    catalog: Arc<dyn FoodCatalog>,
    debounce: Duration,
    min_query_len: usize,
    generation: Arc<AtomicU64>,
    state: Arc<RwLock<SearchState>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl SearchController {
    /// Controller using the configured debounce and minimum query length
    #[must_use]
    pub fn new(catalog: Arc<dyn FoodCatalog>, config: &ClientConfig) -> Self {
        Self::with_settings(catalog, config.search_debounce(), config.search_min_query_len)
    }

    /// Controller with explicit settings
    #[must_use]
    pub fn with_settings(
        catalog: Arc<dyn FoodCatalog>,
        debounce: Duration,
        min_query_len: usize,
    ) -> Self {
        Self {
            catalog,
            debounce,
            min_query_len,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(RwLock::new(SearchState::default())),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Latest issued generation
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> SearchState {
        self.state.read().await.clone()
    }

    /// Handle a change of the search input
    ///
    /// Short queries hide the results and supersede any pending request.
    /// Longer ones schedule a debounced search of page 1.
    pub async fn on_query_changed(&self, input: &str) {
        let query = input.trim().to_owned();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.chars().count() < self.min_query_len {
            let mut state = self.state.write().await;
            *state = SearchState {
                applied_generation: generation,
                ..SearchState::default()
            };
            debug!(generation, "Search query too short, results hidden");
            return;
        }

        self.spawn_search(generation, query, 1, self.debounce).await;
    }

    /// Show page `page` of the active query
    ///
    /// Returns `false` without issuing a request when no results are shown or
    /// `page` is outside `1..=total_pages`.
    pub async fn go_to_page(&self, page: u32) -> bool {
        let query = {
            let state = self.state.read().await;
            let Some(results) = state.results() else {
                return false;
            };
            if state.query.is_empty() || page == 0 || page > results.pagination.total_pages {
                return false;
            }
            state.query.clone()
        };
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.spawn_search(generation, query, page, Duration::ZERO)
            .await;
        true
    }

    /// Food at `index` of the shown results
    pub async fn select_result(&self, index: usize) -> Option<CatalogFood> {
        self.state
            .read()
            .await
            .results()
            .and_then(|page| page.foods.get(index).cloned())
    }

    /// Hide results and supersede every outstanding request
    pub async fn clear(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write().await = SearchState {
            applied_generation: generation,
            ..SearchState::default()
        };
    }

    /// Wait until every spawned search task has finished
    pub async fn settle(&self) {
        let handles: Vec<JoinHandle<()>> = self.tasks.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Search task ended abnormally");
            }
        }
    }

    async fn spawn_search(&self, generation: u64, query: String, page: u32, delay: Duration) {
        let catalog = Arc::clone(&self.catalog);
        let fence = Arc::clone(&self.generation);
        let state = Arc::clone(&self.state);

        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }
            {
                let mut current = state.write().await;
                if fence.load(Ordering::SeqCst) != generation {
                    debug!(generation, "Debounced search superseded before sending");
                    return;
                }
                current.query.clone_from(&query);
                current.page = page;
                current.view = SearchView::Loading;
            }

            let outcome = catalog.search(&query, page).await;

            // The fence is checked under the state lock so a newer response
            // that was already applied cannot be overwritten.
            let mut current = state.write().await;
            let latest = fence.load(Ordering::SeqCst);
            if latest != generation {
                debug!(generation, latest, query = %query, "Dropping stale search response");
                return;
            }
            current.applied_generation = generation;
            current.view = match outcome {
                Ok(results) => SearchView::Results(results),
                Err(e) => {
                    warn!(generation, query = %query, error = %e, "Food search failed");
                    SearchView::Failed(e.user_message())
                }
            };
        });

        let mut tasks = self.tasks.lock().await;
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }
}
