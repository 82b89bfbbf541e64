// ABOUTME: reqwest-based backend implementing every collaborator against the REST API
// ABOUTME: Cookie session, per-request timeout, and body-level error detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP Backend
//!
//! The server answers most failures with HTTP 200 and an `{"error": ...}`
//! body, so every response is checked at the body level as well as by status.
//! Authentication is a cookie session established by [`HttpBackend::login`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::constants::endpoints;
use crate::errors::{AppError, AppResult};
use crate::models::{GoalRequest, SearchPage, ServerPortion, UserProfile};
use crate::providers::core::{
    DeleteMealRequest, FoodCatalog, GoalSnapshot, GoalStore, LogMealRequest, LoggedMeal,
    MealLogStore, NotificationInbox, NotificationPage, PortionCatalog, ProfileStore,
    WeightHistory,
};
use crate::providers::wire::{
    goal_snapshot_from_value, DeleteMealBody, LogMealBody, LogWeightBody, MealsResponse,
    NotificationsResponse, PortionsResponse, ProfileResponse, SearchResponse, SetGoalBody,
    SetGoalResponse, StatusResponse, WeightHistoryResponse,
};

const SERVICE: &str = "nutrition API";

/// Backend talking to the nutrition REST API
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a backend rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the URL does not parse, or an
    /// internal error when the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::config(format!("Invalid API base URL '{base_url}': {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Create a backend from client configuration
    ///
    /// # Errors
    ///
    /// See [`HttpBackend::new`]
    pub fn from_config(config: &ClientConfig) -> AppResult<Self> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    /// Backend root
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Start a cookie session
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the credentials are rejected
    pub async fn login(&self, email: &str, password: &str) -> AppResult<()> {
        let status: StatusResponse = self
            .post_json(
                endpoints::LOGIN,
                &json!({ "email": email, "password": password }),
            )
            .await?;
        status.into_result(endpoints::LOGIN)
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::internal(format!("Invalid endpoint path '{path}': {e}")))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = self.endpoint(path)?;
        debug!(endpoint = path, "GET");
        let response = self.client.get(url).query(query).send().await?;
        Self::decode(path, response).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.endpoint(path)?;
        debug!(endpoint = path, "POST");
        let response = self.client.post(url).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> AppResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_owned))
                .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());
            warn!(endpoint = path, status = status.as_u16(), "Request failed");
            return Err(AppError::external_service(
                SERVICE,
                format!("{path} returned HTTP {status}: {detail}"),
            ));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::serialization(format!("Undecodable response from {path}: {e}"))
                .with_source(e)
        })
    }

    async fn post_status<B: Serialize + Sync>(&self, path: &str, body: &B) -> AppResult<()> {
        let status: StatusResponse = self.post_json(path, body).await?;
        status.into_result(path)
    }
}

#[async_trait]
impl FoodCatalog for HttpBackend {
    async fn search(&self, query: &str, page: u32) -> AppResult<SearchPage> {
        let response: SearchResponse = self
            .get_json(
                endpoints::SEARCH,
                &[("q", query.to_owned()), ("p", page.to_string())],
            )
            .await?;
        response.into_page()
    }
}

#[async_trait]
impl PortionCatalog for HttpBackend {
    async fn portions(&self, food_id: &str) -> AppResult<Vec<ServerPortion>> {
        let response: PortionsResponse = self
            .get_json(endpoints::PORTIONS, &[("id", food_id.to_owned())])
            .await?;
        Ok(response.into_portions())
    }
}

#[async_trait]
impl MealLogStore for HttpBackend {
    async fn log_meal(&self, request: &LogMealRequest) -> AppResult<()> {
        self.post_status(endpoints::LOG_MEAL, &LogMealBody::from(request))
            .await
    }

    async fn delete_meal(&self, request: &DeleteMealRequest) -> AppResult<()> {
        self.post_status(endpoints::DELETE_MEAL, &DeleteMealBody::from(request))
            .await
    }

    async fn meals_for_date(&self, date: NaiveDate) -> AppResult<Vec<LoggedMeal>> {
        let response: MealsResponse = self
            .get_json(
                endpoints::MEALS_FOR_DATE,
                &[("date", date.format("%Y-%m-%d").to_string())],
            )
            .await?;
        response.into_rows()
    }
}

#[async_trait]
impl GoalStore for HttpBackend {
    async fn set_goal(&self, request: &GoalRequest) -> AppResult<Option<u32>> {
        let response: SetGoalResponse = self
            .post_json(endpoints::SET_GOAL, &SetGoalBody::from(request))
            .await?;
        response.into_calories()
    }

    async fn log_weight(&self, weight_kg: f64, date: NaiveDate) -> AppResult<()> {
        let body = LogWeightBody {
            weight: weight_kg,
            date: date.format("%Y-%m-%d").to_string(),
        };
        self.post_status(endpoints::LOG_WEIGHT, &body).await
    }

    async fn weight_history(&self, days: u32) -> AppResult<WeightHistory> {
        let response: WeightHistoryResponse = self
            .get_json(endpoints::WEIGHT_HISTORY, &[("days", days.to_string())])
            .await?;
        response.into_history()
    }

    async fn goal_status(&self) -> AppResult<GoalSnapshot> {
        let body: Value = self.get_json(endpoints::GOAL_STATUS, &[]).await?;
        goal_snapshot_from_value(&body)
    }
}

#[async_trait]
impl ProfileStore for HttpBackend {
    async fn update_profile(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        let response: ProfileResponse = self.post_json(endpoints::UPDATE_PROFILE, profile).await?;
        response.into_profile()
    }
}

#[async_trait]
impl NotificationInbox for HttpBackend {
    async fn notifications(&self, limit: u32) -> AppResult<NotificationPage> {
        let response: NotificationsResponse = self
            .get_json(endpoints::NOTIFICATIONS, &[("limit", limit.to_string())])
            .await?;
        response.into_page()
    }

    async fn mark_read(&self, id: i64) -> AppResult<()> {
        self.post_status(&endpoints::notification_read(id), &json!({}))
            .await
    }

    async fn mark_all_read(&self) -> AppResult<()> {
        self.post_status(endpoints::NOTIFICATIONS_READ_ALL, &json!({}))
            .await
    }
}
