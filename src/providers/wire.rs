// ABOUTME: JSON wire formats of the nutrition REST API and their lenient decoding
// ABOUTME: Maps loosely typed server payloads onto the crate's domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Wire formats
//!
//! The server is loosely typed: nutrient values arrive as numbers, numeric
//! strings, or strings with a unit suffix; booleans arrive as 0/1; ids arrive
//! under several keys. Decoding here never fails on a malformed value, it
//! substitutes a neutral default instead.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::models::{
    sanitize_nutrient, CatalogFood, FoodSource, Goal, GoalRequest, GoalType, Notification,
    NutritionFacts, Pagination, ProjectedWeight, SearchPage, ServerPortion, UserProfile, WeightLog,
};
use crate::providers::core::{
    DeleteMealRequest, GoalSnapshot, LogMealRequest, LoggedMeal, NotificationPage, WeightHistory,
};

const NULL_MARKERS: [&str; 4] = ["n/a", "na", "null", "none"];

/// Numeric value of a loosely typed JSON field, `None` when absent or unparseable
#[must_use]
pub fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let cleaned = text
                .trim()
                .to_lowercase()
                .replace("kcal", "")
                .replace("cal", "")
                .replace('g', "");
            let cleaned = cleaned.trim();
            if cleaned.is_empty() || NULL_MARKERS.contains(&cleaned) {
                None
            } else {
                cleaned.replace(',', ".").parse().ok()
            }
        }
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Nutrient value with missing, negative, or malformed input mapped to 0
#[must_use]
pub fn lenient_nutrient(value: Option<&Value>) -> f64 {
    value.and_then(lenient_f64).map_or(0.0, sanitize_nutrient)
}

fn lenient_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(other) => lenient_f64(other).is_some_and(|n| n != 0.0),
        None => false,
    }
}

fn lenient_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Parse a server timestamp such as `2025-03-01 08:15:00` or ISO 8601
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim().trim_end_matches('Z');
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

fn parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    value
        .and_then(Value::as_str)
        .and_then(|text| NaiveDate::parse_from_str(text.get(..10).unwrap_or(text), "%Y-%m-%d").ok())
}

/// Catalog food from a search result object
///
/// The id is read from `food_id`, `ID`, `id`, or `fid`, in that order.
#[must_use]
pub fn catalog_food_from_value(value: &Value) -> CatalogFood {
    let id = ["food_id", "ID", "id", "fid"]
        .iter()
        .find_map(|key| lenient_string(value.get(key)));
    CatalogFood {
        id,
        name: lenient_string(value.get("name")).unwrap_or_else(|| "Unknown food".to_owned()),
        per_100g: NutritionFacts::new(
            lenient_nutrient(value.get("cal")),
            lenient_nutrient(value.get("protein")),
            lenient_nutrient(value.get("carbo")),
            lenient_nutrient(value.get("fat")),
        ),
        source: value
            .get("source")
            .and_then(Value::as_str)
            .map_or(FoodSource::Local, FoodSource::from_str_lossy),
    }
}

/// Body of `GET search`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Echoed query
    #[serde(default)]
    pub query: String,
    /// Raw food objects
    #[serde(default)]
    pub foods: Vec<Value>,
    /// Paging metadata
    #[serde(default)]
    pub pagination: Pagination,
    /// Error reported by the server
    pub error: Option<String>,
}

impl SearchResponse {
    /// Convert to a search page
    ///
    /// # Errors
    ///
    /// Returns an external service error when the body carries `error`
    pub fn into_page(self) -> AppResult<SearchPage> {
        if let Some(error) = self.error {
            return Err(AppError::external_service("search", error));
        }
        Ok(SearchPage {
            query: self.query,
            foods: self.foods.iter().map(catalog_food_from_value).collect(),
            pagination: self.pagination,
        })
    }
}

/// Body of `GET portions`
#[derive(Debug, Deserialize)]
pub struct PortionsResponse {
    /// Raw portion objects
    #[serde(default)]
    pub portions: Vec<Value>,
}

impl PortionsResponse {
    /// Portions with a label and a positive weight
    #[must_use]
    pub fn into_portions(self) -> Vec<ServerPortion> {
        self.portions
            .iter()
            .filter_map(|portion| {
                let label = lenient_string(portion.get("label"))?;
                let weight_grams = portion.get("weight").and_then(lenient_f64)?;
                (weight_grams > 0.0).then_some(ServerPortion {
                    label,
                    weight_grams,
                })
            })
            .collect()
    }
}

/// Food object sent with `log_meal`
#[derive(Debug, Serialize)]
pub struct FoodPayload {
    /// Catalog id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
    /// Name
    pub name: String,
    /// kcal per 100 g
    pub cal: f64,
    /// Protein per 100 g
    pub protein: f64,
    /// Carbohydrates per 100 g
    pub carbo: f64,
    /// Fat per 100 g
    pub fat: f64,
    /// `local` or `api`
    pub source: &'static str,
}

/// Body of `POST log_meal`
#[derive(Debug, Serialize)]
pub struct LogMealBody {
    /// Food eaten
    pub food: FoodPayload,
    /// Legacy slot key
    pub meal_type: &'static str,
    /// Grams eaten
    pub quantity: f64,
    /// `YYYY-MM-DD`
    pub date_eaten: String,
}

impl From<&LogMealRequest> for LogMealBody {
    fn from(request: &LogMealRequest) -> Self {
        Self {
            food: FoodPayload {
                food_id: request.food.id.clone(),
                name: request.food.name.clone(),
                cal: request.food.per_100g.calories,
                protein: request.food.per_100g.protein,
                carbo: request.food.per_100g.carbs,
                fat: request.food.per_100g.fat,
                source: request.food.source.as_str(),
            },
            meal_type: request.meal_slot.wire_key(),
            quantity: request.quantity_grams,
            date_eaten: request.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Body of `POST delete_meal`
#[derive(Debug, Serialize)]
pub struct DeleteMealBody {
    /// Catalog id
    pub food_id: Option<String>,
    /// Legacy slot key
    pub meal_type: &'static str,
    /// Grams logged
    pub quantity: f64,
    /// `YYYY-MM-DD`
    pub date_eaten: String,
}

impl From<&DeleteMealRequest> for DeleteMealBody {
    fn from(request: &DeleteMealRequest) -> Self {
        Self {
            food_id: request.food_id.clone(),
            meal_type: request.meal_slot.wire_key(),
            quantity: request.quantity_grams,
            date_eaten: request.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Meal row from `GET get_meals_for_date`
#[must_use]
pub fn logged_meal_from_value(value: &Value) -> LoggedMeal {
    LoggedMeal {
        food_id: lenient_string(value.get("food_id")),
        name: lenient_string(value.get("food_name")).unwrap_or_else(|| "Unknown food".to_owned()),
        meal_slot: lenient_string(value.get("meal_type")).unwrap_or_default(),
        quantity_grams: value.get("quantity").and_then(lenient_f64).unwrap_or(0.0),
        totals: NutritionFacts::new(
            lenient_nutrient(value.get("calories")),
            lenient_nutrient(value.get("protein")),
            lenient_nutrient(value.get("carbohydrates")),
            lenient_nutrient(value.get("fat")),
        ),
        logged_at: lenient_string(value.get("logged_at")),
    }
}

/// Body of `GET get_meals_for_date`
#[derive(Debug, Deserialize)]
pub struct MealsResponse {
    /// Raw meal rows
    #[serde(default)]
    pub meals: Vec<Value>,
    /// Error reported by the server
    pub error: Option<String>,
}

impl MealsResponse {
    /// Convert to meal rows
    ///
    /// # Errors
    ///
    /// Returns an external service error when the body carries `error`
    pub fn into_rows(self) -> AppResult<Vec<LoggedMeal>> {
        if let Some(error) = self.error {
            return Err(AppError::external_service("get_meals_for_date", error));
        }
        Ok(self.meals.iter().map(logged_meal_from_value).collect())
    }
}

/// Generic `{success, error, message}` acknowledgement
#[derive(Debug, Default, Deserialize)]
pub struct StatusResponse {
    /// Success flag
    pub success: Option<bool>,
    /// Error text
    pub error: Option<String>,
    /// Informational text
    pub message: Option<String>,
}

impl StatusResponse {
    /// Turn the acknowledgement into a result
    ///
    /// # Errors
    ///
    /// Returns an external service error when `error` is set or `success` is false
    pub fn into_result(self, operation: &str) -> AppResult<()> {
        match (self.error, self.success) {
            (Some(error), _) => Err(AppError::external_service(operation, error)),
            (None, Some(false)) => Err(AppError::external_service(
                operation,
                self.message.unwrap_or_else(|| "request was not successful".to_owned()),
            )),
            (None, _) => Ok(()),
        }
    }
}

/// Body of `POST api/set_goal`
#[derive(Debug, Serialize)]
pub struct SetGoalBody {
    /// Goal kind
    pub goal_type: GoalType,
    /// Target weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    /// `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    /// Custom daily calories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_calories: Option<u32>,
}

impl From<&GoalRequest> for SetGoalBody {
    fn from(request: &GoalRequest) -> Self {
        Self {
            goal_type: request.goal_type,
            target_weight: request.target_weight,
            target_date: request
                .target_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
            custom_calories: request.custom_calories,
        }
    }
}

/// Body of `POST api/set_goal` response
#[derive(Debug, Deserialize)]
pub struct SetGoalResponse {
    /// Error text
    pub error: Option<String>,
    /// Stored goal summary
    pub goal: Option<Value>,
}

impl SetGoalResponse {
    /// Daily calorie target the server derived
    ///
    /// # Errors
    ///
    /// Returns an external service error when the body carries `error`
    pub fn into_calories(self) -> AppResult<Option<u32>> {
        if let Some(error) = self.error {
            return Err(AppError::external_service("set_goal", error));
        }
        Ok(self
            .goal
            .as_ref()
            .and_then(|goal| goal.get("calculated_daily_calories"))
            .and_then(lenient_f64)
            .filter(|calories| *calories > 0.0)
            .map(|calories| calories.round() as u32))
    }
}

/// Body of `POST api/log_weight`
#[derive(Debug, Serialize)]
pub struct LogWeightBody {
    /// Weight in kg
    pub weight: f64,
    /// `YYYY-MM-DD`
    pub date: String,
}

fn goal_from_value(value: &Value, start_weight: Option<f64>) -> Option<Goal> {
    let goal_type = GoalType::parse(value.get("goal_type")?.as_str()?)?;
    Some(Goal {
        goal_type,
        start_weight,
        target_weight: value.get("target_weight").and_then(lenient_f64),
        target_date: parse_date(value.get("target_date")),
        created_date: parse_date(value.get("goal_created_date")),
        daily_calorie_target: value
            .get("daily_calorie_target")
            .and_then(lenient_f64)
            .filter(|calories| *calories > 0.0)
            .map(|calories| calories.round() as u32),
    })
}

/// Body of `GET api/weight_history`
#[derive(Debug, Deserialize)]
pub struct WeightHistoryResponse {
    /// Weight logs
    #[serde(default)]
    pub weight_logs: Vec<WeightLog>,
    /// Stored goal
    pub goal_data: Option<Value>,
    /// Server projection
    #[serde(default)]
    pub projected_progress: Vec<ProjectedWeight>,
    /// Error text
    pub error: Option<String>,
}

impl WeightHistoryResponse {
    /// Convert to a weight history
    ///
    /// # Errors
    ///
    /// Returns an external service error when the body carries `error`
    pub fn into_history(self) -> AppResult<WeightHistory> {
        if let Some(error) = self.error {
            return Err(AppError::external_service("weight_history", error));
        }
        Ok(WeightHistory {
            goal: self
                .goal_data
                .as_ref()
                .and_then(|goal| goal_from_value(goal, None)),
            logs: self.weight_logs,
            projected: self.projected_progress,
        })
    }
}

/// Convert the body of `GET api/goal_status`
///
/// # Errors
///
/// Returns an external service error when the body carries `error`
pub fn goal_snapshot_from_value(value: &Value) -> AppResult<GoalSnapshot> {
    if let Some(error) = lenient_string(value.get("error")) {
        return Err(AppError::external_service("goal_status", error));
    }
    if !lenient_bool(value.get("has_goal")) {
        return Ok(GoalSnapshot::default());
    }

    let latest_weight = value
        .get("latest_logged_weight")
        .and_then(lenient_f64)
        .zip(parse_date(value.get("latest_weight_date")))
        .map(|(weight, date)| WeightLog {
            weight,
            date,
            notes: None,
        });

    Ok(GoalSnapshot {
        goal: goal_from_value(value, value.get("current_weight").and_then(lenient_f64)),
        latest_weight,
        bmr: value.get("bmr").and_then(lenient_f64),
        tdee: value.get("tdee").and_then(lenient_f64),
    })
}

/// Body of `POST api/update_profile` response
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    /// Stored profile
    pub user: Option<UserProfile>,
    /// Error text
    pub error: Option<String>,
}

impl ProfileResponse {
    /// Stored profile
    ///
    /// # Errors
    ///
    /// Returns an external service error when the body carries `error` or no user
    pub fn into_profile(self) -> AppResult<UserProfile> {
        if let Some(error) = self.error {
            return Err(AppError::external_service("update_profile", error));
        }
        self.user
            .ok_or_else(|| AppError::external_service("update_profile", "response had no user"))
    }
}

fn notification_from_value(value: &Value) -> Option<Notification> {
    Some(Notification {
        id: value.get("id").and_then(Value::as_i64)?,
        title: lenient_string(value.get("title")).unwrap_or_default(),
        message: lenient_string(value.get("message")).unwrap_or_default(),
        kind: lenient_string(value.get("type")).unwrap_or_else(|| "info".to_owned()),
        is_read: lenient_bool(value.get("is_read")),
        created_at: value
            .get("created_at")
            .and_then(Value::as_str)
            .and_then(parse_timestamp),
    })
}

/// Body of `GET api/notifications`
#[derive(Debug, Deserialize)]
pub struct NotificationsResponse {
    /// Raw notifications
    #[serde(default)]
    pub notifications: Vec<Value>,
    /// Unread count
    #[serde(default)]
    pub unread_count: u32,
    /// Error text
    pub error: Option<String>,
}

impl NotificationsResponse {
    /// Convert to a notification page, dropping entries without an id
    ///
    /// # Errors
    ///
    /// Returns an external service error when the body carries `error`
    pub fn into_page(self) -> AppResult<NotificationPage> {
        if let Some(error) = self.error {
            return Err(AppError::external_service("notifications", error));
        }
        Ok(NotificationPage {
            notifications: self
                .notifications
                .iter()
                .filter_map(notification_from_value)
                .collect(),
            unread_count: self.unread_count,
        })
    }
}
