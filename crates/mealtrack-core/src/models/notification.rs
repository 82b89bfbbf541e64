// ABOUTME: Notification model for the in-app inbox
// ABOUTME: Title, message, kind, read flag, and creation time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Inbox notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Server id
    pub id: i64,
    /// Headline
    pub title: String,
    /// Body text
    pub message: String,
    /// Category such as `info` or `goal`
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the user has read it
    pub is_read: bool,
    /// Creation time (UTC), absent when the server sent something unparseable
    pub created_at: Option<NaiveDateTime>,
}
