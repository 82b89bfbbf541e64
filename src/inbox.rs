// ABOUTME: Notification inbox state with unread badge and relative timestamps
// ABOUTME: Local read flags change only after the collaborator confirms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDateTime;
use tracing::debug;

use crate::constants::limits::UNREAD_BADGE_OVERFLOW;
use crate::errors::AppResult;
use crate::models::Notification;
use crate::providers::core::NotificationInbox;

/// Largest unread count shown as a number
pub const MAX_BADGE_COUNT: u32 = 99;

/// Loaded notifications and the unread count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inbox {
    notifications: Vec<Notification>,
    unread_count: u32,
}

impl Inbox {
    /// Empty inbox
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loaded notifications, newest first
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Unread notifications across the whole inbox
    #[must_use]
    pub const fn unread_count(&self) -> u32 {
        self.unread_count
    }

    /// Badge text, `None` when nothing is unread
    #[must_use]
    pub fn badge(&self) -> Option<String> {
        badge_text(self.unread_count)
    }

    /// Replace the contents with the latest `limit` notifications
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error, leaving the inbox unchanged
    pub async fn load(&mut self, source: &dyn NotificationInbox, limit: u32) -> AppResult<()> {
        let page = source.notifications(limit).await?;
        debug!(
            count = page.notifications.len(),
            unread = page.unread_count,
            "Loaded notifications"
        );
        self.notifications = page.notifications;
        self.unread_count = page.unread_count;
        Ok(())
    }

    /// Mark notification `id` read
    ///
    /// The unread count drops by one, never below zero, and only when the
    /// notification was loaded and still unread.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error, leaving the inbox unchanged
    pub async fn mark_read(&mut self, source: &dyn NotificationInbox, id: i64) -> AppResult<()> {
        source.mark_read(id).await?;
        if let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id && !notification.is_read)
        {
            notification.is_read = true;
            self.unread_count = self.unread_count.saturating_sub(1);
        }
        Ok(())
    }

    /// Mark every notification read
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error, leaving the inbox unchanged
    pub async fn mark_all_read(&mut self, source: &dyn NotificationInbox) -> AppResult<()> {
        source.mark_all_read().await?;
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
        self.unread_count = 0;
        Ok(())
    }
}

/// Badge text for `unread` notifications, hidden at zero and capped at "99+"
#[must_use]
pub fn badge_text(unread: u32) -> Option<String> {
    match unread {
        0 => None,
        n if n > MAX_BADGE_COUNT => Some(UNREAD_BADGE_OVERFLOW.to_owned()),
        n => Some(n.to_string()),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Relative label for a notification created at `created_at`
///
/// Under a minute is "Just now"; minutes, hours, and days up to a week are
/// counted; anything older shows the date.
#[must_use]
pub fn time_ago(created_at: NaiveDateTime, now: NaiveDateTime) -> String {
    let elapsed = now - created_at;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_owned()
    } else if minutes < 60 {
        plural(minutes, "min")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else {
        created_at.format("%Y-%m-%d").to_string()
    }
}
