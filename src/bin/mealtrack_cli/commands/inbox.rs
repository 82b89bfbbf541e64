// ABOUTME: Notification command for mealtrack-cli
// ABOUTME: Lists the latest notifications and optionally marks them read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::Utc;
use mealtrack::session::Session;

use crate::helpers::display::display_notifications;

/// Print notifications, then mark them read when asked
pub async fn show(session: &mut Session, mark_all_read: bool) -> Result<()> {
    session.load_notifications().await?;
    display_notifications(session.inbox(), Utc::now().naive_utc());

    if mark_all_read && session.inbox().unread_count() > 0 {
        session.mark_all_notifications_read().await?;
        println!("All notifications marked read");
    }
    Ok(())
}
