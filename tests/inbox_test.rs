// ABOUTME: Tests for the notification inbox, unread badge, and relative timestamps
// ABOUTME: Validates badge capping, read-flag updates, and failure handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, NaiveDateTime};
use common::{test_session, ymd};
use mealtrack::errors::ErrorCode;
use mealtrack::inbox::{badge_text, time_ago};
use mealtrack::models::Notification;
use mealtrack::providers::synthetic::{Operation, SyntheticBackend};

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    ymd(2025, 3, 10).and_hms_opt(hour, minute, 0).unwrap()
}

fn notification(id: i64, is_read: bool, created_at: NaiveDateTime) -> Notification {
    Notification {
        id,
        title: format!("Notice {id}"),
        message: "Check your progress".to_owned(),
        kind: "info".to_owned(),
        is_read,
        created_at: Some(created_at),
    }
}

fn seed(backend: &SyntheticBackend) {
    backend.add_notification(notification(1, true, at(7, 0))).unwrap();
    backend.add_notification(notification(2, false, at(8, 0))).unwrap();
    backend.add_notification(notification(3, false, at(9, 0))).unwrap();
}

// ============================================================================
// Badge and relative time
// ============================================================================

#[test]
fn test_badge_text() {
    assert_eq!(badge_text(0), None);
    assert_eq!(badge_text(1).as_deref(), Some("1"));
    assert_eq!(badge_text(99).as_deref(), Some("99"));
    assert_eq!(badge_text(100).as_deref(), Some("99+"));
}

#[test]
fn test_time_ago_buckets() {
    let now = at(12, 0);
    assert_eq!(time_ago(now - Duration::seconds(30), now), "Just now");
    assert_eq!(time_ago(now - Duration::minutes(1), now), "1 min ago");
    assert_eq!(time_ago(now - Duration::minutes(45), now), "45 mins ago");
    assert_eq!(time_ago(now - Duration::hours(1), now), "1 hour ago");
    assert_eq!(time_ago(now - Duration::hours(23), now), "23 hours ago");
    assert_eq!(time_ago(now - Duration::days(2), now), "2 days ago");
    assert_eq!(time_ago(now - Duration::days(9), now), "2025-03-01");
}

// ============================================================================
// Inbox through the session
// ============================================================================

#[tokio::test]
async fn test_load_orders_newest_first() {
    let (backend, mut session) = test_session();
    seed(&backend);

    session.load_notifications().await.unwrap();
    let ids: Vec<i64> = session
        .inbox()
        .notifications()
        .iter()
        .map(|notification| notification.id)
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(session.inbox().unread_count(), 2);
    assert_eq!(session.inbox().badge().as_deref(), Some("2"));
}

#[tokio::test]
async fn test_mark_read_decrements_once() {
    let (backend, mut session) = test_session();
    seed(&backend);
    session.load_notifications().await.unwrap();

    session.mark_notification_read(3).await.unwrap();
    assert_eq!(session.inbox().unread_count(), 1);
    session.mark_notification_read(3).await.unwrap();
    assert_eq!(session.inbox().unread_count(), 1);
    // Already read
    session.mark_notification_read(1).await.unwrap();
    assert_eq!(session.inbox().unread_count(), 1);
}

#[tokio::test]
async fn test_mark_all_read_clears_badge() {
    let (backend, mut session) = test_session();
    seed(&backend);
    session.load_notifications().await.unwrap();

    session.mark_all_notifications_read().await.unwrap();
    assert_eq!(session.inbox().badge(), None);
    assert!(session
        .inbox()
        .notifications()
        .iter()
        .all(|notification| notification.is_read));

    session.load_notifications().await.unwrap();
    assert_eq!(session.inbox().unread_count(), 0);
}

#[tokio::test]
async fn test_failed_mark_read_keeps_local_state() {
    let (backend, mut session) = test_session();
    seed(&backend);
    session.load_notifications().await.unwrap();
    backend.fail(Operation::MarkRead).unwrap();

    assert!(session.mark_notification_read(2).await.is_err());
    assert_eq!(session.inbox().unread_count(), 2);
    assert!(!session.inbox().notifications()[1].is_read);
}

#[tokio::test]
async fn test_unknown_notification_is_not_found() {
    let (backend, mut session) = test_session();
    seed(&backend);
    session.load_notifications().await.unwrap();

    let error = session.mark_notification_read(42).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}
