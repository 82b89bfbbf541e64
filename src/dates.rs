// ABOUTME: Date labels and the Monday-first month grid used for day navigation
// ABOUTME: Pure functions of a date and a supplied "today"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Datelike, Days, NaiveDate};

/// Short label for `date`: "Today", "Yesterday", "Tomorrow", or e.g. "Mar 7"
#[must_use]
pub fn display_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_owned(),
        -1 => "Yesterday".to_owned(),
        1 => "Tomorrow".to_owned(),
        _ => date.format("%b %-d").to_string(),
    }
}

/// Heading for the day's meal list, e.g. "Today's Meals"
#[must_use]
pub fn meals_title(date: NaiveDate, today: NaiveDate) -> String {
    format!("{}'s Meals", display_label(date, today))
}

/// Heading for the day's progress panel, e.g. "Yesterday's Progress"
#[must_use]
pub fn progress_title(date: NaiveDate, today: NaiveDate) -> String {
    format!("{}'s Progress", display_label(date, today))
}

/// `date` shifted by `delta` days, `None` outside the calendar range
#[must_use]
pub fn shift_days(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(delta.unsigned_abs());
    if delta >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// Day shown in the cell
    pub date: NaiveDate,
    /// Whether the day belongs to the previous month
    pub leading: bool,
    /// Whether the day is today
    pub is_today: bool,
    /// Whether the day is the active ledger date
    pub is_selected: bool,
}

/// Monday-first grid for `year`-`month`
///
/// Starts with the days of the previous month that share the first week,
/// followed by every day of the month. Returns an empty grid for an invalid
/// month.
#[must_use]
pub fn calendar_month(
    year: i32,
    month: u32,
    today: NaiveDate,
    selected: NaiveDate,
) -> Vec<CalendarDay> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let leading = u64::from(first.weekday().num_days_from_monday());
    let Some(start) = first.checked_sub_days(Days::new(leading)) else {
        return Vec::new();
    };

    start
        .iter_days()
        .take_while(|day| *day < first || day.month() == month)
        .map(|date| CalendarDay {
            date,
            leading: date < first,
            is_today: date == today,
            is_selected: date == selected,
        })
        .collect()
}
