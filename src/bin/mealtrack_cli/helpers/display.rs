// ABOUTME: Output formatting helpers for mealtrack-cli
// ABOUTME: Consistent display of search results, meals, progress, goals, and notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDateTime;
use mealtrack::inbox::{time_ago, Inbox};
use mealtrack::intelligence::{DailyProgress, MacroProgress, MacroTargets};
use mealtrack::ledger::{FoodEntry, MealAggregates};
use mealtrack::models::{GoalStatus, NutritionFacts, SearchPage};

fn macros_line(facts: &NutritionFacts) -> String {
    format!(
        "{:.0} kcal | P {:.1} g | C {:.1} g | F {:.1} g",
        facts.calories, facts.protein, facts.carbs, facts.fat
    )
}

/// Display one page of search results numbered from 1
pub fn display_search_page(page: &SearchPage) {
    let meta = &page.pagination;
    println!(
        "\nResults for '{}' (page {}/{}, {} total, {} local, {} from API)",
        page.query,
        meta.current_page,
        meta.total_pages,
        meta.total_results,
        meta.local_count,
        meta.api_count
    );
    println!("{}", "=".repeat(72));
    if page.foods.is_empty() {
        println!("No foods found");
        return;
    }
    for (position, food) in (1..).zip(&page.foods) {
        println!(
            "{position:>3}. {} [{}]  per 100 g: {}",
            food.name,
            food.source.as_str(),
            macros_line(&food.per_100g)
        );
    }
}

/// Display a freshly logged entry
pub fn display_entry_logged(entry: &FoodEntry) {
    let serving = entry.serving();
    println!(
        "Logged {} {} of {} to {}: {}",
        serving.quantity(),
        serving.unit(),
        entry.name(),
        entry.meal_slot().display_name(),
        macros_line(&entry.adjusted_nutrition())
    );
}

/// Display every meal slot with its entries and subtotal
pub fn display_meals(meals: &MealAggregates<'_>) {
    for meal in meals.values() {
        println!("\n{} ({:.0} kcal)", meal.slot.display_name(), meal.totals.calories);
        if meal.is_empty() {
            println!("   -");
            continue;
        }
        for entry in &meal.entries {
            println!(
                "   {:<32} {:>7.0} g   {}",
                entry.name(),
                entry.quantity_grams(),
                macros_line(&entry.adjusted_nutrition())
            );
        }
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = (percent / 5.0).round().clamp(0.0, 20.0) as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(20 - filled))
}

fn macro_line(name: &str, progress: &MacroProgress) {
    println!(
        "   {name:<8} {} {:>6.1} / {} g",
        progress_bar(progress.percent),
        progress.consumed,
        progress.target
    );
}

/// Display calorie and macro progress for the day
pub fn display_progress(progress: &DailyProgress) {
    println!("\n{}", "=".repeat(72));
    println!(
        "Calories {} {:.0} / {} kcal",
        progress_bar(progress.percent),
        progress.consumed,
        progress.budget
    );
    if progress.over_budget {
        println!("   {:.0} kcal over budget", progress.excess);
    } else {
        println!("   {:.0} kcal remaining", progress.remaining);
    }
    macro_line("Carbs", &progress.carbs);
    macro_line("Protein", &progress.protein);
    macro_line("Fat", &progress.fat);
}

/// Display gram targets for a calorie budget
pub fn display_targets(budget: u32, targets: &MacroTargets) {
    println!("\nMacro targets for {budget} kcal");
    println!("{}", "=".repeat(40));
    for (name, target) in [
        ("Carbs", targets.carbs),
        ("Protein", targets.protein),
        ("Fat", targets.fat),
    ] {
        println!("   {name:<8} {:>4} g  ({}%)", target.grams, target.percent);
    }
}

/// Display an evaluated goal
pub fn display_goal_status(status: &GoalStatus) {
    println!("\nGoal: {}", status.goal_type);
    println!("{}", "=".repeat(40));
    if let Some(target) = status.daily_calorie_target {
        println!("   Daily calories: {target} kcal");
    }
    if !status.goal_type.is_weight_goal() {
        return;
    }
    if let (Some(start), Some(target)) = (status.start_weight, status.target_weight) {
        println!("   Start {start:.1} kg -> target {target:.1} kg");
    }
    if let Some(current) = status.current_weight {
        println!("   Current: {current:.1} kg");
    }
    if let Some(percent) = status.progress_percent {
        println!("   Progress: {} {percent:.1}%", progress_bar(percent));
    }
    if let Some(remaining) = status.weight_remaining {
        println!("   Remaining: {remaining:+.1} kg");
    }
    if let (Some(date), Some(days)) = (status.target_date, status.days_remaining) {
        println!("   Target date: {date} ({days} days left)");
    }
}

/// Display notifications newest first with relative times
pub fn display_notifications(inbox: &Inbox, now: NaiveDateTime) {
    let badge = inbox.badge().unwrap_or_else(|| "0".to_owned());
    println!("\nNotifications ({badge} unread)");
    println!("{}", "=".repeat(60));
    if inbox.notifications().is_empty() {
        println!("No notifications");
        return;
    }
    for notification in inbox.notifications() {
        let marker = if notification.is_read { ' ' } else { '*' };
        let when = notification
            .created_at
            .map_or_else(String::new, |created| time_ago(created, now));
        println!("{marker} [{}] {}  {when}", notification.id, notification.title);
        if !notification.message.is_empty() {
            println!("    {}", notification.message);
        }
    }
}
