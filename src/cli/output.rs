use ansi_term::{Colour, Style};

use crate::{
    aggregator::category_share,
    backend::{DashboardSummary, Recorded},
    storage::entities::WorkLogEntry,
    utils::time::{date_stamp, round_to_tenth},
};

/// Widest a bar of the dashboard can get.
const BAR_WIDTH: usize = 30;

pub fn format_hours(hours: f64) -> String {
    format!("{:.1}h", round_to_tenth(hours))
}

fn bar(fraction: f64) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0., 1.)
    } else {
        0.
    };
    "█".repeat((fraction * BAR_WIDTH as f64).round() as usize)
}

fn heading(text: &str) -> String {
    Style::new().bold().paint(text).to_string()
}

pub fn error_banner(message: &str) -> String {
    Colour::Red.bold().paint(format!("! {message}")).to_string()
}

pub fn print_dashboard(summary: &DashboardSummary) {
    let most_active = summary
        .most_active_category
        .map_or_else(|| "None".to_string(), |v| v.to_string());

    println!("{}", heading("Overview"));
    println!("This week\t{}", format_hours(summary.current_week_hours));
    println!("Total entries\t{}", summary.total_entries);
    println!("Most active\t{most_active}");
    println!("Average hours\t{}", format_hours(summary.average_hours));
    println!();

    println!("{}", heading("Weekly hours"));
    let max_week = summary
        .weekly
        .iter()
        .map(|v| v.total_hours)
        .fold(0., f64::max);
    for week in &summary.weekly {
        println!(
            "{}\t{:>7}\t{:>3} entries\t{} per entry\t{}",
            week.label,
            format_hours(week.total_hours),
            week.log_count,
            format_hours(week.avg_hours),
            bar(week.total_hours / max_week)
        );
    }
    println!();

    println!("{}", heading("Categories"));
    for total in &summary.categories {
        let share = category_share(total, &summary.categories);
        println!(
            "{:<12}\t{:>7}\t{:>4}\t{} per entry\t{}",
            total.category.to_string(),
            format_hours(total.total_hours),
            share.to_string(),
            format_hours(total.avg_hours()),
            bar(*share / 100.)
        );
    }
}

pub fn print_logs(logs: &[WorkLogEntry]) {
    println!("{}", heading("Date\tHours\tCategory\tDescription"));
    for log in logs {
        println!(
            "{}\t{}\t{}\t{}",
            date_stamp(log.date),
            format_hours(log.hours.value()),
            log.category,
            log.description
        );
    }
}

pub fn print_recorded(recorded: &Recorded) {
    let entry = &recorded.entry;
    println!(
        "Logged {} of {} on {}",
        format_hours(entry.hours.value()),
        entry.category,
        date_stamp(entry.date)
    );
    println!("This week\t{}", format_hours(recorded.current_week_hours));
    if let Some(category) = recorded.most_active_category {
        println!("Most active\t{category}");
    }
}
