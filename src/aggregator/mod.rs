//! Summaries computed over a collection of [WorkLogEntry]. Everything here is a pure function of
//! its input: nothing is cached and nothing can fail. Stored hours are converted with
//! [Hours::value](crate::storage::entities::Hours::value), those that can't be read as a number are
//! NaN and end up as NaN in whatever sum they take part in.

pub mod week;

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use week::{week_key_of, WeekKey};

use crate::{
    storage::entities::{Category, WorkLogEntry},
    utils::percentage::{hours_percentage, Percentage},
};

/// Amount of weeks kept by [weekly_totals].
pub const RECENT_WEEKS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklyBucket {
    pub week: WeekKey,
    /// Unrounded sum, rounding is left to whoever displays it.
    pub total_hours: f64,
    pub log_count: usize,
}

impl WeeklyBucket {
    fn new(week: WeekKey) -> Self {
        Self {
            week,
            total_hours: 0.,
            log_count: 0,
        }
    }

    pub fn avg_hours(&self) -> f64 {
        average(self.total_hours, self.log_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total_hours: f64,
    pub log_count: usize,
}

impl CategoryTotal {
    fn new(category: Category) -> Self {
        Self {
            category,
            total_hours: 0.,
            log_count: 0,
        }
    }

    pub fn avg_hours(&self) -> f64 {
        average(self.total_hours, self.log_count)
    }
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.
    } else {
        total / count as f64
    }
}

/// Returns hours summed per week for the [RECENT_WEEKS] most recent weeks that have entries,
/// oldest week first.
pub fn weekly_totals(entries: &[WorkLogEntry]) -> Vec<WeeklyBucket> {
    let mut map = BTreeMap::<WeekKey, WeeklyBucket>::new();

    for entry in entries {
        let week = week_key_of(entry.date);
        let bucket = map.entry(week).or_insert_with(|| WeeklyBucket::new(week));
        bucket.total_hours += entry.hours.value();
        bucket.log_count += 1;
    }

    let skip = map.len().saturating_sub(RECENT_WEEKS);
    map.into_values().skip(skip).collect()
}

/// Total hours logged in the week `today` belongs to.
pub fn current_week_total(entries: &[WorkLogEntry], today: NaiveDate) -> f64 {
    let current = week_key_of(today);
    entries
        .iter()
        .filter(|v| week_key_of(v.date) == current)
        .map(|v| v.hours.value())
        .sum()
}

/// Returns hours summed per category. Categories without entries are left out, the rest follow
/// the declaration order of [Category].
pub fn category_totals(entries: &[WorkLogEntry]) -> Vec<CategoryTotal> {
    let mut map = HashMap::<Category, CategoryTotal>::new();

    for v in entries {
        let total = map
            .entry(v.category)
            .or_insert_with(|| CategoryTotal::new(v.category));
        total.total_hours += v.hours.value();
        total.log_count += 1;
    }

    let mut totals = map.into_values().collect::<Vec<_>>();
    totals.sort_by_key(|v| v.category);
    totals
}

pub fn average_hours_per_entry(entries: &[WorkLogEntry]) -> f64 {
    average(entries.iter().map(|v| v.hours.value()).sum(), entries.len())
}

/// Category with the most hours. Categories that add up to nothing never count as active, and on a
/// tie the one reported first wins.
pub fn most_active_category(totals: &[CategoryTotal]) -> Option<Category> {
    totals
        .iter()
        .fold(None::<&CategoryTotal>, |best, current| match best {
            Some(best) if current.total_hours <= best.total_hours => Some(best),
            _ if current.total_hours > 0. => Some(current),
            _ => best,
        })
        .map(|v| v.category)
}

/// Share of a category in the hours of all categories.
pub fn category_share(total: &CategoryTotal, totals: &[CategoryTotal]) -> Percentage {
    hours_percentage(total.total_hours, totals.iter().map(|v| v.total_hours).sum())
}
