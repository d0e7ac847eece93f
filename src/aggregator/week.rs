use std::fmt::Display;

use chrono::{Datelike, NaiveDate};

/// Identifies an ISO-8601 week: the week-year and the week number within it.
///
/// Ordering is by year, then week, so sorting keys never depends on how they are printed. When
/// printed the week number is zero padded (`2024-W05`) which keeps string order consistent as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    pub fn new_opt(year: i32, week: u32) -> Option<Self> {
        // Existence of the week is checked against the calendar, 53rd weeks only exist in some years
        NaiveDate::from_isoywd_opt(year, week, chrono::Weekday::Mon).map(|_| Self { year, week })
    }
}

/// Week a date belongs to. Weeks start on Monday and belong to the year their Thursday falls in, so
/// the last days of December can land in week 1 of the next year and the first days of January in
/// the last week of the previous one.
pub fn week_key_of(date: NaiveDate) -> WeekKey {
    let iso = date.iso_week();
    WeekKey {
        year: iso.year(),
        week: iso.week(),
    }
}

impl Display for WeekKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}
