use chrono::NaiveDate;

/// This is the standard way of converting a date to a string in worklog.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Rounds hours to the single decimal they are displayed with.
pub fn round_to_tenth(hours: f64) -> f64 {
    (hours * 10.).round() / 10.
}
