use chrono::{Local, NaiveDate};

/// Represents an entity responsible for providing dates across application. This allows "today"
/// to be pinned during testing.
pub trait Clock: Sync + Send + 'static {
    fn today(&self) -> NaiveDate;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

