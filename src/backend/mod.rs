//! A backend is where the dashboard gets its data from. There are two: [local::LocalBackend] keeps
//! logs in a file and computes every summary itself, [remote::RemoteBackend] asks the api for both
//! logs and precomputed statistics. The cli only talks to [Backend].

pub mod local;
pub mod remote;

use anyhow::Result;
use async_trait::async_trait;

use crate::{
    aggregator::CategoryTotal,
    storage::entities::{Category, NewWorkLog, WorkLogEntry},
};

/// Hours for a single week of the trend.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekRow {
    pub label: String,
    pub total_hours: f64,
    pub log_count: usize,
    pub avg_hours: f64,
}

/// Everything the dashboard shows besides the logs themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub current_week_hours: f64,
    pub total_entries: usize,
    pub most_active_category: Option<Category>,
    pub average_hours: f64,
    /// Oldest week first.
    pub weekly: Vec<WeekRow>,
    pub categories: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub logs: Vec<WorkLogEntry>,
    pub summary: DashboardSummary,
}

/// Result of logging new work, with the figures that changed because of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub entry: WorkLogEntry,
    pub current_week_hours: f64,
    pub most_active_category: Option<Category>,
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Loads logs together with their summary. Either everything is loaded or nothing is.
    async fn snapshot(&self) -> Result<DashboardSnapshot>;

    /// Loads only the logs, without any of the figures computed over them.
    async fn logs(&self) -> Result<Vec<WorkLogEntry>>;

    async fn record(&self, log: NewWorkLog) -> Result<Recorded>;
}
