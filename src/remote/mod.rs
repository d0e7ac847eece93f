//! Client side of the work-log REST api. The server keeps the logs and precomputes statistics,
//! this module only consumes it.

pub mod rest_client;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::storage::entities::{Category, NewWorkLog, WorkLogEntry};

/// Hours for one week as reported by the server. Weeks are labeled by the server and are treated as
/// opaque text, the most recent week comes first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStat {
    pub week: String,
    pub total_hours: f64,
    #[serde(default)]
    pub log_count: usize,
    #[serde(default)]
    pub avg_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: Category,
    pub total_hours: f64,
    #[serde(default)]
    pub log_count: usize,
    #[serde(default)]
    pub avg_hours: f64,
}

/// Operations offered by the remote api.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogApi: Send + Sync {
    /// `GET /logs`
    async fn fetch_logs(&self) -> Result<Vec<WorkLogEntry>>;

    /// `POST /logs`. Returns the stored entry together with the id the server assigned.
    async fn create_log(&self, log: NewWorkLog) -> Result<WorkLogEntry>;

    /// `GET /stats/weekly`
    async fn weekly_stats(&self) -> Result<Vec<WeeklyStat>>;

    /// `GET /stats/categories`
    async fn category_stats(&self) -> Result<Vec<CategoryStat>>;
}
