use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, instrument};

use crate::{
    aggregator::{average_hours_per_entry, most_active_category, CategoryTotal},
    remote::{CategoryStat, LogApi, WeeklyStat},
    storage::entities::{NewWorkLog, WorkLogEntry},
};

use super::{Backend, DashboardSnapshot, DashboardSummary, Recorded, WeekRow};

pub const FETCH_FAILED: &str = "Failed to fetch data. Please try again later.";
pub const CREATE_FAILED: &str = "Failed to create log. Please try again.";

/// Backend over the remote api. Weekly and category figures are taken as the server computed them.
pub struct RemoteBackend<A: LogApi> {
    api: A,
}

impl<A: LogApi> RemoteBackend<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

fn to_category_totals(stats: Vec<CategoryStat>) -> Vec<CategoryTotal> {
    stats
        .into_iter()
        .map(|v| CategoryTotal {
            category: v.category,
            total_hours: v.total_hours,
            log_count: v.log_count,
        })
        .collect()
}

/// The server reports the current week first.
fn current_week_hours(weekly: &[WeeklyStat]) -> f64 {
    weekly.first().map_or(0., |v| v.total_hours)
}

#[async_trait]
impl<A: LogApi> Backend for RemoteBackend<A> {
    #[instrument(skip(self))]
    async fn snapshot(&self) -> Result<DashboardSnapshot> {
        let (logs, weekly, categories) = tokio::try_join!(
            self.api.fetch_logs(),
            self.api.weekly_stats(),
            self.api.category_stats(),
        )
        .context(FETCH_FAILED)?;

        let categories = to_category_totals(categories);
        let summary = DashboardSummary {
            current_week_hours: current_week_hours(&weekly),
            total_entries: logs.len(),
            most_active_category: most_active_category(&categories),
            average_hours: average_hours_per_entry(&logs),
            weekly: weekly
                .into_iter()
                .rev()
                .map(|v| WeekRow {
                    label: v.week,
                    total_hours: v.total_hours,
                    log_count: v.log_count,
                    avg_hours: v.avg_hours,
                })
                .collect(),
            categories,
        };

        Ok(DashboardSnapshot { logs, summary })
    }

    #[instrument(skip(self))]
    async fn logs(&self) -> Result<Vec<WorkLogEntry>> {
        self.api.fetch_logs().await.context(FETCH_FAILED)
    }

    #[instrument(skip(self))]
    async fn record(&self, log: NewWorkLog) -> Result<Recorded> {
        let entry = self.api.create_log(log).await.context(CREATE_FAILED)?;
        info!("Created log {:?}", entry.id);

        let (weekly, categories) =
            tokio::try_join!(self.api.weekly_stats(), self.api.category_stats())
                .context(CREATE_FAILED)?;

        Ok(Recorded {
            entry,
            current_week_hours: current_week_hours(&weekly),
            most_active_category: most_active_category(&to_category_totals(categories)),
        })
    }
}
