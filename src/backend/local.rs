use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

use crate::{
    aggregator::{
        average_hours_per_entry, category_totals, current_week_total, most_active_category,
        weekly_totals,
    },
    storage::{
        entities::{NewWorkLog, WorkLogEntry},
        log_store::{append, LogStore},
    },
    utils::clock::Clock,
};

use super::{Backend, DashboardSnapshot, DashboardSummary, Recorded, WeekRow};

/// Builds the summary for logs kept locally.
pub fn summarize(logs: &[WorkLogEntry], today: NaiveDate) -> DashboardSummary {
    let categories = category_totals(logs);
    DashboardSummary {
        current_week_hours: current_week_total(logs, today),
        total_entries: logs.len(),
        most_active_category: most_active_category(&categories),
        average_hours: average_hours_per_entry(logs),
        weekly: weekly_totals(logs)
            .into_iter()
            .map(|v| WeekRow {
                label: v.week.to_string(),
                total_hours: v.total_hours,
                log_count: v.log_count,
                avg_hours: v.avg_hours(),
            })
            .collect(),
        categories,
    }
}

/// Backend over a [LogStore]. All of the summaries are computed on the spot.
pub struct LocalBackend<S: LogStore> {
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: LogStore> LocalBackend<S> {
    pub fn new(store: S, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl<S: LogStore + Send + Sync> Backend for LocalBackend<S> {
    async fn snapshot(&self) -> Result<DashboardSnapshot> {
        let logs = self.store.load().await?;
        let summary = summarize(&logs, self.clock.today());
        Ok(DashboardSnapshot { logs, summary })
    }

    async fn logs(&self) -> Result<Vec<WorkLogEntry>> {
        self.store.load().await
    }

    async fn record(&self, log: NewWorkLog) -> Result<Recorded> {
        let entry: WorkLogEntry = log.into();
        append(&self.store, entry.clone()).await?;
        info!("Recorded {entry:?}");

        let logs = self.store.load().await?;
        Ok(Recorded {
            entry,
            current_week_hours: current_week_total(&logs, self.clock.today()),
            most_active_category: most_active_category(&category_totals(&logs)),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::{
        backend::{local::LocalBackend, Backend},
        storage::{
            entities::{Category, NewWorkLog},
            log_store::{JsonFileStore, LogStore},
        },
        utils::{clock::Clock, logging::TEST_LOGGING},
    };

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn new_log(date: NaiveDate, hours: f64, category: Category) -> NewWorkLog {
        NewWorkLog {
            date,
            hours,
            category,
            description: "work".into(),
        }
    }

    #[tokio::test]
    async fn test_empty_snapshot() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let backend = LocalBackend::new(
            JsonFileStore::new(dir.path())?,
            Box::new(FixedClock(date(2024, 1, 3))),
        );

        let snapshot = backend.snapshot().await?;

        assert!(snapshot.logs.is_empty());
        assert_eq!(snapshot.summary.current_week_hours, 0.);
        assert_eq!(snapshot.summary.average_hours, 0.);
        assert_eq!(snapshot.summary.most_active_category, None);
        assert!(snapshot.summary.weekly.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_record_then_snapshot() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let store = Arc::new(JsonFileStore::new(dir.path())?);
        let backend = LocalBackend::new(store.clone(), Box::new(FixedClock(date(2024, 1, 3))));

        backend
            .record(new_log(date(2023, 12, 20), 6., Category::Research))
            .await?;
        backend
            .record(new_log(date(2024, 1, 1), 5., Category::Development))
            .await?;
        let recorded = backend
            .record(new_log(date(2024, 1, 3), 3., Category::Design))
            .await?;

        assert_eq!(recorded.entry.id, None);
        assert_eq!(recorded.current_week_hours, 8.);
        assert_eq!(recorded.most_active_category, Some(Category::Research));
        assert_eq!(store.load().await?.len(), 3);

        let summary = backend.snapshot().await?.summary;
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.current_week_hours, 8.);
        assert_eq!(summary.average_hours, 14. / 3.);
        assert_eq!(
            summary
                .weekly
                .iter()
                .map(|v| (v.label.as_str(), v.total_hours))
                .collect::<Vec<_>>(),
            vec![("2023-W51", 6.), ("2024-W01", 8.)]
        );
        assert_eq!(summary.weekly[1].log_count, 2);
        assert_eq!(summary.weekly[1].avg_hours, 4.);
        assert_eq!(summary.categories.len(), 3);

        assert_eq!(backend.logs().await?, store.load().await?);
        Ok(())
    }
}
