//! Export of the whole collection into a pretty printed JSON file. The file can be read back with
//! [read_export] and yields exactly the collection that was exported.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::{storage::entities::WorkLogEntry, utils::time::date_stamp};

pub fn export_file_name(today: NaiveDate) -> String {
    format!("work-logs-{}.json", date_stamp(today))
}

pub fn render_export(entries: &[WorkLogEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Writes `entries` into `dir`, returning the path of the created file. An export made on the
/// same day replaces the previous one.
pub async fn export_logs(
    entries: &[WorkLogEntry],
    dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(today));
    let content = render_export(entries)?;
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write export {path:?}"))?;
    info!("Exported {} entries into {path:?}", entries.len());
    Ok(path)
}

pub async fn read_export(path: &Path) -> Result<Vec<WorkLogEntry>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read export {path:?}"))?;
    serde_json::from_str(&content).with_context(|| format!("{path:?} is not a work log export"))
}
