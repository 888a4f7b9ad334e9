use chrono::NaiveDate;
use job_tracker::config::TrackerConfig;
use job_tracker::error::AppError;
use job_tracker::tracker::{read_applications_from_path, InMemoryRecordStore, TrackerService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build an in-memory tracker, optionally seeded from a CSV export.
pub(crate) fn in_memory_tracker(
    config: &TrackerConfig,
    seed_csv: Option<&Path>,
) -> Result<TrackerService<InMemoryRecordStore>, AppError> {
    let service = TrackerService::new(Arc::new(InMemoryRecordStore::new()), config);

    if let Some(path) = seed_csv {
        let records = read_applications_from_path(path)?;
        let imported = service.import(records)?;
        info!(path = %path.display(), imported, "seeded tracker from export");
    }

    Ok(service)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    job_tracker::tracker::parse_date(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM-DD"))
}
