use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::analytics::{summarize_as_of, ApplicationSummary};
use super::domain::{ApplicationId, ApplicationRecord, SalaryField, ScreenshotRecord};
use super::filter::ApplicationFilter;
use super::flow::FlowReport;
use super::store::{RecordStore, StoreError};
use crate::config::TrackerConfig;

/// Screenshot formats accepted for upload.
const SCREENSHOT_MIME_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

/// Service composing the record store with filtering and analytics.
pub struct TrackerService<S> {
    store: Arc<S>,
    screenshot_dir: PathBuf,
}

impl<S> TrackerService<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>, config: &TrackerConfig) -> Self {
        Self {
            store,
            screenshot_dir: config.screenshot_dir.clone(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn list(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationRecord>, TrackerServiceError> {
        let records = self.store.list_applications()?;
        if filter.is_empty() {
            return Ok(records);
        }
        Ok(filter.apply(&records))
    }

    pub fn get(&self, id: ApplicationId) -> Result<ApplicationRecord, TrackerServiceError> {
        let record = self
            .store
            .get_application(id)?
            .ok_or(StoreError::NotFound(id))?;
        Ok(record)
    }

    /// Validate and persist an application from the entry form. A record without an id is
    /// created; otherwise the stored record is replaced.
    pub fn save(&self, record: ApplicationRecord) -> Result<ApplicationId, TrackerServiceError> {
        let record = tidy(record)?;
        let is_new = record.id.is_none();
        let id = self.store.upsert_application(record)?;
        if is_new {
            info!(application_id = %id, "application created");
        } else {
            info!(application_id = %id, "application updated");
        }
        Ok(id)
    }

    pub fn delete(&self, id: ApplicationId) -> Result<(), TrackerServiceError> {
        self.store.delete_application(id)?;
        info!(application_id = %id, "application deleted");
        Ok(())
    }

    /// Bulk-load records, e.g. from a CSV export. Imported ids are discarded and rows are
    /// stored as-is without form validation.
    pub fn import(&self, records: Vec<ApplicationRecord>) -> Result<usize, TrackerServiceError> {
        let mut imported = 0;
        for mut record in records {
            record.id = None;
            self.store.upsert_application(record)?;
            imported += 1;
        }
        info!(imported, "applications imported");
        Ok(imported)
    }

    pub fn screenshots(
        &self,
        id: ApplicationId,
    ) -> Result<Vec<ScreenshotRecord>, TrackerServiceError> {
        self.get(id)?;
        Ok(self.store.list_screenshots(id)?)
    }

    /// Write an uploaded screenshot under `<screenshot_dir>/<id>/` and record it.
    pub fn attach_screenshot(
        &self,
        id: ApplicationId,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<ScreenshotRecord, TrackerServiceError> {
        let file_name = Path::new(file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.trim().is_empty())
            .ok_or(ValidationError::InvalidFileName)?;

        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        if !SCREENSHOT_MIME_TYPES.contains(&mime.essence_str()) {
            return Err(ValidationError::UnsupportedScreenshotType(mime.to_string()).into());
        }

        self.get(id)?;

        let app_dir = self.screenshot_dir.join(id.to_string());
        fs::create_dir_all(&app_dir)?;
        let stamp = Utc::now().format("%Y%m%d%H%M%S%6f");
        let path = app_dir.join(format!("{stamp}_{file_name}"));
        fs::write(&path, bytes)?;
        debug!(
            application_id = %id,
            path = %path.display(),
            size = bytes.len(),
            "screenshot written"
        );

        match self
            .store
            .add_screenshot(id, path.to_string_lossy().into_owned())
        {
            Ok(shot) => Ok(shot),
            Err(err) => {
                if let Err(cleanup) = fs::remove_file(&path) {
                    warn!(
                        path = %path.display(),
                        error = %cleanup,
                        "orphaned screenshot left behind"
                    );
                }
                Err(err.into())
            }
        }
    }

    pub fn summary(
        &self,
        filter: &ApplicationFilter,
        today: NaiveDate,
    ) -> Result<ApplicationSummary, TrackerServiceError> {
        let records = self.list(filter)?;
        Ok(summarize_as_of(&records, today))
    }

    pub fn flow(&self, filter: &ApplicationFilter) -> Result<FlowReport, TrackerServiceError> {
        let records = self.list(filter)?;
        Ok(FlowReport::from_records(&records))
    }
}

/// Form-level checks applied before an application is persisted.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("company is required")]
    MissingCompany,
    #[error("job title is required")]
    MissingTitle,
    #[error("salary must not be negative")]
    NegativeSalary,
    #[error("screenshot file name is missing or invalid")]
    InvalidFileName,
    #[error("unsupported screenshot type {0}; expected png or jpeg")]
    UnsupportedScreenshotType(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("screenshot storage failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Trim text fields, drop blanks, and treat a zero salary as "not provided".
fn tidy(mut record: ApplicationRecord) -> Result<ApplicationRecord, ValidationError> {
    for field in [
        &mut record.company,
        &mut record.title,
        &mut record.location_type,
        &mut record.location_detail,
        &mut record.link_url,
        &mut record.status,
        &mut record.description_short,
        &mut record.notes,
        &mut record.applied_date,
        &mut record.next_follow_up_date,
    ] {
        *field = field
            .take()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
    }

    if record.company.is_none() {
        return Err(ValidationError::MissingCompany);
    }
    if record.title.is_none() {
        return Err(ValidationError::MissingTitle);
    }

    record.salary_min = tidy_salary(record.salary_min.take())?;
    record.salary_max = tidy_salary(record.salary_max.take())?;
    Ok(record)
}

fn tidy_salary(value: Option<SalaryField>) -> Result<Option<SalaryField>, ValidationError> {
    match value {
        Some(SalaryField::Amount(amount)) if amount < 0.0 => Err(ValidationError::NegativeSalary),
        Some(SalaryField::Amount(amount)) if amount == 0.0 => Ok(None),
        Some(SalaryField::Text(raw)) if raw.trim().is_empty() => Ok(None),
        other => Ok(other),
    }
}
