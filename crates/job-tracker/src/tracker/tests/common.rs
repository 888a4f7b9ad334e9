use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::TrackerConfig;
use crate::tracker::domain::{ApplicationId, ApplicationRecord, SalaryField, ScreenshotRecord};
use crate::tracker::service::TrackerService;
use crate::tracker::store::{InMemoryRecordStore, RecordStore, StoreError};

pub(super) fn tracker_config(screenshot_dir: &std::path::Path) -> TrackerConfig {
    TrackerConfig {
        screenshot_dir: screenshot_dir.to_path_buf(),
        seed_csv: None,
    }
}

pub(super) fn application(
    company: &str,
    title: &str,
    status: &str,
    applied_date: &str,
) -> ApplicationRecord {
    ApplicationRecord {
        company: Some(company.to_string()),
        title: Some(title.to_string()),
        status: Some(status.to_string()),
        applied_date: Some(applied_date.to_string()),
        location_type: Some("Remote".to_string()),
        ..ApplicationRecord::default()
    }
}

/// Five applications spread over January 2025.
pub(super) fn january_batch() -> Vec<ApplicationRecord> {
    let mut records = vec![
        application("Netflix", "Senior Backend Engineer", "Applied", "2025-01-02"),
        application("Acme", "Full-Stack Developer II", "Rejected", "2025-01-06"),
        application("Globex", "Marketing Manager", "Applied", "2025-01-10"),
        application("Initech", "Data Scientist", "Interview 1", "2025-01-14"),
        application("Acme", "Frontend Engineer (React)", "Applied", "2025-01-16"),
    ];
    records[0].salary_min = Some(SalaryField::Amount(150000.0));
    records[1].salary_min = Some(SalaryField::Amount(110000.0));
    records[1].salary_max = Some(SalaryField::Amount(140000.0));
    records[2].location_type = Some("Onsite".to_string());
    records
}

pub(super) fn seeded_service(
    screenshot_dir: &std::path::Path,
) -> TrackerService<InMemoryRecordStore> {
    let service = TrackerService::new(
        Arc::new(InMemoryRecordStore::new()),
        &tracker_config(screenshot_dir),
    );
    service.import(january_batch()).expect("seed import");
    service
}

pub(super) struct UnavailableStore;

impl RecordStore for UnavailableStore {
    fn list_applications(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn get_application(
        &self,
        _id: ApplicationId,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn upsert_application(
        &self,
        _record: ApplicationRecord,
    ) -> Result<ApplicationId, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn delete_application(&self, _id: ApplicationId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn list_screenshots(&self, _id: ApplicationId) -> Result<Vec<ScreenshotRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn add_screenshot(
        &self,
        _id: ApplicationId,
        _image_path: String,
    ) -> Result<ScreenshotRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Serves applications normally but cannot record screenshots.
#[derive(Default)]
pub(super) struct ScreenshotOutageStore {
    inner: InMemoryRecordStore,
}

impl RecordStore for ScreenshotOutageStore {
    fn list_applications(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        self.inner.list_applications()
    }

    fn get_application(
        &self,
        id: ApplicationId,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        self.inner.get_application(id)
    }

    fn upsert_application(
        &self,
        record: ApplicationRecord,
    ) -> Result<ApplicationId, StoreError> {
        self.inner.upsert_application(record)
    }

    fn delete_application(&self, id: ApplicationId) -> Result<(), StoreError> {
        self.inner.delete_application(id)
    }

    fn list_screenshots(&self, id: ApplicationId) -> Result<Vec<ScreenshotRecord>, StoreError> {
        self.inner.list_screenshots(id)
    }

    fn add_screenshot(
        &self,
        _id: ApplicationId,
        _image_path: String,
    ) -> Result<ScreenshotRecord, StoreError> {
        Err(StoreError::Unavailable("screenshot table locked".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
