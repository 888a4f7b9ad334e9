use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;

use super::domain::{ApplicationId, ApplicationRecord, ScreenshotRecord};

/// Persistence boundary for applications and their screenshots. Each call is atomic.
pub trait RecordStore: Send + Sync {
    /// All applications, most recently applied first; undated records last.
    fn list_applications(&self) -> Result<Vec<ApplicationRecord>, StoreError>;
    fn get_application(&self, id: ApplicationId)
        -> Result<Option<ApplicationRecord>, StoreError>;
    /// Insert when `record.id` is `None`, otherwise replace the stored record.
    fn upsert_application(&self, record: ApplicationRecord) -> Result<ApplicationId, StoreError>;
    /// Remove an application together with its screenshots.
    fn delete_application(&self, id: ApplicationId) -> Result<(), StoreError>;
    /// Screenshots for an application, newest first.
    fn list_screenshots(&self, id: ApplicationId) -> Result<Vec<ScreenshotRecord>, StoreError>;
    fn add_screenshot(
        &self,
        id: ApplicationId,
        image_path: String,
    ) -> Result<ScreenshotRecord, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("application {0} not found")]
    NotFound(ApplicationId),
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store used by the CLI, the HTTP service, and tests.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    state: Mutex<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    last_application_id: u64,
    last_screenshot_id: u64,
    applications: BTreeMap<ApplicationId, ApplicationRecord>,
    screenshots: Vec<ScreenshotRecord>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn list_applications(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        let guard = self.state.lock().expect("record store mutex poisoned");
        let mut records: Vec<ApplicationRecord> = guard.applications.values().cloned().collect();
        records.sort_by(newest_applied_first);
        Ok(records)
    }

    fn get_application(
        &self,
        id: ApplicationId,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        let guard = self.state.lock().expect("record store mutex poisoned");
        Ok(guard.applications.get(&id).cloned())
    }

    fn upsert_application(
        &self,
        mut record: ApplicationRecord,
    ) -> Result<ApplicationId, StoreError> {
        let mut guard = self.state.lock().expect("record store mutex poisoned");
        let now = Utc::now();

        let id = match record.id {
            Some(id) => {
                let existing = guard
                    .applications
                    .get(&id)
                    .ok_or(StoreError::NotFound(id))?;
                record.created_at = existing.created_at;
                id
            }
            None => {
                guard.last_application_id += 1;
                record.created_at = Some(now);
                ApplicationId(guard.last_application_id)
            }
        };

        record.id = Some(id);
        record.updated_at = Some(now);
        guard.applications.insert(id, record);
        Ok(id)
    }

    fn delete_application(&self, id: ApplicationId) -> Result<(), StoreError> {
        let mut guard = self.state.lock().expect("record store mutex poisoned");
        if !guard.applications.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        guard.screenshots.retain(|shot| shot.application_id != id);
        guard.applications.remove(&id);
        Ok(())
    }

    fn list_screenshots(&self, id: ApplicationId) -> Result<Vec<ScreenshotRecord>, StoreError> {
        let guard = self.state.lock().expect("record store mutex poisoned");
        let mut shots: Vec<ScreenshotRecord> = guard
            .screenshots
            .iter()
            .filter(|shot| shot.application_id == id)
            .cloned()
            .collect();
        shots.sort_by(|a, b| b.captured_at.cmp(&a.captured_at).then(b.id.cmp(&a.id)));
        Ok(shots)
    }

    fn add_screenshot(
        &self,
        id: ApplicationId,
        image_path: String,
    ) -> Result<ScreenshotRecord, StoreError> {
        let mut guard = self.state.lock().expect("record store mutex poisoned");
        if !guard.applications.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }

        guard.last_screenshot_id += 1;
        let shot = ScreenshotRecord {
            id: guard.last_screenshot_id,
            application_id: id,
            image_path,
            captured_at: Utc::now(),
        };
        guard.screenshots.push(shot.clone());
        Ok(shot)
    }
}

fn newest_applied_first(a: &ApplicationRecord, b: &ApplicationRecord) -> Ordering {
    let by_applied = match (a.applied_on(), b.applied_on()) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_applied
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}
