//! Application tracking: the record store boundary, job-title bucketing, filtering, and
//! the analytics derived from a snapshot of records.

pub mod analytics;
pub mod domain;
pub mod filter;
pub mod flow;
pub mod import;
pub mod router;
pub mod service;
pub mod store;
pub mod titles;

#[cfg(test)]
mod tests;

pub use analytics::{summarize, summarize_as_of, ApplicationSummary, CategoryCount, StatusCount};
pub use domain::{
    format_money, parse_date, ApplicationId, ApplicationRecord, SalaryField, ScreenshotRecord,
    LOCATION_TYPES, STATUS_OPTIONS, UNKNOWN_STATUS,
};
pub use filter::ApplicationFilter;
pub use flow::{summarize_flow, to_text, FlowDiagram, FlowEdge, FlowReport};
pub use import::{read_applications, read_applications_from_path, ImportError};
pub use router::tracker_router;
pub use service::{TrackerService, TrackerServiceError, ValidationError};
pub use store::{InMemoryRecordStore, RecordStore, StoreError};
pub use titles::{categorize, normalize_job_title, TitleBucket, TitleCategory};
