//! Personal job-application tracker: record store, job-title bucketing, and the analytics
//! that summarize an application history.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracker;
