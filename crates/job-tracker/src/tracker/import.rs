use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{ApplicationId, ApplicationRecord, SalaryField};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read application export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid application CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Load applications from a CSV export whose headers use the record field names.
///
/// Cells are trimmed and blank cells are treated as absent. Salary cells that are not
/// numbers are kept as text so the analytics can skip them.
pub fn read_applications<R: Read>(reader: R) -> Result<Vec<ApplicationRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<ApplicationRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

pub fn read_applications_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ApplicationRecord>, ImportError> {
    let file = File::open(path)?;
    read_applications(file)
}

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location_detail: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary_min: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary_max: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    link_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description_short: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    applied_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    next_follow_up_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    updated_at: Option<String>,
}

impl ApplicationRow {
    fn into_record(self) -> ApplicationRecord {
        ApplicationRecord {
            id: self
                .id
                .and_then(|raw| raw.parse::<u64>().ok())
                .map(ApplicationId),
            company: self.company,
            title: self.title,
            location_type: self.location_type,
            location_detail: self.location_detail,
            salary_min: self.salary_min.map(salary_cell),
            salary_max: self.salary_max.map(salary_cell),
            link_url: self.link_url,
            status: self.status,
            description_short: self.description_short,
            notes: self.notes,
            applied_date: self.applied_date,
            next_follow_up_date: self.next_follow_up_date,
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            updated_at: self.updated_at.as_deref().and_then(parse_timestamp),
        }
    }
}

fn salary_cell(raw: String) -> SalaryField {
    match raw.parse::<f64>() {
        Ok(amount) if amount.is_finite() => SalaryField::Amount(amount),
        _ => SalaryField::Text(raw),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
