use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status values offered by the entry form. Stored statuses are free text and may fall
/// outside this list.
pub const STATUS_OPTIONS: [&str; 11] = [
    "Wishlist",
    "Applied",
    "Recruiter Screen",
    "Interview 1",
    "Interview 2+",
    "Final Round",
    "Offer",
    "Accepted",
    "Rejected",
    "Withdrawn",
    "Ghosted",
];

/// Stand-in for a missing or blank status.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Location types offered by the entry form.
pub const LOCATION_TYPES: [&str; 4] = ["Remote", "Hybrid", "Onsite", "Unknown"];

/// Store-assigned identifier for an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Salary cell as it arrives from the store or an import: either a number or raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SalaryField {
    Amount(f64),
    Text(String),
}

impl SalaryField {
    /// Numeric value, or `None` when the cell is not a finite number.
    pub fn amount(&self) -> Option<f64> {
        let value = match self {
            Self::Amount(value) => *value,
            Self::Text(raw) => raw.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for SalaryField {
    fn from(value: f64) -> Self {
        Self::Amount(value)
    }
}

/// One tracked job application. Every field other than the identifier is optional
/// free text or a loosely typed value; analytics tolerate malformed content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationRecord {
    pub id: Option<ApplicationId>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub location_type: Option<String>,
    pub location_detail: Option<String>,
    pub salary_min: Option<SalaryField>,
    pub salary_max: Option<SalaryField>,
    pub link_url: Option<String>,
    pub status: Option<String>,
    pub description_short: Option<String>,
    pub notes: Option<String>,
    pub applied_date: Option<String>,
    pub next_follow_up_date: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApplicationRecord {
    pub fn applied_on(&self) -> Option<NaiveDate> {
        self.applied_date.as_deref().and_then(parse_date)
    }

    pub fn salary_min_amount(&self) -> Option<f64> {
        self.salary_min.as_ref().and_then(SalaryField::amount)
    }

    pub fn salary_max_amount(&self) -> Option<f64> {
        self.salary_max.as_ref().and_then(SalaryField::amount)
    }

    /// Human-friendly one-line label, e.g. `Acme — Backend Engineer (Applied, 2025-01-08)`.
    pub fn option_label(&self) -> String {
        let company = non_blank(self.company.as_deref()).unwrap_or("Unknown company");
        let title = non_blank(self.title.as_deref()).unwrap_or("Unknown role");
        let status = non_blank(self.status.as_deref()).unwrap_or("Unknown status");
        match non_blank(self.applied_date.as_deref()) {
            Some(applied) => format!("{company} — {title} ({status}, {applied})"),
            None => format!("{company} — {title} ({status})"),
        }
    }
}

/// Screenshot of a job posting attached to an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotRecord {
    pub id: u64,
    pub application_id: ApplicationId,
    pub image_path: String,
    pub captured_at: DateTime<Utc>,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Bucket key for a status: the trimmed text, or [`UNKNOWN_STATUS`] when null or blank.
pub fn status_key(status: Option<&str>) -> String {
    non_blank(status).unwrap_or(UNKNOWN_STATUS).to_string()
}

/// Parse an ISO-8601 date or timestamp into a calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|dt| dt.date())
}

/// Render a salary as whole dollars with thousands separators; blank when absent.
pub fn format_money(value: Option<f64>) -> String {
    let Some(value) = value.filter(|value| value.is_finite()) else {
        return String::new();
    };

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 8).expect("valid date");
        assert_eq!(parse_date("2025-01-08"), Some(expected));
        assert_eq!(parse_date(" 2025-01-08T09:30:00Z "), Some(expected));
        assert_eq!(parse_date("2025-01-08 09:30:00"), Some(expected));
        assert_eq!(parse_date("2025-01-08T09:30:00.125"), Some(expected));
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn salary_text_must_be_numeric() {
        assert_eq!(SalaryField::Text(" 95000 ".into()).amount(), Some(95000.0));
        assert_eq!(SalaryField::Text("competitive".into()).amount(), None);
        assert_eq!(SalaryField::Amount(f64::NAN).amount(), None);
        assert_eq!(SalaryField::Amount(120000.0).amount(), Some(120000.0));
    }

    #[test]
    fn salary_field_deserializes_numbers_and_strings() {
        let record: ApplicationRecord =
            serde_json::from_str(r#"{"salary_min": 100000, "salary_max": "n/a", "extra": 1}"#)
                .expect("record parses");
        assert_eq!(record.salary_min_amount(), Some(100000.0));
        assert_eq!(record.salary_max_amount(), None);
        assert!(record.id.is_none());
    }

    #[test]
    fn option_label_falls_back_for_missing_fields() {
        let record = ApplicationRecord {
            company: Some("Acme".into()),
            status: Some("Applied".into()),
            applied_date: Some("2025-01-08".into()),
            ..ApplicationRecord::default()
        };
        assert_eq!(
            record.option_label(),
            "Acme — Unknown role (Applied, 2025-01-08)"
        );
        assert_eq!(
            ApplicationRecord::default().option_label(),
            "Unknown company — Unknown role (Unknown status)"
        );
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(Some(120000.0)), "$120,000");
        assert_eq!(format_money(Some(999.6)), "$1,000");
        assert_eq!(format_money(Some(1234567.0)), "$1,234,567");
        assert_eq!(format_money(Some(0.0)), "$0");
        assert_eq!(format_money(None), "");
    }
}
