use serde::{Deserialize, Serialize};

use super::domain::ApplicationRecord;

/// In-memory narrowing of the application list by status, location type, and free text.
///
/// Empty selections do not filter. A record whose status or location type is missing never
/// matches a non-empty selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationFilter {
    pub statuses: Vec<String>,
    pub location_types: Vec<String>,
    pub search: Option<String>,
}

impl ApplicationFilter {
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.location_types.is_empty() && self.search_term().is_none()
    }

    /// Search is a case-insensitive substring match on company, title, or notes.
    pub fn matches(&self, record: &ApplicationRecord) -> bool {
        if !selected(&self.statuses, record.status.as_deref()) {
            return false;
        }

        if !selected(&self.location_types, record.location_type.as_deref()) {
            return false;
        }

        match self.search_term() {
            Some(term) => [&record.company, &record.title, &record.notes]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }

    pub fn apply(&self, records: &[ApplicationRecord]) -> Vec<ApplicationRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}

fn selected(options: &[String], value: Option<&str>) -> bool {
    if options.is_empty() {
        return true;
    }
    value.is_some_and(|value| options.iter().any(|option| option == value))
}

/// Split a comma-separated query value into trimmed, non-empty entries.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
