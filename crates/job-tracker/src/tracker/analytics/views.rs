use chrono::NaiveDate;
use serde::Serialize;

/// KPI snapshot derived from a batch of application records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationSummary {
    pub total_count: usize,
    pub unique_companies: usize,
    pub applied_last_30_days: usize,
    pub apps_per_week: f64,
    pub avg_salary_min: Option<f64>,
    pub avg_salary_max: Option<f64>,
    pub top_title_categories: Vec<CategoryCount>,
    pub status_breakdown: Vec<StatusCount>,
    pub timeline: Vec<TimelinePoint>,
}

impl ApplicationSummary {
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Applications recorded on one applied date plus the running total up to that date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub applications: usize,
    pub cumulative: usize,
}
