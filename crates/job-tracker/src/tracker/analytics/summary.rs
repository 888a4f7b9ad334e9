use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, Local, NaiveDate};

use super::super::domain::{non_blank, status_key, ApplicationRecord};
use super::super::titles::normalize_job_title;
use super::views::{ApplicationSummary, CategoryCount, StatusCount, TimelinePoint};
use super::{rank, tally};

/// Number of title categories reported in a summary.
pub const TOP_CATEGORY_LIMIT: usize = 6;

const RECENT_WINDOW_DAYS: i64 = 30;

/// Summarize records against today's local date.
pub fn summarize(records: &[ApplicationRecord]) -> ApplicationSummary {
    summarize_as_of(records, Local::now().date_naive())
}

pub fn summarize_as_of(records: &[ApplicationRecord], today: NaiveDate) -> ApplicationSummary {
    let applied_dates: Vec<NaiveDate> = records
        .iter()
        .filter_map(ApplicationRecord::applied_on)
        .collect();

    ApplicationSummary {
        total_count: records.len(),
        unique_companies: unique_companies(records),
        applied_last_30_days: applied_within(&applied_dates, today, RECENT_WINDOW_DAYS),
        apps_per_week: apps_per_week(&applied_dates),
        avg_salary_min: average(records.iter().filter_map(ApplicationRecord::salary_min_amount)),
        avg_salary_max: average(records.iter().filter_map(ApplicationRecord::salary_max_amount)),
        top_title_categories: top_title_categories(records, TOP_CATEGORY_LIMIT),
        status_breakdown: status_breakdown(records),
        timeline: cumulative_timeline(&applied_dates),
    }
}

pub fn unique_companies(records: &[ApplicationRecord]) -> usize {
    records
        .iter()
        .filter_map(|record| non_blank(record.company.as_deref()))
        .collect::<HashSet<_>>()
        .len()
}

fn applied_within(dates: &[NaiveDate], today: NaiveDate, days: i64) -> usize {
    let window_start = today - Duration::days(days);
    dates
        .iter()
        .filter(|date| (window_start..=today).contains(*date))
        .count()
}

/// Applications per week over the observed span of applied dates, one decimal place.
/// A span shorter than a week counts as one week.
pub fn apps_per_week(dates: &[NaiveDate]) -> f64 {
    let (Some(first), Some(last)) = (dates.iter().min(), dates.iter().max()) else {
        return 0.0;
    };

    let span_days = (*last - *first).num_days() + 1;
    let weeks = (span_days as f64 / 7.0).max(1.0);
    let rate = dates.len() as f64 / weeks;
    round_to_tenth(rate)
}

/// Round from the exact binary value, so 0.15 (stored as 0.1499...) becomes 0.1.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

pub fn average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Most frequent title categories. Records without a title are skipped; a blank title
/// still counts, under "Other".
pub fn top_title_categories(records: &[ApplicationRecord], limit: usize) -> Vec<CategoryCount> {
    let labels = records
        .iter()
        .filter_map(|record| record.title.as_deref())
        .map(|title| normalize_job_title(Some(title)));

    rank(tally(labels))
        .into_iter()
        .take(limit)
        .map(|(label, count)| CategoryCount { label, count })
        .collect()
}

pub fn status_breakdown(records: &[ApplicationRecord]) -> Vec<StatusCount> {
    let statuses = records
        .iter()
        .map(|record| status_key(record.status.as_deref()));

    rank(tally(statuses))
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect()
}

pub fn cumulative_timeline(dates: &[NaiveDate]) -> Vec<TimelinePoint> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in dates {
        *per_day.entry(*date).or_default() += 1;
    }

    let mut cumulative = 0;
    per_day
        .into_iter()
        .map(|(date, applications)| {
            cumulative += applications;
            TimelinePoint {
                date,
                applications,
                cumulative,
            }
        })
        .collect()
}
