pub mod summary;
pub mod views;

pub use summary::{
    apps_per_week, average, cumulative_timeline, status_breakdown, summarize, summarize_as_of,
    top_title_categories, unique_companies, TOP_CATEGORY_LIMIT,
};
pub use views::{ApplicationSummary, CategoryCount, StatusCount, TimelinePoint};

/// Count keys in first-seen order.
pub(crate) fn tally<I>(keys: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(seen, _)| *seen == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

/// Descending by count; `sort_by` is stable, so ties keep first-seen order.
pub(crate) fn rank(mut counts: Vec<(String, usize)>) -> Vec<(String, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
