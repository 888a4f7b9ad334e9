use crate::infra::in_memory_tracker;
use chrono::{Local, NaiveDate};
use clap::Args;
use job_tracker::config::TrackerConfig;
use job_tracker::error::AppError;
use job_tracker::tracker::{
    format_money, normalize_job_title, ApplicationFilter, ApplicationRecord, ApplicationSummary,
    FlowReport,
};
use std::fmt::Write;
use std::path::PathBuf;

const NO_FLOW_DATA: &str = "# No data";

#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Keep applications with this status (repeatable)
    #[arg(long)]
    pub(crate) status: Vec<String>,
    /// Keep applications with this location type (repeatable)
    #[arg(long)]
    pub(crate) location: Vec<String>,
    /// Case-insensitive text to find in company, title, or notes
    #[arg(long)]
    pub(crate) search: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> ApplicationFilter {
        ApplicationFilter {
            statuses: self.status.clone(),
            location_types: self.location.clone(),
            search: self.search.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct CsvArgs {
    /// Application export (CSV with record field names as headers)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
}

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    #[command(flatten)]
    pub(crate) source: CsvArgs,
    /// Reporting date for the 30-day window (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct NormalizeArgs {
    /// Job titles to normalize
    #[arg(required = true)]
    pub(crate) titles: Vec<String>,
}

pub(crate) fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let SummaryArgs { source, today } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let service = in_memory_tracker(&TrackerConfig::default(), Some(source.csv.as_path()))?;
    let summary = service.summary(&source.filters.to_filter(), today)?;
    print!("{}", render_summary(&summary, today));
    Ok(())
}

pub(crate) fn run_flow(args: CsvArgs) -> Result<(), AppError> {
    let service = in_memory_tracker(&TrackerConfig::default(), Some(args.csv.as_path()))?;
    let report = service.flow(&args.filters.to_filter())?;
    println!("{}", render_flow(&report));
    Ok(())
}

pub(crate) fn run_list(args: CsvArgs) -> Result<(), AppError> {
    let service = in_memory_tracker(&TrackerConfig::default(), Some(args.csv.as_path()))?;
    let records = service.list(&args.filters.to_filter())?;
    print!("{}", render_list(&records));
    Ok(())
}

pub(crate) fn run_normalize(args: NormalizeArgs) {
    for title in &args.titles {
        println!("{title} => {}", normalize_job_title(Some(title)));
    }
}

pub(crate) fn render_summary(summary: &ApplicationSummary, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Application summary as of {today}");
    if summary.is_empty() {
        let _ = writeln!(out, "No applications match the current filters.");
        return out;
    }

    let _ = writeln!(out, "- Total applications: {}", summary.total_count);
    let _ = writeln!(out, "- Unique companies: {}", summary.unique_companies);
    let _ = writeln!(
        out,
        "- Applied in last 30 days: {}",
        summary.applied_last_30_days
    );
    let _ = writeln!(out, "- Apps per week: {:.1}", summary.apps_per_week);
    let _ = writeln!(
        out,
        "- Avg salary: {} min | {} max",
        money_or_dash(summary.avg_salary_min),
        money_or_dash(summary.avg_salary_max)
    );

    if !summary.top_title_categories.is_empty() {
        let _ = writeln!(out, "Top title categories:");
        for entry in &summary.top_title_categories {
            let _ = writeln!(out, "  - {}: {}", entry.label, entry.count);
        }
    }

    let _ = writeln!(out, "Status breakdown:");
    for entry in &summary.status_breakdown {
        let _ = writeln!(out, "  - {}: {}", entry.status, entry.count);
    }

    out
}

pub(crate) fn render_flow(report: &FlowReport) -> &str {
    if report.text.is_empty() {
        NO_FLOW_DATA
    } else {
        &report.text
    }
}

pub(crate) fn render_list(records: &[ApplicationRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = write!(out, "{}", record.option_label());
        if let Some(range) = salary_range(record) {
            let _ = write!(out, " | {range}");
        }
        out.push('\n');
    }
    out
}

fn salary_range(record: &ApplicationRecord) -> Option<String> {
    match (record.salary_min_amount(), record.salary_max_amount()) {
        (Some(min), Some(max)) => Some(format!(
            "{} - {}",
            format_money(Some(min)),
            format_money(Some(max))
        )),
        (Some(amount), None) | (None, Some(amount)) => Some(format_money(Some(amount))),
        (None, None) => None,
    }
}

fn money_or_dash(value: Option<f64>) -> String {
    match value {
        Some(_) => format_money(value),
        None => "-".to_string(),
    }
}
