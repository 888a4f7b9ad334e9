use chrono::NaiveDate;
use job_tracker::tracker::{
    read_applications, read_applications_from_path, summarize_as_of, summarize_flow, to_text,
    ApplicationFilter, FlowReport,
};

fn end_of_march() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 31).expect("valid date")
}

#[test]
fn summary_over_sample_export() {
    let records = read_applications(&include_bytes!("../sample_applications.csv")[..])
        .expect("sample export imports");
    assert_eq!(records.len(), 10);

    let summary = summarize_as_of(&records, end_of_march());
    assert_eq!(summary.total_count, 10);
    assert_eq!(summary.unique_companies, 9);
    assert_eq!(summary.applied_last_30_days, 9);
    assert_eq!(summary.apps_per_week, 4.2);
    assert_eq!(summary.avg_salary_min, Some(158000.0));
    assert_eq!(summary.avg_salary_max, Some(180000.0));

    let categories: Vec<(&str, usize)> = summary
        .top_title_categories
        .iter()
        .map(|entry| (entry.label.as_str(), entry.count))
        .collect();
    assert_eq!(
        categories,
        vec![
            ("Software Engineer/Developer", 2),
            ("Data / Analytics", 2),
            ("Back End Developer", 1),
            ("Front End Developer", 1),
            ("Full Stack Developer", 1),
            ("Web Developer", 1),
        ]
    );

    assert_eq!(summary.status_breakdown[0].status, "Applied");
    assert_eq!(summary.status_breakdown[0].count, 4);
    assert!(summary
        .status_breakdown
        .iter()
        .any(|entry| entry.status == "Unknown" && entry.count == 1));

    let last = summary.timeline.last().expect("timeline present");
    assert_eq!(last.date, NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
    assert_eq!(last.cumulative, 9);
}

#[test]
fn recent_window_excludes_older_applications() {
    let records = read_applications_from_path(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/sample_applications.csv"
    ))
    .expect("sample export imports");

    let later = NaiveDate::from_ymd_opt(2025, 4, 10).expect("valid date");
    let summary = summarize_as_of(&records, later);
    // Window starts 2025-03-11.
    assert_eq!(summary.applied_last_30_days, 4);
    assert_eq!(summary.total_count, 10);
}

#[test]
fn filtered_flow_over_sample_export() {
    let records = read_applications(&include_bytes!("../sample_applications.csv")[..])
        .expect("sample export imports");

    let text = to_text(&summarize_flow(&records));
    assert_eq!(
        text,
        "Applied [4] Applied\n\
Applied [1] Interview 1\n\
Applied [1] Rejected\n\
Applied [1] Ghosted\n\
Applied [1] Not Interested\n\
Applied [1] Unknown\n\
Applied [1] Phone Screen"
    );

    let remote_applied = ApplicationFilter {
        statuses: vec!["Applied".to_string()],
        location_types: vec!["Remote".to_string()],
        search: None,
    }
    .apply(&records);
    assert_eq!(remote_applied.len(), 3);

    let report = FlowReport::from_records(&remote_applied);
    assert_eq!(report.text, "Applied [3] Applied");
    let diagram = report.diagram.expect("diagram present");
    assert_eq!(diagram.labels, vec!["Applied", "Applied/No update yet"]);
}

#[test]
fn empty_export_yields_empty_views() {
    let records = read_applications("company,title\n".as_bytes()).expect("header-only import");
    let summary = summarize_as_of(&records, end_of_march());
    assert!(summary.is_empty());
    assert_eq!(summary.apps_per_week, 0.0);
    assert!(summary.avg_salary_min.is_none());

    let report = FlowReport::from_records(&records);
    assert!(report.edges.is_empty());
    assert!(report.diagram.is_none());
    assert_eq!(report.text, "");
}
