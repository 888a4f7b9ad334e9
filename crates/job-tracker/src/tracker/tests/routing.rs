use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::tracker::router::{list_handler, tracker_router, FilterQuery};
use crate::tracker::service::TrackerService;

fn seeded_router(dir: &std::path::Path) -> Router {
    tracker_router(Arc::new(seeded_service(dir)))
}

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn list_handler_returns_service_unavailable_when_store_is_down() {
    let dir = tempfile::tempdir().unwrap();
    let service = Arc::new(TrackerService::new(
        Arc::new(UnavailableStore),
        &tracker_config(dir.path()),
    ));

    let response = list_handler::<UnavailableStore>(
        State(service),
        axum::extract::Query(FilterQuery::default()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("database offline"));
}

#[tokio::test]
async fn list_route_filters_by_status_and_search() {
    let dir = tempfile::tempdir().unwrap();
    let router = seeded_router(dir.path());

    let response = router
        .oneshot(get("/api/v1/applications?status=Applied,Rejected&q=acme"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Frontend Engineer (React)", "Full-Stack Developer II"]
    );
}

#[tokio::test]
async fn create_route_assigns_next_id() {
    let dir = tempfile::tempdir().unwrap();
    let router = seeded_router(dir.path());

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/applications",
            json!({
                "company": "Umbrella",
                "title": "Staff Software Engineer",
                "status": "Wishlist",
                "salary_min": 120000,
                "salary_max": "competitive"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(read_json_body(response).await, json!({ "id": 6 }));

    let fetched = router
        .oneshot(get("/api/v1/applications/6"))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let body = read_json_body(fetched).await;
    assert_eq!(body["company"], "Umbrella");
    assert_eq!(body["salary_min"], 120000.0);
    assert_eq!(body["salary_max"], "competitive");
}

#[tokio::test]
async fn create_route_rejects_missing_company() {
    let dir = tempfile::tempdir().unwrap();
    let router = seeded_router(dir.path());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/applications",
            json!({ "company": "  ", "title": "Engineer" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "company is required");
}

#[tokio::test]
async fn update_and_delete_routes_report_missing_records() {
    let dir = tempfile::tempdir().unwrap();
    let router = seeded_router(dir.path());

    let update = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/applications/42",
            json!({ "company": "Acme", "title": "Engineer" }),
        ))
        .await
        .unwrap();
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let delete = router
        .clone()
        .oneshot(
            Request::delete("/api/v1/applications/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    let existing = router
        .oneshot(
            Request::delete("/api/v1/applications/3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(existing.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn update_route_replaces_status() {
    let dir = tempfile::tempdir().unwrap();
    let router = seeded_router(dir.path());

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/applications/1",
            json!({
                "company": "Netflix",
                "title": "Senior Backend Engineer",
                "status": "Offer"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = router
        .oneshot(get("/api/v1/applications/1"))
        .await
        .unwrap();
    assert_eq!(read_json_body(fetched).await["status"], "Offer");
}

#[tokio::test]
async fn summary_route_uses_requested_day() {
    let dir = tempfile::tempdir().unwrap();
    let router = seeded_router(dir.path());

    let response = router
        .oneshot(get("/api/v1/analytics/summary?today=2025-02-09"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total_count"], 5);
    assert_eq!(body["unique_companies"], 4);
    assert_eq!(body["applied_last_30_days"], 3);
    assert_eq!(body["apps_per_week"], 2.3);
    assert_eq!(body["avg_salary_min"], 130000.0);
}

#[tokio::test]
async fn summary_route_rejects_malformed_day() {
    let dir = tempfile::tempdir().unwrap();
    let router = seeded_router(dir.path());

    let response = router
        .oneshot(get("/api/v1/analytics/summary?today=next-tuesday"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn flow_text_route_exports_lines() {
    let dir = tempfile::tempdir().unwrap();
    let router = seeded_router(dir.path());

    let response = router
        .clone()
        .oneshot(get("/api/v1/analytics/flow/text?status=Rejected,Interview%201"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    assert_eq!(&body[..], b"Applied [1] Interview 1\nApplied [1] Rejected");

    let empty = router
        .oneshot(get("/api/v1/analytics/flow/text?status=Offer"))
        .await
        .unwrap();
    let body = axum::body::to_bytes(empty.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"# No data");
}

#[tokio::test]
async fn flow_route_returns_diagram() {
    let dir = tempfile::tempdir().unwrap();
    let router = seeded_router(dir.path());

    let response = router.oneshot(get("/api/v1/analytics/flow")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body["diagram"]["labels"],
        json!(["Applied", "Applied/No update yet", "Interview 1", "Rejected"])
    );
    assert_eq!(body["edges"][0]["weight"], 3);
}

#[tokio::test]
async fn screenshot_upload_checks_media_type() {
    let dir = tempfile::tempdir().unwrap();
    let router = seeded_router(dir.path());

    let rejected = router
        .clone()
        .oneshot(
            Request::post("/api/v1/applications/1/screenshots?file_name=notes.txt")
                .body(Body::from("plain text"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let accepted = router
        .clone()
        .oneshot(
            Request::post("/api/v1/applications/1/screenshots?file_name=posting.jpg")
                .body(Body::from(vec![0xff, 0xd8, 0xff]))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(accepted.status(), StatusCode::CREATED);
    let shot = read_json_body(accepted).await;
    assert_eq!(shot["application_id"], 1);

    let listed = router
        .oneshot(get("/api/v1/applications/1/screenshots"))
        .await
        .unwrap();
    let body = read_json_body(listed).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn normalize_route_categorizes_titles() {
    let dir = tempfile::tempdir().unwrap();
    let router = seeded_router(dir.path());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/titles/normalize",
            json!({ "titles": ["Sr. Data Engineer", "Chief of Staff", null] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json_body(response).await,
        json!([
            { "title": "Sr. Data Engineer", "category": "Data / Analytics" },
            { "title": "Chief of Staff", "category": "Chief Of" },
            { "title": null, "category": "Other" }
        ])
    );
}
