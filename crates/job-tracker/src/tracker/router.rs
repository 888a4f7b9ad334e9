use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::{parse_date, ApplicationId, ApplicationRecord};
use super::filter::{split_list, ApplicationFilter};
use super::service::{TrackerService, TrackerServiceError};
use super::store::RecordStore;
use super::titles::{categorize, TitleCategory};
use crate::error::tracker_status;

/// Placeholder returned by the text export when there is nothing to draw.
pub const EMPTY_FLOW_TEXT: &str = "# No data";

/// Router builder exposing the application CRUD and analytics endpoints.
pub fn tracker_router<S>(service: Arc<TrackerService<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .route(
            "/api/v1/applications/:application_id/screenshots",
            get(list_screenshots_handler::<S>).post(upload_screenshot_handler::<S>),
        )
        .route("/api/v1/analytics/summary", get(summary_handler::<S>))
        .route("/api/v1/analytics/flow", get(flow_handler::<S>))
        .route("/api/v1/analytics/flow/text", get(flow_text_handler::<S>))
        .route("/api/v1/titles/normalize", post(normalize_handler))
        .with_state(service)
}

/// Query string shared by list and analytics endpoints. `status` and `location_type` take
/// comma-separated values.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FilterQuery {
    pub(crate) status: Option<String>,
    pub(crate) location_type: Option<String>,
    pub(crate) q: Option<String>,
    pub(crate) today: Option<String>,
}

impl FilterQuery {
    fn filter(&self) -> ApplicationFilter {
        ApplicationFilter {
            statuses: split_list(self.status.as_deref()),
            location_types: split_list(self.location_type.as_deref()),
            search: self.q.clone(),
        }
    }

    fn today(&self) -> Result<NaiveDate, String> {
        match self.today.as_deref() {
            Some(raw) => parse_date(raw).ok_or_else(|| format!("invalid date '{raw}'")),
            None => Ok(Local::now().date_naive()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadQuery {
    pub(crate) file_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NormalizeRequest {
    #[serde(default)]
    pub(crate) titles: Vec<Option<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NormalizedTitle {
    pub(crate) title: Option<String>,
    pub(crate) category: TitleCategory,
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Query(query): Query<FilterQuery>,
) -> Response
where
    S: RecordStore + 'static,
{
    match service.list(&query.filter()) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Json(mut record): Json<ApplicationRecord>,
) -> Response
where
    S: RecordStore + 'static,
{
    record.id = None;
    match service.save(record) {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Path(application_id): Path<u64>,
) -> Response
where
    S: RecordStore + 'static,
{
    match service.get(ApplicationId(application_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Path(application_id): Path<u64>,
    Json(mut record): Json<ApplicationRecord>,
) -> Response
where
    S: RecordStore + 'static,
{
    record.id = Some(ApplicationId(application_id));
    match service.save(record) {
        Ok(id) => (StatusCode::OK, Json(json!({ "id": id }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Path(application_id): Path<u64>,
) -> Response
where
    S: RecordStore + 'static,
{
    match service.delete(ApplicationId(application_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_screenshots_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Path(application_id): Path<u64>,
) -> Response
where
    S: RecordStore + 'static,
{
    match service.screenshots(ApplicationId(application_id)) {
        Ok(shots) => (StatusCode::OK, Json(shots)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn upload_screenshot_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Path(application_id): Path<u64>,
    Query(upload): Query<UploadQuery>,
    body: Bytes,
) -> Response
where
    S: RecordStore + 'static,
{
    match service.attach_screenshot(ApplicationId(application_id), &upload.file_name, &body) {
        Ok(shot) => (StatusCode::CREATED, Json(shot)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn summary_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Query(query): Query<FilterQuery>,
) -> Response
where
    S: RecordStore + 'static,
{
    let today = match query.today() {
        Ok(today) => today,
        Err(message) => return bad_request(message),
    };

    match service.summary(&query.filter(), today) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn flow_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Query(query): Query<FilterQuery>,
) -> Response
where
    S: RecordStore + 'static,
{
    match service.flow(&query.filter()) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn flow_text_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Query(query): Query<FilterQuery>,
) -> Response
where
    S: RecordStore + 'static,
{
    match service.flow(&query.filter()) {
        Ok(report) => {
            let text = if report.text.is_empty() {
                EMPTY_FLOW_TEXT.to_string()
            } else {
                report.text
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                text,
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn normalize_handler(Json(request): Json<NormalizeRequest>) -> Response {
    let normalized: Vec<NormalizedTitle> = request
        .titles
        .into_iter()
        .map(|title| NormalizedTitle {
            category: categorize(title.as_deref()),
            title,
        })
        .collect();
    (StatusCode::OK, Json(normalized)).into_response()
}

fn error_response(err: TrackerServiceError) -> Response {
    let status = tracker_status(&err);
    if status.is_server_error() {
        warn!(error = %err, "tracker request failed");
    }
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}

fn bad_request(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}
