use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::checkin::{CheckInError, DraftField};
use super::desk::FleetDesk;
use super::domain::{ScanCode, StatusFilter};
use super::notifications::{NotificationId, FEED_CAPACITY};
use super::registry::RegistryError;

/// The one desk shared by every request; the mutex makes it a single writer.
pub type SharedDesk = Arc<Mutex<FleetDesk>>;

/// Router builder exposing the dashboard, fleet listing and check-in intents.
pub fn fleet_router(desk: SharedDesk) -> Router {
    Router::new()
        .route("/api/v1/fleet/vehicles", get(vehicles_handler))
        .route("/api/v1/fleet/dashboard", get(dashboard_handler))
        .route("/api/v1/fleet/notifications", get(notifications_handler))
        .route(
            "/api/v1/fleet/notifications/read",
            post(read_all_notifications_handler),
        )
        .route(
            "/api/v1/fleet/notifications/:notification_id/read",
            post(read_notification_handler),
        )
        .route("/api/v1/fleet/check-in", get(check_in_handler))
        .route("/api/v1/fleet/check-in/scan", post(scan_handler))
        .route("/api/v1/fleet/check-in/draft", patch(draft_handler))
        .route("/api/v1/fleet/check-in/submit", post(submit_handler))
        .route("/api/v1/fleet/check-in/cancel", post(cancel_handler))
        .with_state(desk)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VehicleQuery {
    #[serde(default)]
    pub(crate) status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NotificationQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScanRequest {
    pub(crate) code: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DraftEditRequest {
    pub(crate) field: String,
    #[serde(default)]
    pub(crate) value: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, axum::Json(payload)).into_response()
}

fn lock_desk(desk: &SharedDesk) -> Result<MutexGuard<'_, FleetDesk>, Response> {
    desk.lock().map_err(|_| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "fleet desk state is unavailable",
        )
    })
}

fn check_in_error_response(error: CheckInError) -> Response {
    let status = match &error {
        CheckInError::UnknownScanCode(_) => StatusCode::NOT_FOUND,
        CheckInError::InvalidTransition { .. } => StatusCode::CONFLICT,
        CheckInError::Registry(RegistryError::NotFound(_)) => StatusCode::NOT_FOUND,
        CheckInError::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, error.to_string())
}

pub(crate) async fn vehicles_handler(
    State(desk): State<SharedDesk>,
    Query(query): Query<VehicleQuery>,
) -> Response {
    let filter = match query.status.as_deref().map(str::parse::<StatusFilter>) {
        None => StatusFilter::All,
        Some(Ok(filter)) => filter,
        Some(Err(error)) => return error_response(StatusCode::BAD_REQUEST, error.to_string()),
    };

    let desk = match lock_desk(&desk) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let vehicles = desk.vehicles(filter);
    let payload = json!({
        "filter": filter.label(),
        "count": vehicles.len(),
        "vehicles": vehicles,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn dashboard_handler(State(desk): State<SharedDesk>) -> Response {
    match lock_desk(&desk) {
        Ok(desk) => (StatusCode::OK, axum::Json(desk.dashboard(Utc::now()))).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn notifications_handler(
    State(desk): State<SharedDesk>,
    Query(query): Query<NotificationQuery>,
) -> Response {
    let desk = match lock_desk(&desk) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let limit = query.limit.unwrap_or(FEED_CAPACITY);
    let payload = json!({
        "unread_notifications": desk.feed().unread_count(),
        "notifications": desk.notifications(limit, Utc::now()),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn read_notification_handler(
    State(desk): State<SharedDesk>,
    Path(notification_id): Path<u64>,
) -> Response {
    let mut desk = match lock_desk(&desk) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let flipped = desk.acknowledge(NotificationId(notification_id));
    let payload = json!({
        "notification_id": notification_id,
        "marked_read": flipped,
        "unread_notifications": desk.feed().unread_count(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn read_all_notifications_handler(State(desk): State<SharedDesk>) -> Response {
    let mut desk = match lock_desk(&desk) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let flipped = desk.acknowledge_all();
    let payload = json!({
        "marked_read": flipped,
        "unread_notifications": desk.feed().unread_count(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn check_in_handler(State(desk): State<SharedDesk>) -> Response {
    match lock_desk(&desk) {
        Ok(desk) => (StatusCode::OK, axum::Json(desk.check_in_view())).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn scan_handler(
    State(desk): State<SharedDesk>,
    axum::Json(request): axum::Json<ScanRequest>,
) -> Response {
    let mut desk = match lock_desk(&desk) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    match desk.scan(&ScanCode(request.code)) {
        Ok(_) => (StatusCode::OK, axum::Json(desk.check_in_view())).into_response(),
        Err(error) => check_in_error_response(error),
    }
}

pub(crate) async fn draft_handler(
    State(desk): State<SharedDesk>,
    axum::Json(request): axum::Json<DraftEditRequest>,
) -> Response {
    let field = match request.field.parse::<DraftField>() {
        Ok(field) => field,
        Err(error) => return error_response(StatusCode::BAD_REQUEST, error.to_string()),
    };

    let mut desk = match lock_desk(&desk) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    match desk.edit_draft(field, &request.value) {
        Ok(edit) => {
            let payload = json!({
                "edit": edit,
                "check_in": desk.check_in_view(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => check_in_error_response(error),
    }
}

pub(crate) async fn submit_handler(State(desk): State<SharedDesk>) -> Response {
    let mut desk = match lock_desk(&desk) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    match desk.submit_check_in() {
        Ok(receipt) => {
            let payload = json!({
                "receipt": receipt,
                "statistics": desk.statistics(),
                "unread_notifications": desk.feed().unread_count(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => check_in_error_response(error),
    }
}

pub(crate) async fn cancel_handler(State(desk): State<SharedDesk>) -> Response {
    let mut desk = match lock_desk(&desk) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    match desk.cancel_check_in() {
        Ok(()) => (StatusCode::OK, axum::Json(desk.check_in_view())).into_response(),
        Err(error) => check_in_error_response(error),
    }
}
