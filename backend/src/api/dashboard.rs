use crate::config::{
    DEFAULT_QUERY, DEFAULT_THRESHOLD, MAX_RESULTS_PER_CALL, THRESHOLD_MAX, THRESHOLD_MIN,
    THRESHOLD_STEP,
};
use crate::models::{DashboardDefaults, ErrorResponse};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{catch, get, Request};

#[get("/")]
pub fn dashboard_defaults() -> Json<DashboardDefaults> {
    Json(DashboardDefaults {
        default_query: DEFAULT_QUERY.clone(),
        default_threshold: (*DEFAULT_THRESHOLD).clamp(THRESHOLD_MIN, THRESHOLD_MAX),
        threshold_min: THRESHOLD_MIN,
        threshold_max: THRESHOLD_MAX,
        threshold_step: THRESHOLD_STEP,
        max_results: MAX_RESULTS_PER_CALL,
    })
}

#[catch(404)]
pub fn not_found(request: &Request) -> ErrorResponse {
    ErrorResponse::new(
        Status::NotFound,
        "Not found",
        format!("No route for {}", request.uri()),
    )
}

#[catch(500)]
pub fn internal_error() -> ErrorResponse {
    ErrorResponse::new(
        Status::InternalServerError,
        "Internal error",
        "The server failed to handle this request.",
    )
}
