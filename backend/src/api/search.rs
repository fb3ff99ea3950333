use crate::api::optional_param;
use crate::config::{DEFAULT_QUERY, MAX_RESULTS_PER_CALL};
use crate::models::{ErrorResponse, SearchHit};
use crate::services::analysis_service::video_search;
use crate::services::youtube_client::YouTubeError;
use crate::AppState;
use log::error;
use rocket::http::Status;
use rocket::form::Errors;
use rocket::serde::json::Json;
use rocket::{get, State};

/// Blank queries fall back to the configured placeholder term.
pub fn resolve_query(query: Option<String>) -> String {
    query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .unwrap_or_else(|| DEFAULT_QUERY.clone())
}

pub fn search_failed(query: &str, e: YouTubeError) -> ErrorResponse {
    error!("Search for \"{query}\" failed: {e}");
    let message = if e.is_quota_exceeded() {
        "The daily YouTube API quota is exhausted. Try again tomorrow.".to_string()
    } else {
        e.to_string()
    };
    ErrorResponse::new(Status::BadGateway, "Search failed", message)
}

#[get("/?<query>&<max_results>")]
pub async fn search_videos(
    query: Option<String>,
    max_results: Result<u32, Errors<'_>>,
    state: &State<AppState>,
) -> Result<Json<Vec<SearchHit>>, ErrorResponse> {
    let max_results = optional_param("max_results", max_results)?.unwrap_or(MAX_RESULTS_PER_CALL);
    let platform = state.platform()?;
    let query = resolve_query(query);

    video_search(platform, &query, max_results)
        .await
        .map(Json)
        .map_err(|e| search_failed(&query, e))
}
