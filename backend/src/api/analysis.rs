use crate::api::optional_param;
use crate::api::search::{resolve_query, search_failed};
use crate::config::{DEFAULT_THRESHOLD, MAX_RESULTS_PER_CALL};
use crate::models::{AnalysisResponse, ErrorResponse};
use crate::services::analysis_service::{clamp_max_results, get_results, video_search};
use crate::AppState;
use log::{info, warn};
use rocket::form::Errors;
use rocket::serde::json::Json;
use rocket::{get, State};

/// One dashboard refresh: search, then enrich and filter by subscribers.
#[get("/?<query>&<threshold>&<max_results>")]
pub async fn analyze(
    query: Option<String>,
    threshold: Result<u64, Errors<'_>>,
    max_results: Result<u32, Errors<'_>>,
    state: &State<AppState>,
) -> Result<Json<AnalysisResponse>, ErrorResponse> {
    let threshold = optional_param("threshold", threshold)?.unwrap_or(*DEFAULT_THRESHOLD);
    let max_results = optional_param("max_results", max_results)?.unwrap_or(MAX_RESULTS_PER_CALL);
    let max_results = clamp_max_results(max_results);
    let platform = state.platform()?;
    let query = resolve_query(query);

    let hits = video_search(platform, &query, max_results)
        .await
        .map_err(|e| search_failed(&query, e))?;

    match get_results(platform, &hits, threshold).await {
        Ok(rows) => {
            info!(
                "Analysis \"{query}\" below {threshold} subscribers: {} rows.",
                rows.len()
            );
            Ok(Json(AnalysisResponse::new(query, threshold, max_results, rows)))
        }
        Err(e) => {
            warn!("Enrichment for \"{query}\" failed, returning an empty table: {e}");
            let response = AnalysisResponse::new(query, threshold, max_results, Vec::new());
            Ok(Json(response.with_warning(format!(
                "Channel or video details could not be loaded: {e}"
            ))))
        }
    }
}
