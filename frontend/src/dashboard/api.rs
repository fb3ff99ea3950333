use crate::env_variable_utils::BACKEND_URL;
use crate::models::{AnalysisResponse, DashboardDefaults, EmbedResponse, ErrorResponse};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

pub fn analysis_url(backend_url: &str, query: &str, threshold: u64) -> String {
    format!(
        "{}/api/analysis?query={}&threshold={}",
        backend_url,
        urlencoding::encode(query),
        threshold
    )
}

pub fn embed_url(backend_url: &str, video_id: &str) -> String {
    format!(
        "{}/api/video?id={}",
        backend_url,
        urlencoding::encode(video_id.trim())
    )
}

pub async fn fetch_defaults() -> Result<DashboardDefaults, String> {
    let url = format!("{}/api/config", &*BACKEND_URL);
    get_json(&url).await
}

pub async fn fetch_analysis(query: &str, threshold: u64) -> Result<AnalysisResponse, String> {
    get_json(&analysis_url(&BACKEND_URL, query, threshold)).await
}

pub async fn fetch_embed(video_id: &str) -> Result<EmbedResponse, String> {
    get_json(&embed_url(&BACKEND_URL, video_id)).await
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    match Request::get(url).send().await {
        Ok(response) => {
            if response.ok() {
                response
                    .json::<T>()
                    .await
                    .map_err(|e| report(format!("Failed to parse response: {e}")))
            } else {
                Err(report(error_message(response).await))
            }
        }
        Err(e) => Err(report(format!("Failed to connect to backend: {e}"))),
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        // Try to parse as structured error response first
        Ok(error_text) => match serde_json::from_str::<ErrorResponse>(&error_text) {
            Ok(error_response) => error_response.message,
            Err(_) => format!("Request failed ({status}): {error_text}"),
        },
        Err(_) => format!("Request failed with status: {status}"),
    }
}

fn report(error: String) -> String {
    web_sys::console::error_1(&error.clone().into());
    error
}
