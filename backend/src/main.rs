#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod services;
mod utils;

use crate::config::ConfigError;
use crate::models::ErrorResponse;
use crate::services::youtube_client::VideoPlatform;
use rocket::http::Status;
use rocket::{Build, Rocket};
use std::sync::Arc;

pub struct AppState {
    pub platform: Result<Arc<dyn VideoPlatform>, ConfigError>,
}

impl AppState {
    /// Fails with a 503 while no API key is configured.
    pub fn platform(&self) -> Result<&dyn VideoPlatform, ErrorResponse> {
        self.platform.as_deref().map_err(|e| {
            ErrorResponse::new(
                Status::ServiceUnavailable,
                "YouTube API unavailable",
                e.to_string(),
            )
        })
    }
}

pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount("/api/config", routes![api::dashboard::dashboard_defaults])
        .mount("/api/search", routes![api::search::search_videos])
        .mount("/api/analysis", routes![api::analysis::analyze])
        .mount("/api/video", routes![api::video::embed_video])
        .register(
            "/",
            catchers![api::dashboard::not_found, api::dashboard::internal_error],
        )
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    config::load_environment();
    config::init_logger();

    let cors = config::create_cors()?;
    let state = config::create_app_state();

    build_rocket(state)
        .attach(cors)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisResponse, EmbedResponse, RESULT_COLUMNS};
    use crate::services::analysis_service::tests::{two_channel_platform, FakePlatform};
    use rocket::local::asynchronous::Client;
    use std::sync::atomic::Ordering;

    async fn client_with(platform: FakePlatform) -> (Client, Arc<FakePlatform>) {
        let platform = Arc::new(platform);
        let state = AppState {
            platform: Ok(platform.clone() as Arc<dyn VideoPlatform>),
        };
        let client = Client::tracked(build_rocket(state)).await.unwrap();
        (client, platform)
    }

    async fn analysis(client: &Client, uri: &str) -> AnalysisResponse {
        let response = client.get(uri).dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        response.into_json().await.unwrap()
    }

    #[rocket::async_test]
    async fn analysis_filters_large_channels() {
        let (client, _) = client_with(two_channel_platform()).await;
        let body = analysis(&client, "/api/analysis?query=test&threshold=10000").await;

        assert_eq!(body.query, "test");
        assert_eq!(body.threshold, 10_000);
        assert_eq!(body.columns, RESULT_COLUMNS);
        assert_eq!(body.rows.len(), 1);
        assert_eq!(body.rows[0].channel_id, "A");
        assert_eq!(body.rows[0].title.as_deref(), Some("Small channel video"));
        assert!(body.warning.is_none());
    }

    #[rocket::async_test]
    async fn analysis_without_hits_returns_empty_table_with_columns() {
        let (client, _) = client_with(FakePlatform::default()).await;
        let body = analysis(&client, "/api/analysis?query=nothing&threshold=5000").await;

        assert!(body.rows.is_empty());
        assert_eq!(body.columns, RESULT_COLUMNS);
    }

    #[rocket::async_test]
    async fn enrichment_failure_becomes_warning() {
        let mut platform = two_channel_platform();
        platform.videos = None;
        let (client, _) = client_with(platform).await;
        let body = analysis(&client, "/api/analysis?query=test&threshold=10000").await;

        assert!(body.rows.is_empty());
        assert!(body.warning.is_some());
    }

    #[rocket::async_test]
    async fn search_failure_is_bad_gateway() {
        let platform = FakePlatform {
            fail_search: true,
            ..Default::default()
        };
        let (client, _) = client_with(platform).await;

        let response = client.get("/api/analysis?query=test").dispatch().await;
        assert_eq!(response.status(), Status::BadGateway);
        let error: ErrorResponse = response.into_json().await.unwrap();
        assert_eq!(error.error, "Search failed");
    }

    #[rocket::async_test]
    async fn blank_query_uses_default_and_cap_is_clamped() {
        let (client, _) = client_with(FakePlatform::default()).await;
        let body = analysis(&client, "/api/analysis?query=%20&max_results=900").await;

        assert_eq!(body.query, *config::DEFAULT_QUERY);
        assert_eq!(body.max_results, 50);
    }

    #[rocket::async_test]
    async fn unparseable_numbers_are_rejected() {
        let (client, platform) = client_with(two_channel_platform()).await;

        for uri in [
            "/api/analysis?query=test&threshold=abc",
            "/api/analysis?query=test&threshold=-5",
            "/api/analysis?query=test&max_results=lots",
            "/api/search?query=test&max_results=-1",
        ] {
            let response = client.get(uri).dispatch().await;
            assert_eq!(response.status(), Status::BadRequest, "{uri}");
            let error: ErrorResponse = response.into_json().await.unwrap();
            assert_eq!(error.error, "Invalid parameter", "{uri}");
        }
        assert_eq!(platform.calls.load(Ordering::SeqCst), 0);
    }

    #[rocket::async_test]
    async fn omitted_threshold_uses_default() {
        let (client, _) = client_with(FakePlatform::default()).await;
        let body = analysis(&client, "/api/analysis?query=test").await;

        assert_eq!(body.threshold, *config::DEFAULT_THRESHOLD);
        assert_eq!(body.max_results, 50);
    }

    #[rocket::async_test]
    async fn search_route_returns_hits() {
        let (client, _) = client_with(two_channel_platform()).await;
        let response = client.get("/api/search?query=test&max_results=1").dispatch().await;

        assert_eq!(response.status(), Status::Ok);
        let hits: Vec<crate::models::SearchHit> = response.into_json().await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].video_id, "va");
    }

    #[rocket::async_test]
    async fn missing_key_stops_before_any_call() {
        let state = AppState {
            platform: Err(ConfigError::MissingApiKey("secret.json".to_string())),
        };
        let client = Client::tracked(build_rocket(state)).await.unwrap();

        let response = client.get("/api/analysis?query=test").dispatch().await;
        assert_eq!(response.status(), Status::ServiceUnavailable);
        let error: ErrorResponse = response.into_json().await.unwrap();
        assert!(error.message.contains("YOUTUBE_API_KEY"));

        // embedding does not need the API
        let response = client.get("/api/video?id=dQw4w9WgXcQ").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
    }

    #[rocket::async_test]
    async fn embed_builds_playback_urls() {
        let (client, _) = client_with(FakePlatform::default()).await;
        let response = client
            .get("/api/video?id=https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ")
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok);
        let embed: EmbedResponse = response.into_json().await.unwrap();
        assert_eq!(embed.video_id, "dQw4w9WgXcQ");
        assert_eq!(embed.watch_url, "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(embed.embed_url, "https://www.youtube.com/embed/dQw4w9WgXcQ");
    }

    #[rocket::async_test]
    async fn invalid_embed_is_generic_error() {
        let (client, _) = client_with(FakePlatform::default()).await;
        let response = client.get("/api/video?id=nope").dispatch().await;

        assert_eq!(response.status(), Status::BadRequest);
        let error: ErrorResponse = response.into_json().await.unwrap();
        assert_eq!(error.message, api::video::EMBED_ERROR_MESSAGE);
    }

    #[rocket::async_test]
    async fn defaults_describe_the_slider() {
        let (client, _) = client_with(FakePlatform::default()).await;
        let response = client.get("/api/config").dispatch().await;

        assert_eq!(response.status(), Status::Ok);
        let defaults: crate::models::DashboardDefaults = response.into_json().await.unwrap();
        assert_eq!(defaults.threshold_min, 100);
        assert_eq!(defaults.threshold_max, 100_000);
        assert_eq!(defaults.max_results, 50);
    }

    #[rocket::async_test]
    async fn unknown_routes_use_error_shape() {
        let (client, platform) = client_with(FakePlatform::default()).await;
        let response = client.get("/api/nope").dispatch().await;

        assert_eq!(response.status(), Status::NotFound);
        let error: ErrorResponse = response.into_json().await.unwrap();
        assert_eq!(error.error, "Not found");
        assert_eq!(platform.calls.load(Ordering::SeqCst), 0);
    }
}
