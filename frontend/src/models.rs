use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub video_id: String,
    pub title: Option<String>,
    pub view_count: Option<u64>,
    pub subscriber_count: u64,
    pub channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub query: String,
    pub threshold: u64,
    pub max_results: u32,
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub video_id: String,
    pub watch_url: String,
    pub embed_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDefaults {
    pub default_query: String,
    pub default_threshold: u64,
    pub threshold_min: u64,
    pub threshold_max: u64,
    pub threshold_step: u64,
    pub max_results: u32,
}

// Used when the backend cannot be reached for its defaults.
impl Default for DashboardDefaults {
    fn default() -> Self {
        Self {
            default_query: "Excel".to_string(),
            default_threshold: 10_000,
            threshold_min: 100,
            threshold_max: 100_000,
            threshold_step: 100,
            max_results: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
