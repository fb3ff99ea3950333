use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::{response, Response};
use std::io::Cursor;

/// Column order of the results table.
pub const RESULT_COLUMNS: [&str; 5] = [
    "video_id",
    "title",
    "view_count",
    "subscriber_count",
    "channel_id",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub video_id: String,
    pub channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub channel_id: String,
    pub subscriber_count: Option<u64>, // None when hidden or not reported
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub video_id: String,
    pub title: Option<String>,
    pub view_count: Option<u64>,
}

/// Field order matches `RESULT_COLUMNS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub video_id: String,
    pub title: Option<String>,
    pub view_count: Option<u64>,
    pub subscriber_count: u64,
    pub channel_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub query: String,
    pub threshold: u64,
    pub max_results: u32,
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
    pub warning: Option<String>,
}

impl AnalysisResponse {
    pub fn new(query: String, threshold: u64, max_results: u32, rows: Vec<ResultRow>) -> Self {
        Self {
            query,
            threshold,
            max_results,
            columns: RESULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: String) -> Self {
        self.warning = Some(warning);
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub video_id: String,
    pub watch_url: String,
    pub embed_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardDefaults {
    pub default_query: String,
    pub default_threshold: u64,
    pub threshold_min: u64,
    pub threshold_max: u64,
    pub threshold_step: u64,
    pub max_results: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip, default = "ErrorResponse::default_status")]
    pub status: Status,
}

impl ErrorResponse {
    pub fn new(status: Status, error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status,
        }
    }

    fn default_status() -> Status {
        Status::BadRequest
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::to_string(&self).map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
