use crate::models::{EmbedResponse, ErrorResponse};
use crate::utils::{embed_url, normalize_video_id, watch_url};
use log::{info, warn};
use rocket::get;
use rocket::http::Status;
use rocket::serde::json::Json;

pub const EMBED_ERROR_MESSAGE: &str = "Oops! Something seems to have gone wrong. :(";

#[get("/?<id>")]
pub fn embed_video(id: Option<String>) -> Result<Json<EmbedResponse>, ErrorResponse> {
    let input = id.unwrap_or_default();
    match normalize_video_id(&input) {
        Some(video_id) => {
            info!("Embedding video {video_id}.");
            Ok(Json(EmbedResponse {
                watch_url: watch_url(&video_id),
                embed_url: embed_url(&video_id),
                video_id,
            }))
        }
        None => {
            warn!("Rejected video id {input:?}.");
            Err(ErrorResponse::new(
                Status::BadRequest,
                "Invalid video id",
                EMBED_ERROR_MESSAGE,
            ))
        }
    }
}
