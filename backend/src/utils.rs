use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref VIDEO_URL: Regex = Regex::new(
        r"(?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/)([a-zA-Z0-9_-]{11})",
    )
    .unwrap();
    static ref VIDEO_ID: Regex = Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap();
}

pub fn extract_youtube_video_id(url: &str) -> Option<String> {
    VIDEO_URL
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Accepts either a bare video id or any watch/share/embed URL.
pub fn normalize_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if VIDEO_ID.is_match(input) {
        return Some(input.to_string());
    }
    extract_youtube_video_id(input)
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://youtu.be/{video_id}")
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}
