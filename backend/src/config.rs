use crate::services::youtube_client::{VideoPlatform, YouTubeClient};
use crate::AppState;
use anyhow::Result;
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{error, info, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

pub const YOUTUBE_API_DEFAULT_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Platform maximum for `maxResults` and for the number of ids in one lookup.
pub const MAX_RESULTS_PER_CALL: u32 = 50;

pub const THRESHOLD_MIN: u64 = 100;
pub const THRESHOLD_MAX: u64 = 100_000;
pub const THRESHOLD_STEP: u64 = 100;

lazy_static! {
    pub static ref YOUTUBE_SECRET_FILE: String =
        env::var("YOUTUBE_SECRET_FILE").unwrap_or_else(|_| "secret.json".to_string());
    pub static ref YOUTUBE_API_BASE_URL: String =
        env::var("YOUTUBE_API_BASE_URL").unwrap_or_else(|_| YOUTUBE_API_DEFAULT_URL.to_string());
    pub static ref FRONTEND_ORIGIN: String =
        env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
    pub static ref DEFAULT_QUERY: String =
        env::var("DEFAULT_QUERY").unwrap_or_else(|_| "Excel".to_string());
    pub static ref DEFAULT_THRESHOLD: u64 = env::var("DEFAULT_THRESHOLD")
        .unwrap_or_else(|_| "10000".to_string())
        .parse::<u64>()
        .unwrap_or(10_000);
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YouTube API key is missing: set YOUTUBE_API_KEY or provide {0}")]
    MissingApiKey(String),

    #[error("Could not read secret file {path}: {source}")]
    SecretFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Secret file {path} is not valid JSON with a \"KEY\" entry: {source}")]
    SecretFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YouTube API base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Deserialize)]
struct SecretFile {
    #[serde(rename = "KEY")]
    key: String,
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting Rocket backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

/// Environment first, then the JSON secret file.
pub fn load_api_key() -> Result<String, ConfigError> {
    resolve_api_key(
        env::var("YOUTUBE_API_KEY").ok(),
        Path::new(YOUTUBE_SECRET_FILE.as_str()),
    )
}

pub fn resolve_api_key(env_key: Option<String>, secret_path: &Path) -> Result<String, ConfigError> {
    if let Some(key) = env_key {
        let key = key.trim();
        if !key.is_empty() {
            info!("Using YouTube API key from environment.");
            return Ok(key.to_string());
        }
    }

    if !secret_path.exists() {
        return Err(ConfigError::MissingApiKey(secret_path.display().to_string()));
    }
    let key = read_api_key_file(secret_path)?;
    info!("Using YouTube API key from {}.", secret_path.display());
    Ok(key)
}

pub fn read_api_key_file(path: &Path) -> Result<String, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::SecretFile {
        path: path.to_path_buf(),
        source,
    })?;
    let secret: SecretFile =
        serde_json::from_str(&contents).map_err(|source| ConfigError::SecretFormat {
            path: path.to_path_buf(),
            source,
        })?;

    let key = secret.key.trim();
    if key.is_empty() {
        return Err(ConfigError::MissingApiKey(path.display().to_string()));
    }
    Ok(key.to_string())
}

pub fn create_youtube_client(api_key: String) -> Result<YouTubeClient, ConfigError> {
    let base_url = &*YOUTUBE_API_BASE_URL;
    Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
        url: base_url.clone(),
        source,
    })?;
    info!("Using YouTube Data API at: {base_url}");

    Ok(YouTubeClient::with_base_url(api_key, base_url))
}

/// A missing key does not stop the server; routes report it instead.
pub fn create_app_state() -> AppState {
    let platform = load_api_key()
        .and_then(create_youtube_client)
        .map(|client| Arc::new(client) as Arc<dyn VideoPlatform>);

    if let Err(e) = &platform {
        error!("YouTube API is unavailable: {e}");
    }

    AppState { platform }
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[FRONTEND_ORIGIN.as_str()]))
        .allowed_methods(
            vec![Method::Get, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .allow_credentials(false)
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn secret_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_key_from_secret_file() {
        let file = secret_file(r#"{"KEY": "  abc123  "}"#);
        assert_eq!(read_api_key_file(file.path()).unwrap(), "abc123");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let file = secret_file(r#"{"KEY": ""}"#);
        assert!(matches!(
            read_api_key_file(file.path()),
            Err(ConfigError::MissingApiKey(_))
        ));
    }

    #[test]
    fn secret_file_without_key_is_a_format_error() {
        let file = secret_file(r#"{"key": "lowercase"}"#);
        assert!(matches!(
            read_api_key_file(file.path()),
            Err(ConfigError::SecretFormat { .. })
        ));
    }

    #[test]
    fn unreadable_secret_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            read_api_key_file(&missing),
            Err(ConfigError::SecretFile { .. })
        ));
    }

    #[test]
    fn environment_key_wins_over_secret_file() {
        let file = secret_file(r#"{"KEY": "from-file"}"#);
        let key = resolve_api_key(Some("from-env".to_string()), file.path()).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn blank_environment_key_falls_back_to_secret_file() {
        let file = secret_file(r#"{"KEY": "from-file"}"#);
        let key = resolve_api_key(Some("   ".to_string()), file.path()).unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn no_key_anywhere_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("secret.json");
        assert!(matches!(
            resolve_api_key(None, &missing),
            Err(ConfigError::MissingApiKey(_))
        ));
    }

    #[test]
    fn cors_options_build() {
        assert!(create_cors().is_ok());
    }
}
