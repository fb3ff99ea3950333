pub mod analysis_service;
pub mod youtube_client;
