use crate::config::MAX_RESULTS_PER_CALL;
use crate::models::{ChannelStats, ResultRow, SearchHit, VideoInfo};
use crate::services::youtube_client::{VideoPlatform, YouTubeResult};
use log::{debug, info};
use std::collections::{HashMap, HashSet};

/// Clamps the requested page size into what one search call can return.
pub fn clamp_max_results(max_results: u32) -> u32 {
    max_results.clamp(1, MAX_RESULTS_PER_CALL)
}

pub async fn video_search(
    platform: &dyn VideoPlatform,
    query: &str,
    max_results: u32,
) -> YouTubeResult<Vec<SearchHit>> {
    let max_results = clamp_max_results(max_results);
    let hits = platform.search_videos(query, max_results).await?;
    info!("Search \"{query}\" returned {} videos.", hits.len());
    Ok(hits)
}

/// Enriches search hits with subscriber counts and video metadata, keeping
/// only videos from channels below `threshold` subscribers.
///
/// `Ok` with an empty list means there was nothing to show; `Err` means one
/// of the lookups failed.
pub async fn get_results(
    platform: &dyn VideoPlatform,
    hits: &[SearchHit],
    threshold: u64,
) -> YouTubeResult<Vec<ResultRow>> {
    if hits.is_empty() {
        debug!("No search hits, nothing to enrich.");
        return Ok(Vec::new());
    }

    let channel_ids = distinct_channel_ids(hits);
    if channel_ids.is_empty() {
        return Ok(Vec::new());
    }

    let stats = platform.channel_statistics(&channel_ids).await?;
    let candidates = filter_by_subscribers(hits, &stats, threshold);
    info!(
        "{} of {} videos come from channels below {threshold} subscribers.",
        candidates.len(),
        hits.len()
    );
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let video_ids: Vec<String> = candidates
        .iter()
        .map(|(hit, _)| hit.video_id.clone())
        .collect();
    let videos = platform.video_details(&video_ids).await?;
    debug!(
        "Fetched metadata for {} of {} videos.",
        videos.len(),
        video_ids.len()
    );

    Ok(join_video_info(candidates, videos))
}

/// Channel ids in first-seen order.
pub fn distinct_channel_ids(hits: &[SearchHit]) -> Vec<String> {
    let mut seen = HashSet::new();
    hits.iter()
        .filter(|hit| seen.insert(hit.channel_id.as_str()))
        .map(|hit| hit.channel_id.clone())
        .collect()
}

/// Inner join on channel id followed by `subscriber_count < threshold`.
/// Channels without a reported count are treated as having 0 subscribers.
pub fn filter_by_subscribers<'a>(
    hits: &'a [SearchHit],
    stats: &[ChannelStats],
    threshold: u64,
) -> Vec<(&'a SearchHit, u64)> {
    let subscribers: HashMap<&str, u64> = stats
        .iter()
        .map(|s| (s.channel_id.as_str(), s.subscriber_count.unwrap_or(0)))
        .collect();

    hits.iter()
        .filter_map(|hit| {
            let count = *subscribers.get(hit.channel_id.as_str())?;
            (count < threshold).then_some((hit, count))
        })
        .collect()
}

/// Inner join on video id. If the lookup came back with nothing at all the
/// candidates are kept with empty metadata instead.
pub fn join_video_info(candidates: Vec<(&SearchHit, u64)>, videos: Vec<VideoInfo>) -> Vec<ResultRow> {
    if videos.is_empty() {
        return candidates
            .into_iter()
            .map(|(hit, subscriber_count)| ResultRow {
                video_id: hit.video_id.clone(),
                title: None,
                view_count: None,
                subscriber_count,
                channel_id: hit.channel_id.clone(),
            })
            .collect();
    }

    let by_id: HashMap<&str, &VideoInfo> =
        videos.iter().map(|v| (v.video_id.as_str(), v)).collect();

    candidates
        .into_iter()
        .filter_map(|(hit, subscriber_count)| {
            let info = by_id.get(hit.video_id.as_str())?;
            Some(ResultRow {
                video_id: hit.video_id.clone(),
                title: info.title.clone(),
                view_count: info.view_count,
                subscriber_count,
                channel_id: hit.channel_id.clone(),
            })
        })
        .collect()
}
