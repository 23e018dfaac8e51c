use serde::{Deserialize, Serialize};
use tracing::warn;

use super::duration;

/// A single normalized video record.
///
/// Every downstream stage (classifier, relevance filter, ranker, cache) reads
/// this one schema; aliases from the external API are resolved in
/// [`VideoItem::from_raw`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoItem {
    /// External identifier (YouTube video id)
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
    /// Channel display name
    pub channel: Option<String>,
    pub channel_id: Option<String>,
    pub published_at: Option<String>,
    /// Raw ISO-8601 duration as reported by the API
    pub duration: Option<String>,
    /// Duration in whole seconds, `0` when unknown
    pub seconds: u64,
}

/// Loosely-typed video record as produced by any source.
///
/// Field aliases cover the shapes seen across API responses and older crawler
/// output, e.g. `channel` / `channelTitle` / `uploader`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideo {
    #[serde(default, alias = "videoId", alias = "video_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "watch_url")]
    pub url: Option<String>,
    #[serde(default, alias = "thumbnail_url")]
    pub thumbnail: Option<String>,
    #[serde(default, alias = "channelTitle", alias = "uploader")]
    pub channel: Option<String>,
    #[serde(default, alias = "channelId", alias = "uploader_id")]
    pub channel_id: Option<String>,
    #[serde(default, alias = "publishedAt", alias = "publish_date")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub seconds: Option<u64>,
}

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Build the canonical watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_PREFIX, video_id)
}

/// Recover a video id from a watch URL's `v` query parameter
fn id_from_url(raw_url: &str) -> Option<String> {
    let parsed = url::Url::parse(raw_url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl VideoItem {
    /// Normalize a raw record. Returns `None` (and logs) when no identifier
    /// can be determined.
    pub fn from_raw(raw: RawVideo) -> Option<Self> {
        let url = non_empty(raw.url);
        let id = non_empty(raw.id).or_else(|| url.as_deref().and_then(id_from_url));

        let Some(id) = id else {
            warn!("Dropping video record without an identifier: {:?}", raw.title);
            return None;
        };

        let duration = non_empty(raw.duration);
        let seconds = raw
            .seconds
            .unwrap_or_else(|| duration.as_deref().map(duration::decode).unwrap_or(0));

        Some(Self {
            url: url.unwrap_or_else(|| watch_url(&id)),
            id,
            title: raw.title.unwrap_or_default(),
            thumbnail: non_empty(raw.thumbnail),
            channel: non_empty(raw.channel),
            channel_id: non_empty(raw.channel_id),
            published_at: non_empty(raw.published_at),
            duration,
            seconds,
        })
    }

    /// Copy of this item with a replacement title
    pub fn with_title(&self, title: String) -> Self {
        Self {
            title,
            ..self.clone()
        }
    }
}
