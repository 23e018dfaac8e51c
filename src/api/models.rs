//! API data models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pipeline::{CacheStats, Highlights};
use crate::teams::dictionary::DictionaryStats;
use crate::video::VideoItem;

/// Search parameters after normalizing POST bodies and query strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub club: String,
    pub force: bool,
}

impl SearchRequest {
    /// Read `club` and `force` from a POST body.
    ///
    /// Anything that is not a JSON object counts as an empty request.
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(_) => return Self::default(),
        };

        let club = match value.get("club") {
            Some(Value::String(club)) => club.trim().to_string(),
            _ => String::new(),
        };

        Self {
            club,
            force: value.get("force").map(is_truthy).unwrap_or(false),
        }
    }

    /// Read `team` (or `club`) and `force` from query parameters
    pub fn from_query(query: &SearchQuery) -> Self {
        let club = [query.team.as_deref(), query.club.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or_default()
            .to_string();

        Self {
            club,
            force: query.force.as_deref().map(str_is_truthy).unwrap_or(false),
        }
    }
}

/// Query string of `GET /search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub team: Option<String>,
    pub club: Option<String>,
    pub force: Option<String>,
}

/// Query string of the HTML page
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub team: Option<String>,
}

fn str_is_truthy(s: &str) -> bool {
    let s = s.trim();
    !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
}

/// Loose truthiness for the `force` flag
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => str_is_truthy(s),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// One video in a search response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPayload {
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub channel: Option<String>,
    pub channel_id: Option<String>,
    pub published_at: Option<String>,
    pub duration: Option<String>,
    pub seconds: u64,
}

impl From<VideoItem> for VideoPayload {
    fn from(item: VideoItem) -> Self {
        Self {
            title: item.title,
            url: item.url,
            thumbnail: item.thumbnail,
            channel: item.channel,
            channel_id: item.channel_id,
            published_at: item.published_at,
            duration: item.duration,
            seconds: item.seconds,
        }
    }
}

/// Response of `/search`; `short` mirrors `shorts` for older clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub shorts: Vec<VideoPayload>,
    pub short: Vec<VideoPayload>,
    pub long: Vec<VideoPayload>,
}

impl From<Highlights> for SearchResponse {
    fn from(highlights: Highlights) -> Self {
        let shorts: Vec<VideoPayload> = highlights.shorts.into_iter().map(Into::into).collect();
        Self {
            short: shorts.clone(),
            shorts,
            long: highlights.longs.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response of `/api/status`
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub service: &'static str,
    pub version: &'static str,
    pub credential_configured: bool,
    pub teams: usize,
    pub cache: CacheStats,
    pub keywords: DictionaryStats,
    pub timestamp: String,
}
