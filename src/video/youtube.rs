/// YouTube Data API v3 adapter
use super::{item::watch_url, FetchOutcome, RawVideo, VideoItem, VideoSource};
use crate::config::YouTubeConfig;
use crate::error::{SourceError, SourceResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// The API refuses `maxResults` above this value
pub const MAX_PAGE_SIZE: usize = 50;

/// YouTube-backed [`VideoSource`]
#[derive(Clone)]
pub struct YouTubeSource {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    page_size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    id: SearchResultId,
    snippet: Option<Snippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource {
    id: String,
    snippet: Option<Snippet>,
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    published_at: Option<String>,
    channel_id: Option<String>,
    title: Option<String>,
    channel_title: Option<String>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Outcome of [`YouTubeSource::self_test`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfTestReport {
    pub ok: bool,
    /// Stage that failed: `build` (no credential) or `http`
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
}

impl Thumbnails {
    fn best(&self) -> Option<String> {
        self.high
            .as_ref()
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
    }
}

/// Merge a search hit with its (optional) detail record
fn to_raw(video_id: &str, snippet: Option<&Snippet>, duration: Option<String>) -> RawVideo {
    let snippet = snippet.cloned().unwrap_or_default();
    RawVideo {
        id: Some(video_id.to_string()),
        title: snippet.title,
        url: Some(watch_url(video_id)),
        thumbnail: snippet.thumbnails.best(),
        channel: snippet.channel_title,
        channel_id: snippet.channel_id,
        published_at: snippet.published_at,
        duration,
        seconds: None,
    }
}

fn truncate_message(text: &str) -> String {
    text.chars().take(300).collect()
}

impl YouTubeSource {
    /// Create a new adapter. A missing API key is not an error: the adapter
    /// then answers every call with an empty outcome.
    pub fn new(config: &YouTubeConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: Url::parse(&base)?,
            page_size: config.page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> SourceResult<T> {
        let api_key = self.api_key.as_deref().ok_or(SourceError::MissingCredential)?;

        let mut url = self.base_url.join(endpoint)?;
        url.query_pairs_mut()
            .extend_pairs(params.iter())
            .append_pair("key", api_key);

        debug!("Requesting YouTube {} ({} params)", endpoint, params.len());
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| truncate_message(&body));
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Walk `search.list` pages until `limit` items are gathered or the
    /// results run out
    async fn search_pages(
        &self,
        base_params: Vec<(&'static str, String)>,
        limit: usize,
    ) -> SourceResult<Vec<VideoItem>> {
        let mut collected: Vec<VideoItem> = Vec::new();
        let mut page_token: Option<String> = None;

        while collected.len() < limit {
            let wanted = (limit - collected.len()).min(self.page_size);
            let mut params = base_params.clone();
            params.push(("maxResults", wanted.to_string()));
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            let page: SearchListResponse = match self.get_json("search", &params).await {
                Ok(page) => page,
                Err(e) if !collected.is_empty() => {
                    warn!("Stopping pagination after {} items: {}", collected.len(), e);
                    break;
                }
                Err(e) => return Err(e),
            };

            let hits: Vec<(String, Option<Snippet>)> = page
                .items
                .into_iter()
                .filter_map(|hit| hit.id.video_id.map(|id| (id, hit.snippet)))
                .collect();

            if hits.is_empty() {
                break;
            }

            collected.extend(self.attach_details(hits).await);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        collected.truncate(limit);
        Ok(collected)
    }

    /// Look up snippet and duration for one page of hits.
    ///
    /// A failed lookup keeps the search snippets with unknown duration.
    async fn attach_details(&self, hits: Vec<(String, Option<Snippet>)>) -> Vec<VideoItem> {
        let ids = hits
            .iter()
            .map(|(id, _)| id.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let params = [
            ("part", "snippet,contentDetails".to_string()),
            ("id", ids),
        ];

        let mut details: HashMap<String, VideoResource> =
            match self.get_json::<VideoListResponse>("videos", &params).await {
                Ok(list) => list.items.into_iter().map(|v| (v.id.clone(), v)).collect(),
                Err(e) => {
                    warn!("Video detail lookup failed, durations unknown: {}", e);
                    HashMap::new()
                }
            };

        hits.into_iter()
            .filter_map(|(id, search_snippet)| {
                let raw = match details.remove(&id) {
                    Some(detail) => {
                        let duration = detail.content_details.and_then(|cd| cd.duration);
                        let snippet = detail.snippet.or(search_snippet);
                        to_raw(&id, snippet.as_ref(), duration)
                    }
                    None => to_raw(&id, search_snippet.as_ref(), None),
                };
                VideoItem::from_raw(raw)
            })
            .collect()
    }

    /// One-result request used by the `yt-self-test` binary
    pub async fn self_test(&self) -> SelfTestReport {
        if self.api_key.is_none() {
            return SelfTestReport {
                ok: false,
                stage: Some("build".to_string()),
                status: None,
                message: Some("NO_API_KEY".to_string()),
                items: None,
            };
        }

        let params = [
            ("part", "id".to_string()),
            ("q", "KBO".to_string()),
            ("type", "video".to_string()),
            ("maxResults", "1".to_string()),
        ];

        match self.get_json::<SearchListResponse>("search", &params).await {
            Ok(page) => SelfTestReport {
                ok: true,
                stage: None,
                status: None,
                message: None,
                items: Some(page.items.len()),
            },
            Err(e) => SelfTestReport {
                ok: false,
                stage: Some("http".to_string()),
                status: e.status(),
                message: Some(truncate_message(&e.to_string())),
                items: None,
            },
        }
    }
}

#[async_trait]
impl VideoSource for YouTubeSource {
    async fn channel_uploads(&self, channel_id: &str, limit: usize) -> FetchOutcome {
        if channel_id.trim().is_empty() || limit == 0 {
            return FetchOutcome::Fetched(Vec::new());
        }

        let params = vec![
            ("part", "snippet".to_string()),
            ("channelId", channel_id.to_string()),
            ("type", "video".to_string()),
            ("order", "date".to_string()),
            ("safeSearch", "none".to_string()),
        ];

        let outcome = FetchOutcome::from_result(self.search_pages(params, limit).await);
        if let FetchOutcome::Fetched(items) = &outcome {
            info!("📺 Channel {} returned {} videos", channel_id, items.len());
        }
        outcome
    }

    async fn search(&self, query: &str, limit: usize) -> FetchOutcome {
        if query.trim().is_empty() || limit == 0 {
            return FetchOutcome::Fetched(Vec::new());
        }

        let params = vec![
            ("part", "snippet".to_string()),
            ("q", query.to_string()),
            ("type", "video".to_string()),
            ("order", "date".to_string()),
            ("safeSearch", "none".to_string()),
        ];

        let outcome = FetchOutcome::from_result(self.search_pages(params, limit).await);
        if let FetchOutcome::Fetched(items) = &outcome {
            info!("🔍 Search '{}' returned {} videos", query, items.len());
        }
        outcome
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}
