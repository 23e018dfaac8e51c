#![allow(dead_code)]

use async_trait::async_trait;
use kbo_highlights::video::FetchOutcome;
use kbo_highlights::{VideoItem, VideoSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const LG_CHANNEL: &str = "UCL6QZZxb-HR4hCh_eFAnQWA";

pub fn video(id: &str, title: &str, channel: &str, channel_id: &str, seconds: u64) -> VideoItem {
    VideoItem {
        id: id.to_string(),
        title: title.to_string(),
        url: format!("https://www.youtube.com/watch?v={}", id),
        thumbnail: Some(format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id)),
        channel: Some(channel.to_string()),
        channel_id: Some(channel_id.to_string()),
        published_at: Some("2025-06-01T12:00:00Z".to_string()),
        duration: Some(format!("PT{}S", seconds)),
        seconds,
    }
}

/// In-memory video source that counts how often it is asked
#[derive(Default)]
pub struct MockSource {
    pub channels: HashMap<String, Vec<VideoItem>>,
    pub search_results: Vec<VideoItem>,
    pub no_credential: bool,
    pub channel_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
}

impl MockSource {
    pub fn with_channel(mut self, channel_id: &str, items: Vec<VideoItem>) -> Self {
        self.channels.insert(channel_id.to_string(), items);
        self
    }

    pub fn with_search(mut self, items: Vec<VideoItem>) -> Self {
        self.search_results = items;
        self
    }

    pub fn total_calls(&self) -> usize {
        self.channel_calls.load(Ordering::SeqCst) + self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoSource for MockSource {
    async fn channel_uploads(&self, channel_id: &str, limit: usize) -> FetchOutcome {
        self.channel_calls.fetch_add(1, Ordering::SeqCst);
        let items = self.channels.get(channel_id).cloned().unwrap_or_default();
        FetchOutcome::Fetched(items.into_iter().take(limit).collect())
    }

    async fn search(&self, _query: &str, limit: usize) -> FetchOutcome {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        FetchOutcome::Fetched(self.search_results.iter().take(limit).cloned().collect())
    }

    fn has_credential(&self) -> bool {
        !self.no_credential
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// The two-video LG fixture: an official short and an electronics long-form
pub fn lg_source() -> MockSource {
    MockSource::default()
        .with_channel(
            LG_CHANNEL,
            vec![video("lg1", "LG 트윈스 하이라이트", "LGTWINSTV", LG_CHANNEL, 40)],
        )
        .with_search(vec![video("lg2", "LG전자 신제품 발표", "테크리뷰", "UCtech", 300)])
}
