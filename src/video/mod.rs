/// Video acquisition layer
///
/// Talks to the external video index, normalizes what comes back into
/// [`VideoItem`]s and gathers the candidate pool for one team.

pub mod collector;
pub mod duration;
pub mod item;
pub mod youtube;

pub use collector::{Candidates, CollectLimits};
pub use item::{RawVideo, VideoItem};
pub use youtube::{SelfTestReport, YouTubeSource};

use async_trait::async_trait;

use crate::error::{SourceError, SourceResult};

/// Why a fetch contributed nothing
#[derive(Debug)]
pub enum EmptyReason {
    /// No API key is configured; no request was made
    NoCredential,
    /// The call was attempted and failed
    Failed(SourceError),
}

/// Result of one adapter call.
///
/// Callers decide explicitly what to do with an `Empty` outcome; the
/// pipeline always degrades it to "no items".
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Vec<VideoItem>),
    Empty(EmptyReason),
}

impl FetchOutcome {
    /// Fold a fallible call into an outcome
    pub fn from_result(result: SourceResult<Vec<VideoItem>>) -> Self {
        match result {
            Ok(items) => FetchOutcome::Fetched(items),
            Err(SourceError::MissingCredential) => FetchOutcome::Empty(EmptyReason::NoCredential),
            Err(e) => FetchOutcome::Empty(EmptyReason::Failed(e)),
        }
    }

    pub fn into_items(self) -> Vec<VideoItem> {
        match self {
            FetchOutcome::Fetched(items) => items,
            FetchOutcome::Empty(_) => Vec::new(),
        }
    }
}

/// Trait for external video indexes
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Most recent uploads of one channel, newest first
    async fn channel_uploads(&self, channel_id: &str, limit: usize) -> FetchOutcome;

    /// Free-text search, newest first
    async fn search(&self, query: &str, limit: usize) -> FetchOutcome;

    /// Whether the source can make requests at all
    fn has_credential(&self) -> bool;

    fn name(&self) -> &'static str;
}
