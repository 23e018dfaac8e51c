/// KBO Highlights - club video highlight backend
///
/// Collects recent videos for a KBO club from the YouTube Data API, splits
/// them into short-form and long-form, filters out unrelated titles, ranks
/// what remains and serves the result over HTTP with a short-lived cache.

pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod teams;
pub mod video;

// Re-export main types for easy access
pub use crate::config::Config;
pub use crate::error::{SourceError, SourceResult};
pub use crate::pipeline::{HighlightService, Highlights, PipelineSettings, Rules};
pub use crate::teams::{KeywordDictionary, OfficialChannelRegistry, Team, TeamRegistry};
pub use crate::video::{FetchOutcome, VideoItem, VideoSource, YouTubeSource};
