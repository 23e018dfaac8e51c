//! Fetch / classify / filter / rank / cache pipeline
//!
//! [`HighlightService`] is the single entry point used by the HTTP layer.

pub mod cache;
pub mod classify;
pub mod ranker;
pub mod relevance;

pub use cache::{CacheStats, SearchCache};
pub use classify::{Classification, Classifier};
pub use ranker::Ranker;
pub use relevance::{clean_title, RelevanceFilter, Stage, Verdict};

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::teams::{KeywordDictionary, OfficialChannelRegistry, Team, TeamRegistry};
use crate::video::{collector, CollectLimits, VideoItem, VideoSource};

/// The static tables the relevance stages consult
#[derive(Debug, Clone)]
pub struct Rules {
    pub teams: TeamRegistry,
    pub channels: OfficialChannelRegistry,
    pub dictionary: KeywordDictionary,
}

impl Rules {
    /// Built-in KBO tables with an optional official-channel override
    pub fn from_config(config: &Config) -> Self {
        let teams = TeamRegistry::kbo();
        let channels =
            OfficialChannelRegistry::load(config.youtube.official_channels_json.as_deref(), &teams);
        Self {
            teams,
            channels,
            dictionary: KeywordDictionary::new(),
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            teams: TeamRegistry::kbo(),
            channels: OfficialChannelRegistry::kbo_defaults(),
            dictionary: KeywordDictionary::new(),
        }
    }
}

/// Tunables of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub short_max_seconds: u64,
    pub limits: CollectLimits,
    pub ranking_enabled: bool,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            short_max_seconds: config.pipeline.short_max_seconds,
            limits: CollectLimits {
                total: config.pipeline.result_limit,
                per_channel: config.pipeline.max_channel_results,
                per_query: config.pipeline.max_query_results,
            },
            ranking_enabled: config.pipeline.ranking_enabled,
        }
    }
}

/// Final, filtered result for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    pub shorts: Vec<VideoItem>,
    pub longs: Vec<VideoItem>,
}

/// Highlight search service
pub struct HighlightService {
    source: Arc<dyn VideoSource>,
    rules: Rules,
    settings: PipelineSettings,
    classifier: Classifier,
    cache: SearchCache,
}

impl HighlightService {
    pub fn new(
        source: Arc<dyn VideoSource>,
        rules: Rules,
        settings: PipelineSettings,
        cache_ttl: Duration,
    ) -> Self {
        let classifier = Classifier::from_dictionary(settings.short_max_seconds, &rules.dictionary);
        Self {
            source,
            rules,
            settings,
            classifier,
            cache: SearchCache::new(cache_ttl),
        }
    }

    pub fn from_config(config: &Config, source: Arc<dyn VideoSource>) -> Self {
        Self::new(
            source,
            Rules::from_config(config),
            PipelineSettings::from_config(config),
            Duration::from_secs(config.cache.ttl_seconds),
        )
    }

    /// Swap the keyword tables (e.g. after loading a keyword file)
    pub fn with_dictionary(mut self, dictionary: KeywordDictionary) -> Self {
        self.classifier = Classifier::from_dictionary(self.settings.short_max_seconds, &dictionary);
        self.rules.dictionary = dictionary;
        self
    }

    pub fn teams(&self) -> &TeamRegistry {
        &self.rules.teams
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn has_credential(&self) -> bool {
        self.source.has_credential()
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Run the pipeline for whatever club identifier the client sent.
    ///
    /// Never fails: every failure upstream shows up as fewer (or no) items.
    pub async fn search(&self, club: &str, force: bool) -> Highlights {
        let club = club.trim();
        if club.is_empty() {
            return Highlights::default();
        }

        let team = self.rules.teams.resolve(club);
        let key = SearchCache::key(&team.name, self.settings.limits.total);

        if force {
            self.cache.invalidate(&key).await;
        }

        let classified = match self.cache.get(&key).await {
            Some(hit) => hit,
            None => {
                let fresh = self.fetch_classified(&team).await;
                self.cache.insert(&key, fresh.clone()).await;
                fresh
            }
        };

        let highlights = Highlights {
            shorts: self.postprocess(classified.shorts, &team),
            longs: self.postprocess(classified.longs, &team),
        };

        info!(
            "🎬 {}: {} shorts, {} longs",
            team.name,
            highlights.shorts.len(),
            highlights.longs.len()
        );
        highlights
    }

    async fn fetch_classified(&self, team: &Team) -> Classification {
        let candidates = collector::collect(
            self.source.as_ref(),
            &team.name,
            self.rules.channels.channels_for(team),
            self.settings.limits,
        )
        .await;

        self.classifier.classify(candidates.into_combined())
    }

    /// Clean titles, apply the relevance stages, then rank (or apply the
    /// two-team rule directly when ranking is off)
    fn postprocess(&self, items: Vec<VideoItem>, team: &Team) -> Vec<VideoItem> {
        let filter = RelevanceFilter::new(&self.rules);

        let kept: Vec<VideoItem> = items
            .into_iter()
            .filter_map(|item| {
                let cleaned = item.with_title(clean_title(&item.title));
                let verdict = filter.evaluate(&cleaned, team);
                match verdict {
                    Verdict::Keep(_) => Some(cleaned),
                    Verdict::Drop(Stage::EmptyTitle) => {
                        warn!("Dropping video {} with empty title", item.id);
                        None
                    }
                    Verdict::Drop(stage) => {
                        debug!("Dropped {} at {:?}: {}", item.id, stage, cleaned.title);
                        None
                    }
                }
            })
            .collect();

        if self.settings.ranking_enabled {
            Ranker::new(&self.rules).rank(kept, team)
        } else {
            kept.into_iter()
                .filter(|item| !filter.is_secondary_mention(item, team))
                .collect()
        }
    }
}
