/// Candidate gathering for one team: official channels first, then a
/// generic highlight search to top up the pool
use super::{EmptyReason, FetchOutcome, VideoItem, VideoSource};
use futures::future::join_all;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Per-source result caps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectLimits {
    /// Total number of candidates wanted
    pub total: usize,
    /// Cap per official channel
    pub per_channel: usize,
    /// Cap for the generic search
    pub per_query: usize,
}

/// Candidates split by where they came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub official: Vec<VideoItem>,
    pub generic: Vec<VideoItem>,
}

impl Candidates {
    pub fn len(&self) -> usize {
        self.official.len() + self.generic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Official items followed by generic ones
    pub fn into_combined(self) -> Vec<VideoItem> {
        let mut all = self.official;
        all.extend(self.generic);
        all
    }
}

/// Free-text query used for the generic search
pub fn highlight_query(team_name: &str) -> Option<String> {
    let team = team_name.trim();
    if team.is_empty() {
        None
    } else {
        Some(format!("{} 하이라이트", team))
    }
}

fn log_empty(what: &str, outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Empty(EmptyReason::NoCredential) => {
            debug!("{}: skipped, no API credential", what)
        }
        FetchOutcome::Empty(EmptyReason::Failed(e)) => {
            warn!("{}: failed, contributing nothing: {}", what, e)
        }
        FetchOutcome::Fetched(_) => {}
    }
}

/// Keep the first occurrence of every id
fn retain_unseen(items: Vec<VideoItem>, seen: &mut HashSet<String>) -> Vec<VideoItem> {
    items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect()
}

/// Gather candidates for a team.
///
/// Official channels are queried concurrently; the generic search only asks
/// for what the official channels did not supply. Without a credential
/// nothing is requested at all.
pub async fn collect(
    source: &dyn VideoSource,
    team_name: &str,
    official_channels: &[String],
    limits: CollectLimits,
) -> Candidates {
    if !source.has_credential() {
        info!("🔑 No API credential configured for {}, returning no videos", source.name());
        return Candidates::default();
    }

    let mut seen = HashSet::new();

    let channel_limit = limits.total.min(limits.per_channel);
    let outcomes = join_all(
        official_channels
            .iter()
            .map(|channel_id| source.channel_uploads(channel_id, channel_limit)),
    )
    .await;

    let mut official = Vec::new();
    for (channel_id, outcome) in official_channels.iter().zip(outcomes) {
        log_empty(&format!("Official channel {}", channel_id), &outcome);
        official.extend(retain_unseen(outcome.into_items(), &mut seen));
    }
    official.truncate(limits.total);

    let remaining = limits.total.saturating_sub(official.len()).min(limits.per_query);
    let generic = match highlight_query(team_name) {
        Some(query) if remaining > 0 => {
            let outcome = source.search(&query, remaining).await;
            log_empty(&format!("Search '{}'", query), &outcome);
            let mut items = retain_unseen(outcome.into_items(), &mut seen);
            items.truncate(remaining);
            items
        }
        _ => Vec::new(),
    };

    info!(
        "📦 Collected {} official + {} generic candidates for {}",
        official.len(),
        generic.len(),
        team_name
    );

    Candidates { official, generic }
}
