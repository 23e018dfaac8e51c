//! Title relevance: does a video belong to the requested club?
//!
//! Titles are cleaned first, then run through the stages in order:
//! official channel, category exclusion, baseball signal. The first stage
//! that decides wins.

use regex::Regex;
use std::sync::LazyLock;

use super::Rules;
use crate::teams::{KeywordCategory, Team};
use crate::video::VideoItem;

static HASHTAG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#\S+").expect("hashtag pattern is valid"));
static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("space pattern is valid"));
static EDGE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^[\s|\-·]+|[\s|\-·]+$)").expect("separator pattern is valid")
});

/// Strip hashtags, collapse whitespace, trim separator characters
pub fn clean_title(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }
    let text = HASHTAG_RUN.replace_all(title, " ");
    let text = SPACE_RUN.replace_all(&text, " ");
    EDGE_SEPARATORS.replace_all(text.trim(), "").into_owned()
}

/// Which rule decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    EmptyTitle,
    OfficialChannel,
    CategoryExclusion,
    TeamMention,
    BaseballSignal,
    NoSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep(Stage),
    Drop(Stage),
}

impl Verdict {
    pub fn is_keep(&self) -> bool {
        matches!(self, Verdict::Keep(_))
    }
}

/// Byte spans where a team's key or name occurs in a lower-cased title
fn occurrences(lowered: &str, team: &Team) -> Vec<(usize, usize)> {
    [team.name.to_lowercase(), team.key.to_lowercase()]
        .iter()
        .filter(|alias| !alias.is_empty())
        .flat_map(|alias| {
            lowered
                .match_indices(alias.as_str())
                .map(|(start, m)| (start, start + m.len()))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn strictly_inside(inner: (usize, usize), outer: (usize, usize)) -> bool {
    outer.0 <= inner.0 && inner.1 <= outer.1 && (outer.1 - outer.0) > (inner.1 - inner.0)
}

/// Title mention checks shared by the filter and the ranker
pub struct Mentions<'a> {
    rules: &'a Rules,
}

impl<'a> Mentions<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self { rules }
    }

    /// Title contains the team's key or canonical name
    pub fn mentions(&self, lowered: &str, team: &Team) -> bool {
        !occurrences(lowered, team).is_empty()
    }

    /// Title begins with the team's key or canonical name
    pub fn leads_with(&self, lowered: &str, team: &Team) -> bool {
        [team.name.to_lowercase(), team.key.to_lowercase()]
            .iter()
            .any(|alias| !alias.is_empty() && lowered.starts_with(alias.as_str()))
    }

    /// The title names another club, and the requested club is either absent
    /// or appears after it.
    ///
    /// A match lying strictly inside a longer match of a different club is
    /// ignored, so the longer name wins; on equal start positions the
    /// requested club is treated as leading.
    pub fn is_secondary(&self, lowered: &str, team: &Team) -> bool {
        let own = occurrences(lowered, team);

        let rivals: Vec<(usize, usize)> = self
            .rules
            .teams
            .all()
            .iter()
            .filter(|other| other.key != team.key && other.name != team.name)
            .flat_map(|other| occurrences(lowered, other))
            .collect();

        let own_first = own
            .iter()
            .filter(|span| !rivals.iter().any(|r| strictly_inside(**span, *r)))
            .map(|span| span.0)
            .min();
        let rival_first = rivals
            .iter()
            .filter(|span| !own.iter().any(|o| strictly_inside(**span, *o)))
            .map(|span| span.0)
            .min();

        match (own_first, rival_first) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(own_pos), Some(rival_pos)) => rival_pos < own_pos,
        }
    }

    /// League or broadcaster channel
    pub fn is_neutral(&self, item: &VideoItem) -> bool {
        self.rules.dictionary.is_neutral_channel(item.channel.as_deref())
    }

    pub fn is_official(&self, item: &VideoItem, team: &Team) -> bool {
        self.rules.channels.is_official(team, item.channel_id.as_deref())
    }
}

/// Staged keep/drop decision for one title
pub struct RelevanceFilter<'a> {
    rules: &'a Rules,
    mentions: Mentions<'a>,
}

impl<'a> RelevanceFilter<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self {
            rules,
            mentions: Mentions::new(rules),
        }
    }

    /// Evaluate an item whose title has already been cleaned
    pub fn evaluate(&self, item: &VideoItem, team: &Team) -> Verdict {
        if item.title.is_empty() {
            return Verdict::Drop(Stage::EmptyTitle);
        }

        if self.mentions.is_official(item, team) {
            return Verdict::Keep(Stage::OfficialChannel);
        }

        let lowered = item.title.to_lowercase();

        if self.rules.dictionary.find_denied(&team.key, &lowered).is_some() {
            return Verdict::Drop(Stage::CategoryExclusion);
        }

        if self.mentions.mentions(&lowered, team) {
            return Verdict::Keep(Stage::TeamMention);
        }

        if self
            .rules
            .dictionary
            .find_in(KeywordCategory::BaseballSignals, &lowered)
            .is_some()
        {
            return Verdict::Keep(Stage::BaseballSignal);
        }

        Verdict::Drop(Stage::NoSignal)
    }

    /// Two-team rule applied as a hard drop (used when ranking is off)
    pub fn is_secondary_mention(&self, item: &VideoItem, team: &Team) -> bool {
        if self.mentions.is_official(item, team) || self.mentions.is_neutral(item) {
            return false;
        }
        self.mentions.is_secondary(&item.title.to_lowercase(), team)
    }
}
