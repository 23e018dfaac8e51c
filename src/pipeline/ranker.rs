/// Integer scoring and ordering of relevance-passed items
use super::relevance::Mentions;
use super::Rules;
use crate::teams::Team;
use crate::video::VideoItem;

pub const OFFICIAL_BONUS: i32 = 100;
pub const MENTION_BONUS: i32 = 30;
pub const LEAD_BONUS: i32 = 15;
pub const SECONDARY_PENALTY: i32 = -40;

/// An item with its score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scored {
    pub item: VideoItem,
    pub score: i32,
}

pub struct Ranker<'a> {
    mentions: Mentions<'a>,
}

impl<'a> Ranker<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self {
            mentions: Mentions::new(rules),
        }
    }

    pub fn score(&self, item: &VideoItem, team: &Team) -> i32 {
        let lowered = item.title.to_lowercase();
        let official = self.mentions.is_official(item, team);
        let mut score = 0;

        if official {
            score += OFFICIAL_BONUS;
        }
        if self.mentions.mentions(&lowered, team) {
            score += MENTION_BONUS;
            if self.mentions.leads_with(&lowered, team) {
                score += LEAD_BONUS;
            }
        }
        if !official
            && !self.mentions.is_neutral(item)
            && self.mentions.is_secondary(&lowered, team)
        {
            score += SECONDARY_PENALTY;
        }

        score
    }

    /// Score, drop negatives, sort by score descending.
    ///
    /// The sort is stable: equal scores keep their input order.
    pub fn rank_scored(&self, items: Vec<VideoItem>, team: &Team) -> Vec<Scored> {
        let mut scored: Vec<Scored> = items
            .into_iter()
            .map(|item| {
                let score = self.score(&item, team);
                Scored { item, score }
            })
            .filter(|s| s.score >= 0)
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    pub fn rank(&self, items: Vec<VideoItem>, team: &Team) -> Vec<VideoItem> {
        self.rank_scored(items, team)
            .into_iter()
            .map(|s| s.item)
            .collect()
    }
}
