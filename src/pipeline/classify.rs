/// Short-form / long-form split
use crate::teams::{KeywordCategory, KeywordDictionary};
use crate::video::VideoItem;
use serde::{Deserialize, Serialize};

/// Items split into the two duration buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub shorts: Vec<VideoItem>,
    pub longs: Vec<VideoItem>,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.shorts.len() + self.longs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Duration-threshold classifier with a title-marker override
#[derive(Debug, Clone)]
pub struct Classifier {
    short_max_seconds: u64,
    /// Lower-cased short-form markers
    markers: Vec<String>,
}

impl Classifier {
    pub fn new(short_max_seconds: u64, markers: &[String]) -> Self {
        Self {
            short_max_seconds,
            markers: markers.iter().map(|m| m.to_lowercase()).collect(),
        }
    }

    pub fn from_dictionary(short_max_seconds: u64, dictionary: &KeywordDictionary) -> Self {
        Self::new(
            short_max_seconds,
            dictionary.get_terms(KeywordCategory::ShortMarkers),
        )
    }

    /// Whether one item is short-form. Looks only at the item itself.
    ///
    /// Unknown duration (0 s) counts as long unless a marker says otherwise.
    pub fn is_short(&self, item: &VideoItem) -> bool {
        let title = item.title.to_lowercase();
        if self.markers.iter().any(|m| contains_marker(&title, m)) {
            return true;
        }
        item.seconds > 0 && item.seconds <= self.short_max_seconds
    }

    /// Partition items, keeping their relative order in each bucket
    pub fn classify(&self, items: Vec<VideoItem>) -> Classification {
        let (shorts, longs): (Vec<_>, Vec<_>) =
            items.into_iter().partition(|item| self.is_short(item));
        Classification { shorts, longs }
    }
}

/// Bare ASCII-word markers ("shorts") must stand alone so "shortstop" does
/// not match; anything else ("#shorts", "쇼츠") is a plain substring.
fn contains_marker(title: &str, marker: &str) -> bool {
    let is_word = |c: char| c.is_ascii_alphanumeric();
    if marker.is_empty() || !marker.chars().all(is_word) {
        return title.contains(marker);
    }

    title.match_indices(marker).any(|(start, _)| {
        let before = title[..start].chars().next_back();
        let after = title[start + marker.len()..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}
