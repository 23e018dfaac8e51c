/// Club registry and the per-club keyword tables
///
/// Everything here is built once at startup and handed to the pipeline as
/// plain values.

pub mod channels;
pub mod dictionary;

pub use channels::OfficialChannelRegistry;
pub use dictionary::{KeywordCategory, KeywordDictionary};

use serde::{Deserialize, Serialize};

/// A KBO club: short key plus canonical display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    pub key: String,
    pub name: String,
}

impl Team {
    pub fn new(key: &str, name: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
        }
    }
}

/// Ordered, immutable list of known clubs
#[derive(Debug, Clone)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl TeamRegistry {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// The ten KBO league clubs
    pub fn kbo() -> Self {
        Self::new(vec![
            Team::new("LG", "LG 트윈스"),
            Team::new("두산", "두산 베어스"),
            Team::new("SSG", "SSG 랜더스"),
            Team::new("키움", "키움 히어로즈"),
            Team::new("KT", "KT 위즈"),
            Team::new("KIA", "KIA 타이거즈"),
            Team::new("삼성", "삼성 라이온즈"),
            Team::new("NC", "NC 다이노스"),
            Team::new("롯데", "롯데 자이언츠"),
            Team::new("한화", "한화 이글스"),
        ])
    }

    pub fn all(&self) -> &[Team] {
        &self.teams
    }

    pub fn first(&self) -> Option<&Team> {
        self.teams.first()
    }

    /// Exact lookup by key or canonical name
    pub fn find(&self, club: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.key == club || t.name == club)
    }

    /// Resolve whatever the client sent into a team.
    ///
    /// Unknown input is kept as-is for both key and name so free-form club
    /// names still produce a search.
    pub fn resolve(&self, club: &str) -> Team {
        let club = club.trim();
        self.find(club)
            .cloned()
            .unwrap_or_else(|| Team::new(club, club))
    }

    /// Display name for a `team` query parameter, falling back to the input
    pub fn display_name(&self, club: &str) -> String {
        self.find(club)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| club.to_string())
    }
}

impl Default for TeamRegistry {
    fn default() -> Self {
        Self::kbo()
    }
}
