use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, warn};

use super::{Team, TeamRegistry};

/// Known official video channels per club, keyed by canonical team name
#[derive(Debug, Clone, Default)]
pub struct OfficialChannelRegistry {
    channels: HashMap<String, Vec<String>>,
}

/// Override values may be a single channel id or a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChannelSpec {
    One(String),
    Many(Vec<String>),
}

impl ChannelSpec {
    fn into_ids(self) -> Vec<String> {
        match self {
            ChannelSpec::One(id) => vec![id],
            ChannelSpec::Many(ids) => ids,
        }
    }
}

impl OfficialChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the clubs' own YouTube channels
    pub fn kbo_defaults() -> Self {
        let mut registry = Self::new();
        let defaults = [
            ("키움 히어로즈", "UC_MA8-XEaVmvyayPzG66IKg"),
            ("NC 다이노스", "UC8_FRgynMX8wlGsU6Jh3zKg"),
            ("LG 트윈스", "UCL6QZZxb-HR4hCh_eFAnQWA"),
            ("롯데 자이언츠", "UCAZQZdSY5_YrziMPqXi-Zfw"),
            ("KT 위즈", "UCvScyjGkBUx2CJDMNAi9Twg"),
            ("삼성 라이온즈", "UCMWAku3a3h65QpLm63Jf2pw"),
            ("KIA 타이거즈", "UCKp8knO8a6tSI1oaLjfd9XA"),
            ("두산 베어스", "UCsebzRfMhwYfjeBIxNX1brg"),
            ("SSG 랜더스", "UCt8iRtgjVqm5rJHNl1TUojg"),
            ("한화 이글스", "UCdq4Ji3772xudYRUatdzRrg"),
        ];
        for (team_name, channel_id) in defaults {
            registry.insert(team_name, channel_id);
        }
        registry
    }

    /// Register a channel; duplicates are ignored
    pub fn insert(&mut self, team_name: &str, channel_id: &str) {
        let channel_id = channel_id.trim();
        if channel_id.is_empty() {
            return;
        }
        let ids = self.channels.entry(team_name.to_string()).or_default();
        if !ids.iter().any(|id| id == channel_id) {
            ids.push(channel_id.to_string());
        }
    }

    /// Apply a JSON override such as `{"LG": ["UC..."], "KT 위즈": "UC..."}`.
    ///
    /// Keys may be team keys or canonical names; each listed team's channels
    /// are replaced wholesale, unlisted teams keep their defaults.
    pub fn apply_json_override(&mut self, json: &str, teams: &TeamRegistry) -> Result<()> {
        let overrides: HashMap<String, ChannelSpec> =
            serde_json::from_str(json).context("Invalid official channel override JSON")?;

        for (club, spec) in overrides {
            let team_name = teams.display_name(club.trim());
            self.channels.remove(&team_name);
            for channel_id in spec.into_ids() {
                self.insert(&team_name, &channel_id);
            }
            info!("📺 Official channels overridden for {}", team_name);
        }
        Ok(())
    }

    /// Defaults plus an optional override; a broken override is logged and
    /// ignored. The JSON is parsed before anything is replaced.
    pub fn load(override_json: Option<&str>, teams: &TeamRegistry) -> Self {
        let mut registry = Self::kbo_defaults();
        if let Some(json) = override_json.filter(|j| !j.trim().is_empty()) {
            if let Err(e) = registry.apply_json_override(json, teams) {
                warn!("Ignoring official channel override: {:#}", e);
            }
        }
        registry
    }

    /// Channels registered for a team (by canonical name, then by key)
    pub fn channels_for(&self, team: &Team) -> &[String] {
        self.channels
            .get(&team.name)
            .or_else(|| self.channels.get(&team.key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_official(&self, team: &Team, channel_id: Option<&str>) -> bool {
        match channel_id {
            Some(id) => self.channels_for(team).iter().any(|c| c == id),
            None => false,
        }
    }

    pub fn team_count(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_all_clubs() {
        let teams = TeamRegistry::kbo();
        let registry = OfficialChannelRegistry::kbo_defaults();
        for team in teams.all() {
            assert_eq!(registry.channels_for(team).len(), 1, "{}", team.name);
        }
    }

    #[test]
    fn test_is_official() {
        let teams = TeamRegistry::kbo();
        let registry = OfficialChannelRegistry::kbo_defaults();
        let lg = teams.resolve("LG");
        let kia = teams.resolve("KIA");

        assert!(registry.is_official(&lg, Some("UCL6QZZxb-HR4hCh_eFAnQWA")));
        assert!(!registry.is_official(&kia, Some("UCL6QZZxb-HR4hCh_eFAnQWA")));
        assert!(!registry.is_official(&lg, None));
    }

    #[test]
    fn test_override_by_key_replaces_channels() {
        let teams = TeamRegistry::kbo();
        let registry = OfficialChannelRegistry::load(
            Some(r#"{"LG": ["UC_A", "UC_B", "UC_A"], "KT 위즈": "UC_C"}"#),
            &teams,
        );

        let lg = teams.resolve("LG");
        assert_eq!(registry.channels_for(&lg), ["UC_A".to_string(), "UC_B".to_string()]);
        assert_eq!(registry.channels_for(&teams.resolve("KT")), ["UC_C".to_string()]);
        assert_eq!(registry.channels_for(&teams.resolve("NC")).len(), 1);
    }

    #[test]
    fn test_broken_override_keeps_defaults() {
        let teams = TeamRegistry::kbo();
        let registry = OfficialChannelRegistry::load(Some("{not json"), &teams);
        assert_eq!(registry.team_count(), 10);
        assert!(registry.is_official(&teams.resolve("한화"), Some("UCdq4Ji3772xudYRUatdzRrg")));
    }
}
