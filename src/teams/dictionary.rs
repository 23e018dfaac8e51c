use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Keyword categories used by the relevance filter and classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// League, position and game-action terms
    BaseballSignals,
    /// Title markers that force short-form classification
    ShortMarkers,
    /// Broadcaster / league channel names treated as neutral
    NeutralChannels,
}

/// Keyword tables for title relevance
#[derive(Debug, Clone)]
pub struct KeywordDictionary {
    /// Terms organized by category
    terms: HashMap<KeywordCategory, Vec<String>>,

    /// Per-team deny-lists (team key -> non-baseball senses of the name)
    deny: HashMap<String, Vec<String>>,
}

/// On-disk extension of the built-in tables
#[derive(Debug, Default, Deserialize)]
struct KeywordFile {
    #[serde(default)]
    baseball_signals: Vec<String>,
    #[serde(default)]
    short_markers: Vec<String>,
    #[serde(default)]
    neutral_channels: Vec<String>,
    #[serde(default)]
    deny: HashMap<String, Vec<String>>,
}

/// Dictionary statistics
#[derive(Debug, Clone, Serialize)]
pub struct DictionaryStats {
    pub total_terms: usize,
    pub teams_with_deny_lists: usize,
    pub total_deny_terms: usize,
    pub category_counts: HashMap<KeywordCategory, usize>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl KeywordDictionary {
    /// Create a dictionary with the built-in KBO tables
    pub fn new() -> Self {
        let mut dictionary = Self {
            terms: HashMap::new(),
            deny: HashMap::new(),
        };

        dictionary.load_default_terms();
        dictionary.load_default_deny_lists();
        dictionary
    }

    /// Empty dictionary, mostly for tests
    pub fn empty() -> Self {
        Self {
            terms: HashMap::new(),
            deny: HashMap::new(),
        }
    }

    /// Built-in tables extended with the entries of a TOML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        let mut dictionary = Self::new();
        dictionary.merge_toml(&content)?;
        info!("📚 Loaded keyword tables from: {}", path.as_ref().display());
        Ok(dictionary)
    }

    /// Merge a TOML keyword file into this dictionary
    pub fn merge_toml(&mut self, content: &str) -> Result<()> {
        let file: KeywordFile = toml::from_str(content)?;

        for term in file.baseball_signals {
            self.add_term(KeywordCategory::BaseballSignals, term);
        }
        for term in file.short_markers {
            self.add_term(KeywordCategory::ShortMarkers, term);
        }
        for term in file.neutral_channels {
            self.add_term(KeywordCategory::NeutralChannels, term);
        }
        for (team_key, terms) in file.deny {
            for term in terms {
                self.add_deny_term(&team_key, term);
            }
        }
        Ok(())
    }

    /// Get terms for a specific category
    pub fn get_terms(&self, category: KeywordCategory) -> &[String] {
        self.terms.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Deny-list for a team key (empty when the team has none)
    pub fn deny_terms(&self, team_key: &str) -> &[String] {
        self.deny.get(team_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Add a term to a category
    pub fn add_term(&mut self, category: KeywordCategory, term: String) {
        self.terms.entry(category).or_default().push(term);
    }

    pub fn add_deny_term(&mut self, team_key: &str, term: String) {
        self.deny.entry(team_key.to_string()).or_default().push(term);
    }

    /// First category term contained in `lowered` (already lower-cased)
    pub fn find_in(&self, category: KeywordCategory, lowered: &str) -> Option<&str> {
        self.get_terms(category)
            .iter()
            .find(|term| lowered.contains(&term.to_lowercase()))
            .map(String::as_str)
    }

    /// First deny-list term of the team contained in `lowered`
    pub fn find_denied(&self, team_key: &str, lowered: &str) -> Option<&str> {
        self.deny_terms(team_key)
            .iter()
            .find(|term| lowered.contains(&term.to_lowercase()))
            .map(String::as_str)
    }

    /// Whether a channel name belongs to a league or broadcaster channel
    pub fn is_neutral_channel(&self, channel: Option<&str>) -> bool {
        channel
            .map(|name| self.find_in(KeywordCategory::NeutralChannels, &name.to_lowercase()).is_some())
            .unwrap_or(false)
    }

    fn load_default_terms(&mut self) {
        // League, position and game-action terms, plus the club nicknames
        let signals = owned(&[
            "KBO", "프로야구", "야구", "하이라이트", "경기", "1군", "2군", "퓨처스", "중계",
            "리그", "스포츠", "포스트시즌", "한국시리즈", "와일드카드", "플레이오프", "올스타",
            "투수", "타자", "포수", "내야수", "외야수", "선발", "불펜", "마무리", "홈런",
            "안타", "타점", "삼진", "도루", "볼넷", "끝내기", "호수비", "세이브", "등판",
            "타이거즈", "트윈스", "베어스", "위즈", "자이언츠", "다이노스", "라이온즈",
            "히어로즈", "랜더스", "이글스",
        ]);

        let short_markers = owned(&["#shorts", "shorts", "쇼츠", "숏츠"]);

        let neutral_channels = owned(&[
            "KBO", "SPOTV", "티빙", "TVING", "MBC SPORTS", "KBS N SPORTS", "SBS Sports",
        ]);

        self.terms.insert(KeywordCategory::BaseballSignals, signals);
        self.terms.insert(KeywordCategory::ShortMarkers, short_markers);
        self.terms.insert(KeywordCategory::NeutralChannels, neutral_channels);
    }

    /// Non-baseball senses of each club's brand (affiliates, other sports)
    fn load_default_deny_lists(&mut self) {
        let deny: Vec<(&str, Vec<&str>)> = vec![
            ("LG", vec![
                "전자", "에너지솔루션", "엔솔", "디스플레이", "u+", "유플러스", "생활건강",
                "하우시스", "이노텍", "헬로비전", "그룹", "기업분석", "그램", "oled",
                "세이커스",
            ]),
            ("삼성", vec![
                "삼성전자", "갤럭시", "반도체", "삼성생명", "삼성화재", "삼성증권", "썬더스",
                "블루윙즈", "블루팡스",
            ]),
            ("KT", vec!["소닉붐", "요금제", "인터넷", "5g", "통신", "아레나"]),
            ("SSG", vec!["닷컴", "ssg.com", "쇼핑", "이마트"]),
            ("롯데", vec!["롯데월드", "롯데마트", "백화점", "시네마", "면세점", "제과", "칠성", "타워"]),
            ("한화", vec!["한화생명", "솔루션", "에어로스페이스", "오션", "방산", "불꽃축제"]),
            ("KIA", vec!["자동차", "쏘렌토", "카니발", "스포티지", "신차", "시승", "ev3", "ev6", "ev9"]),
            ("두산", vec!["에너빌리티", "밥캣", "중공업", "로보틱스"]),
            ("키움", vec!["키움증권", "주가", "영웅문", "종목"]),
            ("NC", vec!["엔씨소프트", "리니지", "아이온", "블레이드앤소울"]),
        ];

        for (team_key, terms) in deny {
            self.deny.insert(team_key.to_string(), owned(&terms));
        }
    }

    /// Get dictionary statistics
    pub fn get_stats(&self) -> DictionaryStats {
        let category_counts = self
            .terms
            .iter()
            .map(|(category, terms)| (*category, terms.len()))
            .collect::<HashMap<_, _>>();

        DictionaryStats {
            total_terms: category_counts.values().sum(),
            teams_with_deny_lists: self.deny.values().filter(|t| !t.is_empty()).count(),
            total_deny_terms: self.deny.values().map(Vec::len).sum(),
            category_counts,
        }
    }
}

impl Default for KeywordDictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let dict = KeywordDictionary::new();
        let stats = dict.get_stats();

        assert!(stats.total_terms > 0);
        assert_eq!(stats.teams_with_deny_lists, 10);
        assert!(dict.deny_terms("LG").iter().any(|t| t == "전자"));
        assert!(dict.deny_terms("없는팀").is_empty());
    }

    #[test]
    fn test_find_is_case_insensitive_substring() {
        let dict = KeywordDictionary::new();
        let lowered = "lg oled tv 리뷰".to_lowercase();
        assert_eq!(dict.find_denied("LG", &lowered), Some("oled"));
        assert_eq!(
            dict.find_in(KeywordCategory::BaseballSignals, "오늘의 kbo 소식"),
            Some("KBO")
        );
    }

    #[test]
    fn test_neutral_channels() {
        let dict = KeywordDictionary::new();
        assert!(dict.is_neutral_channel(Some("SPOTV")));
        assert!(dict.is_neutral_channel(Some("KBO 공식")));
        assert!(!dict.is_neutral_channel(Some("야구팬 채널")));
        assert!(!dict.is_neutral_channel(None));
    }

    #[test]
    fn test_merge_toml() {
        let mut dict = KeywordDictionary::new();
        dict.merge_toml(
            r#"
            baseball_signals = ["더그아웃"]
            neutral_channels = ["스포츠타임"]

            [deny]
            "두산" = ["두산타워"]
            "#,
        )
        .unwrap();

        assert_eq!(
            dict.find_in(KeywordCategory::BaseballSignals, "더그아웃 토크"),
            Some("더그아웃")
        );
        assert!(dict.is_neutral_channel(Some("스포츠타임")));
        assert_eq!(dict.find_denied("두산", "두산타워 야경"), Some("두산타워"));
    }

    #[test]
    fn test_merge_rejects_bad_toml() {
        let mut dict = KeywordDictionary::new();
        assert!(dict.merge_toml("baseball_signals = 3").is_err());
    }
}
