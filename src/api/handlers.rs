//! API request handlers

use anyhow::Result;
use askama::Template;
use serde_json::Value;
use tracing::info;

use super::models::{SearchRequest, SearchResponse, ServiceStatus};
use crate::pipeline::HighlightService;
use crate::teams::{Team, TeamRegistry};

/// Handle highlight search requests
pub async fn search(service: &HighlightService, request: &SearchRequest) -> SearchResponse {
    if request.club.is_empty() {
        return SearchResponse::default();
    }

    info!("🔍 Search request for '{}' (force: {})", request.club, request.force);
    service.search(&request.club, request.force).await.into()
}

/// Handle status requests
pub async fn service_status(service: &HighlightService) -> Result<Value> {
    let status = ServiceStatus {
        service: "kbo-highlights",
        version: env!("CARGO_PKG_VERSION"),
        credential_configured: service.has_credential(),
        teams: service.teams().all().len(),
        cache: service.cache_stats().await,
        keywords: service.rules().dictionary.get_stats(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    Ok(serde_json::to_value(status)?)
}

/// The club page: every configured team, one of them pre-selected
#[derive(Template)]
#[template(path = "club.html")]
pub struct ClubPage<'a> {
    pub team_name: String,
    pub teams: &'a [Team],
}

/// Render the club page, pre-selecting `team` (or the first team when none
/// is given)
pub fn render_club_page(teams: &TeamRegistry, team: Option<&str>) -> askama::Result<String> {
    let requested = team.map(str::trim).filter(|t| !t.is_empty());
    let team_name = match requested {
        Some(team) => teams.display_name(team),
        None => teams.first().map(|t| t.name.clone()).unwrap_or_default(),
    };

    ClubPage {
        team_name,
        teams: teams.all(),
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lists_all_teams() {
        let teams = TeamRegistry::kbo();
        let html = render_club_page(&teams, None).unwrap();

        for team in teams.all() {
            assert!(html.contains(&team.name), "missing {}", team.name);
        }
        assert!(html.contains(r#"<option value="LG" selected>LG 트윈스</option>"#));
    }

    #[test]
    fn test_page_selects_requested_team() {
        let teams = TeamRegistry::kbo();
        let html = render_club_page(&teams, Some("두산")).unwrap();
        assert!(html.contains(r#"<option value="두산" selected>두산 베어스</option>"#));
        assert!(html.contains("<title>두산 베어스 하이라이트</title>"));
    }

    #[test]
    fn test_page_escapes_names() {
        let teams = TeamRegistry::new(vec![Team::new("<x>", "<script>\"팀\"</script>")]);
        let html = render_club_page(&teams, Some("<b>")).unwrap();

        assert!(!html.contains("<script>\"팀\""));
        assert!(html.contains("&lt;script&gt;&quot;팀&quot;"));
        assert!(html.contains(r#"<option value="&lt;x&gt;">"#));
        assert!(html.contains("<title>&lt;b&gt; 하이라이트</title>"));
    }

    #[test]
    fn test_page_renders_template_syntax_literally() {
        let teams = TeamRegistry::kbo();
        let html = render_club_page(&teams, Some("{{TEAM_OPTIONS}}")).unwrap();

        assert!(html.contains("<title>{{TEAM_OPTIONS}} 하이라이트</title>"));
        assert!(html.contains(r#"<h1 id="title">{{TEAM_OPTIONS}} 하이라이트</h1>"#));
        assert_eq!(html.matches("<option ").count(), 10);
        assert!(!html.contains(" selected>"));
    }
}
