mod common;

use common::{lg_source, video, MockSource, LG_CHANNEL};
use kbo_highlights::config::ConfigBuilder;
use kbo_highlights::{HighlightService, PipelineSettings, Rules};
use std::sync::Arc;
use std::time::Duration;

fn service(source: Arc<MockSource>, ttl_seconds: u64) -> HighlightService {
    let config = ConfigBuilder::new().with_cache_ttl(ttl_seconds).build();
    HighlightService::from_config(&config, source)
}

#[tokio::test]
async fn lg_end_to_end_keeps_only_the_official_short() {
    let source = Arc::new(lg_source());
    let service = service(source.clone(), 60);

    let result = service.search("LG", false).await;

    assert_eq!(result.shorts.len(), 1);
    assert_eq!(result.shorts[0].id, "lg1");
    assert_eq!(result.shorts[0].title, "LG 트윈스 하이라이트");
    assert!(result.longs.is_empty());
}

#[tokio::test]
async fn empty_club_makes_no_calls() {
    let source = Arc::new(lg_source());
    let service = service(source.clone(), 60);

    let result = service.search("   ", false).await;

    assert!(result.shorts.is_empty() && result.longs.is_empty());
    assert_eq!(source.total_calls(), 0);
}

#[tokio::test]
async fn missing_credential_yields_empty_result() {
    let mut source = lg_source();
    source.no_credential = true;
    let source = Arc::new(source);
    let service = service(source.clone(), 60);

    let result = service.search("LG", false).await;

    assert!(result.shorts.is_empty() && result.longs.is_empty());
    assert_eq!(source.total_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn cache_hit_skips_the_source_until_ttl_expires() {
    let source = Arc::new(lg_source());
    let service = service(source.clone(), 60);

    let first = service.search("LG", false).await;
    let calls_after_first = source.total_calls();
    assert!(calls_after_first > 0);

    tokio::time::advance(Duration::from_secs(30)).await;
    // Key and full name share one cache entry
    let second = service.search("LG 트윈스", false).await;
    assert_eq!(first, second);
    assert_eq!(source.total_calls(), calls_after_first);

    tokio::time::advance(Duration::from_secs(31)).await;
    service.search("LG", false).await;
    assert!(source.total_calls() > calls_after_first);
}

#[tokio::test]
async fn force_bypasses_the_cache() {
    let source = Arc::new(lg_source());
    let service = service(source.clone(), 60);

    service.search("LG", false).await;
    let calls = source.total_calls();

    service.search("LG", true).await;
    assert_eq!(source.total_calls(), calls * 2);
}

#[tokio::test]
async fn zero_ttl_always_fetches() {
    let source = Arc::new(lg_source());
    let service = service(source.clone(), 0);

    service.search("LG", false).await;
    let calls = source.total_calls();
    service.search("LG", false).await;
    assert_eq!(source.total_calls(), calls * 2);
    assert_eq!(service.cache_stats().await.total_entries, 0);
}

#[tokio::test]
async fn two_team_title_is_demoted_for_the_second_team() {
    let fan_video = video("g1", "KIA vs 삼성 경기 하이라이트", "야구팬", "UCfan", 500);
    let source = Arc::new(MockSource::default().with_search(vec![fan_video]));
    let service = service(source, 60);

    let for_samsung = service.search("삼성", false).await;
    let for_kia = service.search("KIA", false).await;

    assert!(for_samsung.longs.is_empty());
    assert_eq!(for_kia.longs.len(), 1);
}

#[tokio::test]
async fn disabled_ranking_drops_secondary_mentions_and_keeps_order() {
    let source = Arc::new(MockSource::default().with_search(vec![
        video("a", "프로야구 명장면", "팬", "UCx", 400),
        video("b", "KIA vs 삼성 경기 하이라이트", "팬", "UCx", 400),
        video("c", "삼성 라이온즈 승리", "팬", "UCx", 400),
    ]));
    let config = ConfigBuilder::new().enable_ranking(false).build();
    let service = HighlightService::new(
        source,
        Rules::default(),
        PipelineSettings::from_config(&config),
        Duration::from_secs(60),
    );

    let result = service.search("삼성", false).await;
    let ids: Vec<_> = result.longs.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[tokio::test]
async fn titles_are_cleaned_and_hashtag_shorts_classified_short() {
    let source = Arc::new(MockSource::default().with_channel(
        LG_CHANNEL,
        vec![video("s1", "| 끝내기 홈런 #shorts #LG -", "LGTWINSTV", LG_CHANNEL, 120)],
    ));
    let service = service(source, 60);

    let result = service.search("LG", false).await;
    assert_eq!(result.shorts.len(), 1);
    assert_eq!(result.shorts[0].title, "끝내기 홈런");
}

#[tokio::test]
async fn official_channel_override_json_is_used() {
    let source = Arc::new(MockSource::default().with_channel(
        "UCcustom",
        vec![video("o1", "전자제품 리뷰", "LG 트윈스 서브", "UCcustom", 600)],
    ));
    let config = ConfigBuilder::new()
        .with_official_channels_json(r#"{"LG": ["UCcustom"]}"#)
        .build();
    let service = HighlightService::from_config(&config, source.clone());

    let result = service.search("LG", false).await;
    assert_eq!(result.longs.len(), 1);
    assert_eq!(source.channel_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}
