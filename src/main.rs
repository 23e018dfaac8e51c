use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kbo_highlights::api::ApiServer;
use kbo_highlights::{Config, HighlightService, KeywordDictionary, YouTubeSource};

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("kbo_highlights=debug,tower_http=debug,warn")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("kbo_highlights=info,warn"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("KBO Highlights")
        .version(env!("CARGO_PKG_VERSION"))
        .about("KBO club video highlights: shorts and long-form, filtered and ranked")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to listen on (overrides config and PORT)")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let verbose = matches.get_flag("verbose");

    init_logging(verbose);

    let mut config = Config::load(config_path.as_deref())?;
    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }
    config.validate()?;

    info!("🚀 KBO Highlights starting...");
    info!("{}", config.summary());

    if config.youtube.api_key.is_none() {
        warn!("No YouTube API key configured (YT_API_KEY / YOUTUBE_API_KEY); every search will be empty");
    }

    let source = YouTubeSource::new(&config.youtube).context("Failed to build YouTube client")?;
    let mut service = HighlightService::from_config(&config, Arc::new(source));

    if let Some(path) = &config.pipeline.keywords_file {
        let dictionary = KeywordDictionary::from_file(path)
            .await
            .with_context(|| format!("Failed to load keyword file {}", path.display()))?;
        service = service.with_dictionary(dictionary);
    }

    let server = ApiServer::new(Arc::new(service), Arc::new(config));
    server.start().await
}
