use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use shimmer::domain::entities::SourceSet;
use shimmer::infrastructure::{AppConfig, CliArgs, HttpImageFetcher};
use shimmer::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn create_app() -> Result<App> {
    let args = CliArgs::parse();

    let sources = SourceSet::new(args.source.clone(), args.fallback.clone())
        .ok_or_else(|| eyre!("the primary source must be a non-empty URL or file path"))?;
    let alt = args.alt.clone().unwrap_or_default();

    let mut config = AppConfig::load(args.config.as_deref());
    config.merge_with_args(args);

    init_logging(&config)?;

    info!(version = shimmer::VERSION, "Starting shimmer");

    let fetcher = Arc::new(HttpImageFetcher::new(
        config.loader.timeout(),
        config.loader.max_image_width,
    )?);

    Ok(App::new(config, sources, alt, fetcher))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
