//! apod-post - Republish a random NASA APOD to Bluesky
//!
//! Single-run batch job: pick a random image-type APOD record, then post it
//! to Bluesky with image, caption, and hashtags. Meant to be invoked by an
//! external scheduler such as cron.

use std::path::PathBuf;

use clap::Parser;
use libapodcast::apod::nasa::NasaApodClient;
use libapodcast::logging::{self, LogFormat, LoggingConfig};
use libapodcast::platforms::bluesky::BlueskyClient;
use libapodcast::platforms::Platform;
use libapodcast::{apod, publisher, Config, Result};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "apod-post")]
#[command(about = "Republish a random NASA APOD to Bluesky", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to the XDG config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch and compose the post without publishing it
    #[arg(long)]
    dry_run: bool,

    /// Exit nonzero on failure instead of logging and exiting 0
    #[arg(long)]
    strict_exit: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        LoggingConfig::new(LogFormat::Text, "debug".to_string(), true).init();
    } else {
        logging::init_default();
    }

    let strict_exit = cli.strict_exit;
    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        if strict_exit {
            std::process::exit(e.exit_code());
        }
        // Failures are logged and swallowed; without --strict-exit the
        // process still exits 0.
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from_path(path)?;
            config.apply_env_overrides();
            config
        }
        None => Config::load()?,
    };

    let source = NasaApodClient::new(&config.nasa)?;
    let record = apod::fetch_random_record(&source, &config.fetcher).await?;
    info!("Fetched APOD: {} ({})", record.title, record.image_date);

    if cli.dry_run {
        println!(
            "{}",
            publisher::compose_post_text(&record.title, record.image_date)
        );
        return Ok(());
    }

    let mut platform = BlueskyClient::new(&config.bluesky).await?;
    if !platform.is_configured() {
        warn!("Bluesky credentials are empty; login will be attempted anyway");
    }

    let post_id = publisher::publish(&source, &mut platform, &record).await?;
    println!("{}", post_id);
    Ok(())
}
