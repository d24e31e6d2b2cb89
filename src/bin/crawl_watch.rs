//! Trigger a crawl and follow it to completion.
//!
//! Logs in with the admin password, triggers the crawl job, polls the status
//! endpoint until the crawl finishes and then refreshes the public feed.

use anyhow::{Context, Result};
use clap::Parser;
use dappang::client::crawl_api::FeedRefresher;
use dappang::client::{CrawlPoller, HttpCrawlApi, PollerError, PollerState};
use dappang::utils::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "crawl-watch")]
#[command(about = "Trigger a crawl and wait until it finishes")]
struct Cli {
    /// Dashboard base URL
    #[arg(long, env = "DAPPANG_URL", default_value = "http://localhost:3000")]
    base_url: String,

    /// Admin password
    #[arg(long, env = "DAPPANG_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Status poll period in seconds
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    interval_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry("info,dappang=info");
    let cli = Cli::parse();

    let api = Arc::new(
        HttpCrawlApi::new(&cli.base_url, Duration::from_secs(cli.timeout_secs))
            .context("Failed to build HTTP client")?,
    );
    api.login(&cli.password).await.context("Login failed")?;

    let refresher = Arc::new(FeedRefresher::new(api.clone()));
    let poller = CrawlPoller::with_interval(
        api,
        refresher,
        Duration::from_secs(cli.interval_secs),
    );

    match poller.trigger().await {
        Ok(()) => info!("Crawl started, polling every {}s", cli.interval_secs),
        Err(PollerError::AlreadyRunning) => {
            warn!("A crawl is already running; nothing to do");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to trigger crawl"),
    }

    let mut state = poller.subscribe();
    tokio::select! {
        res = state.wait_for(|s| *s == PollerState::Idle) => {
            res.context("Poller state channel closed")?;
            info!("Crawl finished");
        }
        _ = tokio::signal::ctrl_c() => {
            poller.stop();
            warn!("Interrupted; polling stopped");
        }
    }

    Ok(())
}
