use clap::Parser;
use spider::runtime::engine::Crawler;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{info, warn};

/// Overall budget for one run, independent of per-request timeouts.
const CRAWL_DEADLINE: Duration = Duration::from_secs(180);

/// Walks a resource graph served over HTTP and prints every message it finds, sorted.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base address the paths are resolved against
    #[arg(default_value = "http://localhost:8080")]
    base_url: String,

    /// Path the traversal starts from
    #[arg(default_value = "/")]
    start_path: String,
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl-C, running without interrupt support");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for results
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    info!(base_url = %cli.base_url, start_path = %cli.start_path, "Starting spider");
    let crawler = Crawler::http(&cli.base_url)?;
    let messages = crawler
        .crawl_until(&cli.start_path, CRAWL_DEADLINE, ctrl_c())
        .await?;

    let mut out = io::stdout().lock();
    for message in &messages {
        writeln!(out, "{message}")?;
    }
    out.flush()?;

    Ok(())
}
