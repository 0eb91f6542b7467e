use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};

use package_indexer::config::{CREDENTIAL_ENV, Credential, IndexerConfig, log_path};
use package_indexer::descriptor::{load_index, write_index};
use package_indexer::index::Aggregator;
use package_indexer::logging::{self, LogFormat};

#[derive(Parser)]
#[command(name = "package-indexer")]
#[command(version, about = "Build an enriched package index from descriptor files")]
struct Cli {
    /// Directory holding one descriptor directory per package
    #[arg(long, default_value = "./index")]
    index_dir: PathBuf,

    /// Where to write the aggregated index
    #[arg(short, long, default_value = "./dist/index.json")]
    output: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of packages enriched at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Provider token (defaults to $GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Only aggregate descriptors, without contacting any remote
    #[arg(long)]
    no_enrich: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write logs to the default log file
    #[arg(long, conflicts_with = "log_file")]
    log_to_file: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| cli.log_to_file.then(log_path));
    let _guard = logging::init(cli.log_format, log_file.as_deref())?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = IndexerConfig::load(cli.config.as_deref())
        .inspect_err(|e| error!("Failed to load config: {}", e))?;
    if let Some(concurrency) = cli.concurrency {
        config.fetch.concurrency = concurrency;
        config = config.validated()?;
    }

    let loaded = load_index(&cli.index_dir)
        .inspect_err(|e| error!("Failed to load descriptors from {:?}: {}", cli.index_dir, e))
        .with_context(|| format!("failed to load descriptors from {:?}", cli.index_dir))?;
    info!(
        "Loaded {} descriptors ({} rejected)",
        loaded.records.len(),
        loaded.rejected.len()
    );

    let records = if cli.no_enrich {
        loaded.records
    } else {
        let credential = cli
            .token
            .map(Credential::new)
            .unwrap_or_else(Credential::from_env);
        if credential.is_empty() {
            warn!(
                "{} is not set; provider requests are unauthenticated",
                CREDENTIAL_ENV
            );
        }

        let aggregator = Aggregator::from_config(&config, credential)?;

        let (cancel_tx, cancel_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, abandoning unfinished packages");
                let _ = cancel_tx.send(true);
            }
        });

        let report = aggregator
            .aggregate_with_cancel(loaded.records, cancel_rx)
            .await;
        if !report.diagnostics.is_empty() {
            warn!(
                "{} packages were left unenriched",
                report.diagnostics.len()
            );
        }
        report.records
    };

    write_index(&cli.output, &records)
        .inspect_err(|e| error!("Failed to write index to {:?}: {}", cli.output, e))?;
    Ok(())
}
