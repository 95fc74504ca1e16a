use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use walrus_client::config::{DEFAULT_AGGREGATOR, DEFAULT_EXPLORER, DEFAULT_PUBLISHER};
use walrus_client::kv::FjallBackend;
use walrus_client::{BlobClient, Config, HistoryStore, ReqwestTransport};

#[derive(Debug, Parser)]
#[command(name = "walrus-client")]
#[command(about = "Store and read text blobs on Walrus")]
struct Cli {
    #[arg(long, env = "WALRUS_PUBLISHER", default_value = DEFAULT_PUBLISHER)]
    publisher: String,
    #[arg(long, env = "WALRUS_AGGREGATOR", default_value = DEFAULT_AGGREGATOR)]
    aggregator: String,
    #[arg(long, env = "WALRUS_EXPLORER", default_value = DEFAULT_EXPLORER)]
    explorer: String,
    /// Where the upload history is kept.
    #[arg(long, env = "WALRUS_DATA_DIR", default_value = ".walrus-client")]
    data_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Upload text, `-` reads it from stdin.
    Store {
        data: String,
        #[arg(long, default_value_t = 1)]
        epochs: u32,
    },
    /// Print the contents of a blob.
    Read { blob_id: String },
    /// List recent uploads, most recent first.
    History,
    /// Print the contents of a history entry's blob.
    Recall { index: usize },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = Config::default()
        .with_publisher(cli.publisher)
        .with_aggregator(cli.aggregator)
        .with_explorer(cli.explorer);

    let backend = FjallBackend::open(&cli.data_dir)
        .with_context(|| format!("failed to open history at {}", cli.data_dir.display()))?;
    let history = HistoryStore::new(backend)
        .with_key(&config.history_key)
        .with_capacity(config.history_capacity);
    let client = BlobClient::new(ReqwestTransport::default(), config);

    match cli.command {
        Commands::Store { data, epochs } => {
            let data = if data == "-" {
                let mut data = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut data)
                    .await
                    .context("failed to read data from stdin")?;
                data
            } else {
                data
            };

            let outcome = client
                .store(&history, &data, epochs)
                .await
                .context("failed to store blob")?;
            println!("{outcome}");
            println!("explorer: {}", outcome.explorer_url);
        }
        Commands::Read { blob_id } => {
            let contents = client
                .retrieve(&blob_id)
                .await
                .with_context(|| format!("failed to read blob {}", blob_id.trim()))?;
            print!("{contents}");
        }
        Commands::History => {
            let entries = history.load();
            if entries.is_empty() {
                println!("nothing stored yet");
            }
            for (index, entry) in entries.iter().enumerate() {
                let stored_at = DateTime::<Utc>::from_timestamp_millis(entry.timestamp)
                    .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default();
                println!(
                    "[{index}] {} (epoch {}) {stored_at}",
                    entry.blob_id, entry.end_epoch
                );
                println!("    {:?}", entry.preview);
            }
        }
        Commands::Recall { index } => {
            let (entry, contents) = client
                .retrieve_from_history(&history, index)
                .await
                .with_context(|| format!("failed to recall history entry {index}"))?;
            tracing::debug!(blob_id = %entry.blob_id, "recalled history entry");
            print!("{contents}");
        }
    }

    Ok(())
}
