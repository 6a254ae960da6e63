use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use service::{FileStore, FileType, StoreError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "store", version, about = "Locate, load and save single-instance store files")]
struct Cli {
    /// Path to config file (default: $CONFIG_PATH or config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage directory (overrides config and $STORE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Emit JSON structured logs on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the content of the store to stdout
    Load {
        #[arg(default_value = "storage")]
        file_type: FileType,
    },
    /// Save stdin (or --input) as the store, replacing every previous variant
    Save {
        #[arg(default_value = "storage")]
        file_type: FileType,
        /// Read content from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Delete every variant of the store
    Remove {
        #[arg(default_value = "storage")]
        file_type: FileType,
    },
    /// Print the path of the store
    Detect {
        #[arg(default_value = "storage")]
        file_type: FileType,
    },
}

fn init_logging(json: bool) {
    // .env may carry RUST_LOG, CONFIG_PATH, STORE_DATA_DIR
    dotenv().ok();
    if json {
        common::utils::logging::init_logging_json();
    } else {
        common::utils::logging::init_logging_default();
    }
    debug!(service = "store", event = "logger_init", "tracing subscriber initialized");
}

fn load_config(cli: &Cli) -> anyhow::Result<configs::AppConfig> {
    let mut cfg = match &cli.config {
        Some(path) => {
            let mut cfg = configs::load_from_file(path)?;
            cfg.normalize_and_validate()?;
            cfg
        }
        None => configs::AppConfig::load_and_validate()?,
    };
    if let Some(dir) = &cli.data_dir {
        cfg.storage.data_dir = dir.clone();
    }
    Ok(cfg)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = load_config(&cli).context("invalid configuration")?;
    match common::env::check_data_dir(&cfg.storage.data_dir).await {
        Ok(exists) => debug!(service = "store", data_dir = %cfg.storage.data_dir.display(), exists, "storage directory checked"),
        Err(e) => warn!(service = "store", error = %e, "storage directory check failed"),
    }
    let store = FileStore::from_config(&cfg.storage);

    match cli.command {
        Command::Load { file_type } => {
            let content = store.load(file_type).await?;
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&content).await?;
            stdout.flush().await?;
        }
        Command::Save { file_type, input } => {
            let content = match input {
                Some(path) => tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("cannot read {}", path.display()))?,
                None => {
                    let mut buf = Vec::new();
                    tokio::io::stdin().read_to_end(&mut buf).await?;
                    buf
                }
            };
            let path = store.save(file_type, &content).await?;
            println!("{}", path.display());
        }
        Command::Remove { file_type } => {
            let removed = store.remove(file_type).await?;
            println!("{removed}");
        }
        Command::Detect { file_type } => {
            let path = store.detect(file_type).await?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// Store errors keep their fixed codes; anything else exits with 1.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<StoreError>().map(StoreError::exit_code).unwrap_or(1)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let run_id = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "store", event = "panic", %run_id, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "store", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => {
            info!(service = "store", event = "done", %run_id, "command finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let code = exit_code_for(&e);
            debug!(service = "store", event = "failed", %run_id, code, error = ?e, "command failed");
            eprintln!("{e:#}");
            ExitCode::from(code)
        }
    }
}
