// ABOUTME: CLI entry point for stockbook-backup
// ABOUTME: Parses commands and routes to appropriate handlers

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use stockbook_backup::cancel::CancelToken;
use stockbook_backup::commands;
use stockbook_backup::progress::BarReporter;

#[derive(Parser)]
#[command(name = "stockbook-backup")]
#[command(about = "Snapshot backup and restore for the Stockbook inventory database", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a full snapshot of the database to a backup directory
    Backup {
        /// Path to the Stockbook database file
        #[arg(long)]
        database: PathBuf,
        /// Directory that receives database_backup_<timestamp>.sql
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Replay a snapshot script against the database (destructive)
    Restore {
        /// Path to the Stockbook database file
        #[arg(long)]
        database: PathBuf,
        /// Dump file to replay
        #[arg(long)]
        file: PathBuf,
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// List tables and row counts
    Tables {
        /// Path to the Stockbook database file
        #[arg(long)]
        database: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - default to INFO level if RUST_LOG not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Ctrl-C requests a cooperative stop; in-flight work finishes first
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("⚠ Cancellation requested, finishing current step...");
                cancel.cancel();
            }
        });
    }

    match cli.command {
        Commands::Backup {
            database,
            output_dir,
        } => {
            let bar = Arc::new(BarReporter::new("dumping tables"));
            let result = commands::backup(&database, &output_dir, bar.clone(), cancel).await;
            match &result {
                Ok(report) if report.summary.cancelled => bar.abandon("stopped early"),
                Ok(_) => bar.finish("done"),
                Err(_) => bar.abandon("failed"),
            }
            let report = result?;
            println!("{}", report.path.display());
            Ok(())
        }
        Commands::Restore {
            database,
            file,
            yes,
        } => {
            let bar = Arc::new(BarReporter::new("replaying statements"));
            let result = commands::restore(&database, &file, yes, bar.clone(), cancel).await;
            match &result {
                Ok(outcome) if outcome.cancelled => bar.abandon("stopped early"),
                Ok(_) => bar.finish("done"),
                Err(_) => bar.abandon("failed"),
            }
            let outcome = result?;
            // Scripted callers need the exit code to tell a partial replay
            // from a full restore; the summary above already lists details
            if outcome.failed_count() > 0 {
                anyhow::bail!(
                    "{} statement(s) failed during restore; the database reflects a partial replay",
                    outcome.failed_count()
                );
            }
            Ok(())
        }
        Commands::Tables { database } => commands::tables(&database).await,
    }
}
