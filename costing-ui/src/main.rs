use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use costing_core::CostingMethod;
use costing_ui::app::{self, ReportFormat, ServeOptions};
use costing_ui::logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Direct and absorption costing calculator.
///
/// Serves the costing endpoint over HTTP, or renders an income statement
/// from a CSV of line items.
#[derive(Debug, Parser)]
struct Cli {
    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP costing endpoint.
    Serve {
        /// TOML file with `host`, `port` and `log_level`.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overrides the configured host.
        #[arg(long)]
        host: Option<String>,

        /// Overrides the configured port.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print an income statement built from a CSV of line items.
    Report {
        /// CSV with `section,name,amount` columns.
        #[arg(long)]
        file: PathBuf,

        /// `directo` or `absorcion`.
        #[arg(long, default_value = "directo")]
        method: CostingMethod,

        /// Emit the statement as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Reports go to stdout, so keep the log quiet unless asked.
    let default_directive = match cli.command {
        Command::Serve { .. } => "info",
        Command::Report { .. } => "warn",
    };
    logging::init_logging(default_directive);

    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
        debug!(path = %path.display(), "file logging enabled");
    }

    match cli.command {
        Command::Serve { config, host, port } => {
            app::run_serve(ServeOptions { config, host, port }).await
        }
        Command::Report { file, method, json } => {
            let format = if json {
                ReportFormat::Json
            } else {
                ReportFormat::Text
            };
            let output = app::run_report(&file, method, format)?;
            println!("{output}");
            Ok(())
        }
    }
}
