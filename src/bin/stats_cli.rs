use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use pilgrim_stats::engine::powerbi::{DecodeOptions, decode_with};
use pilgrim_stats::engine::table::materialize_with;
use pilgrim_stats::frontend::context::build_service;
use pilgrim_stats::logging;
use pilgrim_stats::shared::config::CONFIG;

#[derive(Parser)]
#[command(name = "stats-cli")]
#[command(about = "Offline tools for the pilgrim statistics pipeline", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a saved report response and print its table as JSON records
    Decode {
        /// Path to the response JSON
        file: PathBuf,

        /// Dimension ids of the slice, e.g. d1,d5,d4
        #[arg(long, value_delimiter = ',', default_value = "d1")]
        dims: Vec<String>,

        /// Name of the measure column in the response
        #[arg(long, default_value = "M0")]
        measure: String,

        /// Replacement for line breaks inside text cells
        #[arg(long, default_value = " ")]
        newline: String,
    },
    /// Refresh every monthly table from the configured start year up to now
    Backfill,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Decode {
            file,
            dims,
            measure,
            newline,
        } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let response: serde_json::Value = serde_json::from_str(&raw)?;
            let options = DecodeOptions {
                newline_replacement: newline,
            };
            let decoded = decode_with(&response, &options)?;
            let table = materialize_with(&decoded.columns, decoded.rows, &dims, &measure)?;
            println!("{}", serde_json::to_string_pretty(&table.to_records())?);
            eprintln!("{} rows, {} pilgrims", table.len(), table.measure_total());
        }
        Command::Backfill => {
            logging::init()?;
            let service = build_service(&CONFIG).await?;
            let total = service.update_year_month(false).await?;
            println!("Backfill finished; last table total: {total}");
        }
    }

    Ok(())
}
