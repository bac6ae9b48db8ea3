//! Fronctocol Timing CLI
//!
//! Analyzes timing logs from the fronctocol runtime.
//! Produces per-timer and per-type statistics, raw traces and hierarchy graphs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use fronctocol_timing::commands::{
    display_version, execute_analyze, execute_graph, execute_trace, AnalyzeArgs, ExportArgs,
};

/// Fronctocol Timing - statistics for runtime timing logs
#[derive(Parser, Debug)]
#[command(name = "ff-timing")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute per-instance and per-type timing statistics
    Analyze {
        /// Timing log to analyze
        #[arg(short, long)]
        log: PathBuf,

        /// Directory for CSV outputs (defaults to the log's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output path for a JSON report
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Number of fronctocol types in the summary
        #[arg(long, default_value = "20")]
        summary_rows: usize,

        /// Exit with an error if the log has any violation
        #[arg(long)]
        strict: bool,
    },

    /// Replay the log in original order as a CSV table
    Trace {
        /// Timing log to replay
        #[arg(short, long)]
        log: PathBuf,

        /// Output directory (defaults to the log's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Exit with an error if the log has any violation
        #[arg(long)]
        strict: bool,
    },

    /// Write one Graphviz timer hierarchy per party
    Graph {
        /// Timing log to graph
        #[arg(short, long)]
        log: PathBuf,

        /// Output directory (defaults to the log's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Exit with an error if the log has any violation
        #[arg(long)]
        strict: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            log,
            output_dir,
            json,
            summary,
            summary_rows,
            strict,
        } => {
            let args = AnalyzeArgs {
                log_path: log,
                output_dir,
                output_json: json,
                print_summary: summary,
                summary_rows,
                strict,
            };

            execute_analyze(args)?;
        }

        Commands::Trace {
            log,
            output_dir,
            strict,
        } => {
            execute_trace(ExportArgs {
                log_path: log,
                output_dir,
                strict,
            })?;
        }

        Commands::Graph {
            log,
            output_dir,
            strict,
        } => {
            execute_graph(ExportArgs {
                log_path: log,
                output_dir,
                strict,
            })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
