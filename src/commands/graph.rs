//! Graph command: one Graphviz hierarchy per party.

use super::models::ExportArgs;
use super::utils::{enforce_strict, output_dir_for, validate_log_path};
use crate::output::{dot_file_name, party_graph, write_text};
use crate::parser::read_log;
use anyhow::{Context, Result};
use log::info;

/// Execute the graph command
pub fn execute_graph(args: ExportArgs) -> Result<()> {
    validate_log_path(&args.log_path)?;

    let outcome = read_log(&args.log_path).context("Failed to parse timing log")?;
    let dir = output_dir_for(&args.log_path, args.output_dir.as_deref());

    for (party, measures) in &outcome.log.parties {
        let path = dir.join(dot_file_name(party));
        write_text(&party_graph(measures), &path)
            .with_context(|| format!("Failed to write graph for party {}", party))?;
    }
    info!("Wrote {} party graphs", outcome.log.parties.len());

    enforce_strict(&outcome.diagnostics, args.strict)
}
