//! Validate command implementation.
//!
//! Re-runs the mapping checks against a persisted species map.

use std::path::PathBuf;

use clap::Args;

use crate::config::Project;
use crate::error::{PogoError, Result};
use crate::mapping::read_mapping;
use crate::output::{display_path, plural, Printer};
use crate::validation::{print_diagnostics, validate_mapping, Severity};

/// Diagnostics listed per code before truncating.
const DIAGNOSTIC_PREVIEW: usize = 20;

/// Check a persisted mapping without touching the network
#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// Mapping file (default: the project's species-map.json)
    #[arg(long)]
    pub mapping: Option<PathBuf>,
}

pub fn run(project: &Project, args: ValidateArgs, printer: &Printer) -> Result<()> {
    let path = args
        .mapping
        .unwrap_or_else(|| project.manifest.species_map_path());

    printer.status("Validating", &display_path(&path));
    let entries = read_mapping(&path)?;
    let result = validate_mapping(&entries);

    print_diagnostics(&result, printer, DIAGNOSTIC_PREVIEW);

    if result.has_errors() {
        return Err(PogoError::Build {
            message: format!(
                "{} has {}",
                display_path(&path),
                plural(result.count(Severity::Error), "error", "errors")
            ),
            help: Some("Regenerate it with `pogo-icons mapping`".to_string()),
        });
    }

    printer.success("Valid", &plural(entries.len(), "entry", "entries"));
    Ok(())
}
