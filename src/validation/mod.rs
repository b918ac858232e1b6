//! Data-quality checks for the species mapping.
//!
//! Runs after every mapping build and from `pogo-icons validate` against a
//! persisted mapping. Duplicate class names and fallback forms are
//! warnings for the operator; broken filenames or ordering are errors.

mod checks;
mod diagnostic;

pub use checks::{DUPLICATE_CLASS, EMPTY_CLASS, FALLBACK_FORM, SORT_ORDER, SPRITE_FILENAME};
pub use diagnostic::{Diagnostic, Severity, ValidationResult};

use crate::mapping::MappingEntry;
use crate::output::Printer;

/// Run all checks against the mapping.
pub fn validate_mapping(entries: &[MappingEntry]) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_sort_order(entries));
    result.merge(checks::check_sprite_filenames(entries));
    result.merge(checks::check_empty_class_names(entries));
    result.merge(checks::check_duplicate_class_names(entries));
    result.merge(checks::check_fallback_forms(entries));

    result
}

/// Print diagnostics, at most `limit` per code, followed by a summary.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer, limit: usize) {
    let mut codes: Vec<&str> = result.iter().map(|d| d.code).collect();
    codes.dedup();

    for code in codes {
        let group: Vec<&Diagnostic> = result.with_code(code).collect();

        for d in group.iter().take(limit) {
            let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
            eprintln!("  {}[{}]: {}", label, d.code, d.message);
            if let Some(help) = &d.help {
                eprintln!("    {}", printer.dim(&format!("help: {}", help)));
            }
        }

        if group.len() > limit {
            eprintln!("  ... and {} more", group.len() - limit);
        }
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);

    if errors > 0 {
        printer.error(
            "Invalid",
            &format!("{} error(s), {} warning(s)", errors, warnings),
        );
    } else if warnings > 0 {
        printer.warning("Checked", &format!("{} warning(s)", warnings));
    }
}
