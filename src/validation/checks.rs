//! Checks over a built or persisted mapping.
//!
//! Each check takes the mapping entries and returns a `ValidationResult`.

use crate::mapping::{find_duplicates, MappingEntry};

use super::diagnostic::{Diagnostic, ValidationResult};

pub const DUPLICATE_CLASS: &str = "pogo::mapping::duplicate-class";
pub const FALLBACK_FORM: &str = "pogo::mapping::fallback-form";
pub const EMPTY_CLASS: &str = "pogo::mapping::empty-class";
pub const SPRITE_FILENAME: &str = "pogo::mapping::sprite-filename";
pub const SORT_ORDER: &str = "pogo::mapping::sort-order";

/// One warning per class name occurrence after the first.
pub fn check_duplicate_class_names(entries: &[MappingEntry]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for dup in find_duplicates(entries) {
        result.push(
            Diagnostic::warning(
                DUPLICATE_CLASS,
                format!(
                    "Class name '{}' is reused by '{}'",
                    dup.class_name, dup.upstream_id
                ),
            )
            .with_help("Rename one of the upstream entries with an override"),
        );
    }

    result
}

/// Entries whose sprite code was synthesized from an unmapped form.
pub fn check_fallback_forms(entries: &[MappingEntry]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for entry in entries.iter().filter(|e| e.form_fallback) {
        result.push(
            Diagnostic::info(
                FALLBACK_FORM,
                format!("{} -> {} (unverified code)", entry.label(), entry.sprite_file),
            )
            .with_help(format!("Add \"{}\" to formMap in form-codes.json", entry.form)),
        );
    }

    result
}

/// Class names that normalized to nothing.
pub fn check_empty_class_names(entries: &[MappingEntry]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for entry in entries.iter().filter(|e| e.class_name.is_empty()) {
        result.push(Diagnostic::warning(
            EMPTY_CLASS,
            format!("'{}' ({}) has an empty class name", entry.label(), entry.upstream_id),
        ));
    }

    result
}

/// Sprite filenames must follow `pm{dex}[.suffix].icon.png` and the shiny
/// name must be the regular one with `.s` before `.icon.png`.
pub fn check_sprite_filenames(entries: &[MappingEntry]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for entry in entries {
        let regular_ok = entry
            .sprite_file
            .strip_suffix(".icon.png")
            .is_some_and(|stem| is_stem_for(stem, entry.dex));

        let expected_shiny = entry
            .sprite_file
            .strip_suffix(".icon.png")
            .map(|stem| format!("{stem}.s.icon.png"));

        if !regular_ok {
            result.push(Diagnostic::error(
                SPRITE_FILENAME,
                format!(
                    "'{}' sprite '{}' does not match dex {}",
                    entry.class_name, entry.sprite_file, entry.dex
                ),
            ));
        } else if expected_shiny.as_deref() != Some(entry.shiny_sprite_file.as_str()) {
            result.push(Diagnostic::error(
                SPRITE_FILENAME,
                format!(
                    "'{}' shiny sprite '{}' does not pair with '{}'",
                    entry.class_name, entry.shiny_sprite_file, entry.sprite_file
                ),
            ));
        }
    }

    result
}

fn is_stem_for(stem: &str, dex: u32) -> bool {
    let prefix = format!("pm{dex}");
    match stem.strip_prefix(&prefix) {
        Some("") => true,
        Some(rest) => rest.len() > 1 && rest.starts_with('.') && !rest.ends_with(".s"),
        None => false,
    }
}

/// Entries must be ordered by `(dex, form)`.
pub fn check_sort_order(entries: &[MappingEntry]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for pair in entries.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if (a.dex, a.form.as_str()) > (b.dex, b.form.as_str()) {
            result.push(
                Diagnostic::error(
                    SORT_ORDER,
                    format!("'{}' is listed before '{}'", a.class_name, b.class_name),
                )
                .with_help("Regenerate the mapping with `pogo-icons mapping`"),
            );
        }
    }

    result
}
