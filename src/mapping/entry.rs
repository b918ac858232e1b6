//! The canonical mapping entry and its persisted form.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PogoError, Result};

use super::record::Tag;

/// One species variant in the canonical mapping.
///
/// Downstream steps address sprites only through `sprite_file` and
/// `shiny_sprite_file`; filenames are never recomputed after the mapping
/// is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub name: String,
    pub form: String,
    pub dex: u32,
    pub class_name: String,
    pub upstream_id: String,
    pub sprite_file: String,
    pub shiny_sprite_file: String,
    pub tags: Vec<Tag>,

    /// The sprite code was synthesized from an unmapped form name.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub form_fallback: bool,
}

impl MappingEntry {
    /// Human-readable label, e.g. `Pikachu (Libre)`.
    pub fn label(&self) -> String {
        if self.form.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.form)
        }
    }

    pub fn is_base_form(&self) -> bool {
        self.form.is_empty()
    }
}

/// Write the mapping as pretty JSON.
pub fn write_mapping(path: &Path, entries: &[MappingEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries).map_err(|e| PogoError::Build {
        message: format!("Failed to serialize mapping: {}", e),
        help: None,
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PogoError::io(parent, "create directory", e))?;
    }

    std::fs::write(path, json).map_err(|e| PogoError::io(path, "write mapping", e))
}

/// Read a previously persisted mapping.
pub fn read_mapping(path: &Path) -> Result<Vec<MappingEntry>> {
    let content = std::fs::read_to_string(path).map_err(|e| PogoError::Config {
        message: format!("Failed to read mapping {}: {}", path.display(), e),
        help: Some("Run `pogo-icons mapping` first".to_string()),
    })?;

    serde_json::from_str(&content).map_err(|e| PogoError::Parse {
        message: format!("Invalid mapping {}: {}", path.display(), e),
        help: Some("Regenerate it with `pogo-icons mapping`".to_string()),
    })
}
