//! Form code table (form-codes.json).
//!
//! Maps free-text form names to PokeMiners short codes, and records the
//! form each species shows by default.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PogoError, Result};

/// Lookup tables consumed by the form resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCodeTable {
    /// Form name to short code. A `null` value means the form uses the
    /// unsuffixed asset.
    #[serde(default)]
    pub form_map: BTreeMap<String, Option<String>>,

    /// Dex number (as text) to the form name that needs no suffix.
    #[serde(default)]
    pub default_forms: BTreeMap<String, String>,
}

impl FormCodeTable {
    /// Load the table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PogoError::Config {
            message: format!("Failed to read form codes {}: {}", path.display(), e),
            help: Some("Run `pogo-icons init` to create a starter form-codes.json".to_string()),
        })?;

        Self::parse(&content)
    }

    /// Parse the table from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| PogoError::Config {
            message: format!("Invalid form codes: {}", e),
            help: Some("Expected { \"formMap\": {...}, \"defaultForms\": {...} }".to_string()),
        })
    }

    /// The implicit default form for a dex number, if any.
    pub fn default_form(&self, dex: u32) -> Option<&str> {
        self.default_forms.get(&dex.to_string()).map(String::as_str)
    }

    /// Explicit mapping for a form name. `Some(None)` is an explicit
    /// "no suffix" entry; `None` means the form is not mapped at all.
    pub fn lookup(&self, form: &str) -> Option<Option<&str>> {
        self.form_map.get(form).map(Option::as_deref)
    }
}
