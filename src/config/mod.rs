//! Project configuration.
//!
//! A project is a directory with an optional `pogo.yaml` manifest and a
//! data directory holding the form code table. Without a manifest every
//! path falls back to its conventional default.

mod form_codes;
mod manifest;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use form_codes::FormCodeTable;
pub use manifest::{
    Manifest, DEFAULT_ASSET_BASE_URL, DEFAULT_DATASET_URL, FORM_CODES_FILENAME,
    MISSING_SPRITES_FILENAME, SPECIES_MAP_FILENAME,
};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "pogo.yaml";

/// A loaded project: its root and resolved manifest.
#[derive(Debug, Clone)]
pub struct Project {
    /// The project root directory.
    pub root: PathBuf,

    /// Manifest with all directories resolved against `root`.
    pub manifest: Manifest,

    /// Whether a pogo.yaml manifest was found.
    pub has_manifest: bool,
}

impl Project {
    /// Load the project rooted at `root`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        let manifest_path = root.join(MANIFEST_FILENAME);
        let (manifest, has_manifest) = if manifest_path.exists() {
            (Manifest::load(&manifest_path)?, true)
        } else {
            (Manifest::default(), false)
        };

        Ok(Self {
            manifest: manifest.resolve(&root),
            root,
            has_manifest,
        })
    }

    /// Load the form code table from the data directory.
    pub fn form_codes(&self) -> Result<FormCodeTable> {
        FormCodeTable::load(&self.manifest.form_codes_path())
    }
}
