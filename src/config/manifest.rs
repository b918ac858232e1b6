//! Project manifest (pogo.yaml) parsing.
//!
//! The manifest defines where pipeline artifacts live, which upstream
//! sources to pull from, and the batch sizes used by the bulk steps.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PogoError, Result};

/// PvPoke gamemaster species list.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/pvpoke/pvpoke/master/src/data/gamemaster/pokemon.json";

/// PokeMiners 256x256 addressable sprite assets.
pub const DEFAULT_ASSET_BASE_URL: &str = "https://raw.githubusercontent.com/PokeMiners/pogo_assets/master/Images/Pokemon%20-%20256x256/Addressable%20Assets";

/// Canonical mapping artifact name inside the data directory.
pub const SPECIES_MAP_FILENAME: &str = "species-map.json";

/// Missing-assets artifact name inside the data directory.
pub const MISSING_SPRITES_FILENAME: &str = "missing-sprites.json";

/// Form code table name inside the data directory.
pub const FORM_CODES_FILENAME: &str = "form-codes.json";

/// Project manifest loaded from pogo.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory holding form codes, the species map, and the missing list.
    pub data: PathBuf,

    /// Root for raw downloaded sprites.
    pub sprites: PathBuf,

    /// Distribution root for optimized sprites and stylesheets.
    pub output: PathBuf,

    /// Directory of hand-written stylesheet fragments.
    pub styles: PathBuf,

    /// Theme segment used in sprite paths.
    pub theme: String,

    /// Upstream species dataset location.
    pub dataset_url: String,

    /// Remote sprite root; filenames are appended to it.
    pub asset_base_url: String,

    /// Downloads per fetch batch.
    pub concurrency: usize,

    /// Files per optimize batch.
    pub batch_size: usize,

    /// Version string written into the stylesheet header.
    pub version: String,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            data: PathBuf::from("data"),
            sprites: PathBuf::from("sprites"),
            output: PathBuf::from("dist"),
            styles: PathBuf::from("styles"),
            theme: "go".to_string(),
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            concurrency: 10,
            batch_size: 20,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Manifest {
    /// Load manifest from a pogo.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PogoError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document instead of defaulting it
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let manifest: Manifest = serde_yaml::from_str(content).map_err(|e| PogoError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check pogo.yaml syntax".to_string()),
        })?;

        if manifest.concurrency == 0 || manifest.batch_size == 0 {
            return Err(PogoError::Config {
                message: "concurrency and batch_size must be at least 1".to_string(),
                help: Some("Remove the keys from pogo.yaml to use the defaults".to_string()),
            });
        }

        Ok(manifest)
    }

    /// Make every relative directory absolute against the project root.
    pub fn resolve(mut self, root: &Path) -> Self {
        for dir in [
            &mut self.data,
            &mut self.sprites,
            &mut self.output,
            &mut self.styles,
        ] {
            if dir.is_relative() {
                *dir = root.join(&*dir);
            }
        }
        self
    }

    pub fn species_map_path(&self) -> PathBuf {
        self.data.join(SPECIES_MAP_FILENAME)
    }

    pub fn missing_sprites_path(&self) -> PathBuf {
        self.data.join(MISSING_SPRITES_FILENAME)
    }

    pub fn form_codes_path(&self) -> PathBuf {
        self.data.join(FORM_CODES_FILENAME)
    }

    /// Raw sprite directory for the configured theme.
    pub fn raw_sprites_dir(&self) -> PathBuf {
        self.sprites.join(&self.theme)
    }

    /// Optimized sprite directory for the configured theme.
    pub fn dist_sprites_dir(&self) -> PathBuf {
        self.output.join("sprites").join(&self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("output: build").unwrap();

        assert_eq!(manifest.output, PathBuf::from("build"));
        assert_eq!(manifest.data, PathBuf::from("data"));
        assert_eq!(manifest.concurrency, 10);
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
data: cache/data
sprites: cache/sprites
output: public
styles: css
theme: home
dataset_url: https://example.com/pokemon.json
asset_base_url: https://example.com/assets
concurrency: 4
batch_size: 8
version: 2.1.0
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.data, PathBuf::from("cache/data"));
        assert_eq!(manifest.sprites, PathBuf::from("cache/sprites"));
        assert_eq!(manifest.output, PathBuf::from("public"));
        assert_eq!(manifest.styles, PathBuf::from("css"));
        assert_eq!(manifest.theme, "home");
        assert_eq!(manifest.dataset_url, "https://example.com/pokemon.json");
        assert_eq!(manifest.asset_base_url, "https://example.com/assets");
        assert_eq!(manifest.concurrency, 4);
        assert_eq!(manifest.batch_size, 8);
        assert_eq!(manifest.version, "2.1.0");
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_parse_invalid_manifest() {
        let result = Manifest::parse("concurrency: [not, a, number]");
        assert!(matches!(result, Err(PogoError::Parse { .. })));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = Manifest::parse("concurrency: 0");
        assert!(matches!(result, Err(PogoError::Config { .. })));
    }

    #[test]
    fn test_resolve_relative_paths() {
        let manifest = Manifest {
            output: PathBuf::from("/abs/dist"),
            ..Default::default()
        }
        .resolve(Path::new("/project"));

        assert_eq!(manifest.data, PathBuf::from("/project/data"));
        assert_eq!(manifest.output, PathBuf::from("/abs/dist"));
        assert_eq!(
            manifest.species_map_path(),
            PathBuf::from("/project/data/species-map.json")
        );
        assert_eq!(
            manifest.dist_sprites_dir(),
            PathBuf::from("/abs/dist/sprites/go")
        );
        assert_eq!(
            manifest.raw_sprites_dir(),
            PathBuf::from("/project/sprites/go")
        );
    }
}
