//! Stylesheet assembly.
//!
//! Combines the hand-written fragments with one rule per mapping entry and
//! one alias rule per dex number. Class names and the `--pogo-sprite*`
//! custom properties are what pages link against, so their shape must not
//! change between builds.

mod minify;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{PogoError, Result};
use crate::mapping::MappingEntry;

pub use minify::minify_css;

/// Class prefix for every generated rule.
pub const CLASS_PREFIX: &str = "pogo-";

/// Expanded stylesheet file name.
pub const CSS_FILENAME: &str = "pogo-icons.css";

/// Minified stylesheet file name.
pub const MIN_CSS_FILENAME: &str = "pogo-icons.min.css";

/// Hand-written stylesheet fragments, included verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    pub base: String,
    pub sizes: String,
    pub effects: String,
}

impl Fragments {
    pub const FILES: [&'static str; 3] = ["base.css", "sizes.css", "effects.css"];

    /// Load `base.css`, `sizes.css`, and `effects.css` from a directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|e| PogoError::Config {
                message: format!("Failed to read style fragment {}: {}", path.display(), e),
                help: Some("Run `pogo-icons init` to create empty fragments".to_string()),
            })
        };

        Ok(Self {
            base: read("base.css")?,
            sizes: read("sizes.css")?,
            effects: read("effects.css")?,
        })
    }
}

/// Values for the stylesheet header and sprite paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetMeta {
    pub version: String,
    pub theme: String,
}

/// Counts for an assembled stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SheetStats {
    pub species_rules: usize,
    pub dex_aliases: usize,
    /// Entries left out because their regular sprite is not present.
    pub skipped_no_sprite: usize,
}

/// An assembled stylesheet in both forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub css: String,
    pub minified: String,
    pub stats: SheetStats,
}

impl Stylesheet {
    /// Write both files into `dir`, returning their paths.
    pub fn write(&self, dir: &Path) -> Result<(PathBuf, PathBuf)> {
        std::fs::create_dir_all(dir).map_err(|e| PogoError::io(dir, "create output directory", e))?;

        let css_path = dir.join(CSS_FILENAME);
        let min_path = dir.join(MIN_CSS_FILENAME);

        std::fs::write(&css_path, &self.css)
            .map_err(|e| PogoError::io(&css_path, "write stylesheet", e))?;
        std::fs::write(&min_path, &self.minified)
            .map_err(|e| PogoError::io(&min_path, "write stylesheet", e))?;

        Ok((css_path, min_path))
    }
}

/// Assemble the stylesheet.
///
/// With `available` set, entries whose regular sprite is not in it are left
/// out. Without it every entry gets a rule.
pub fn assemble(
    entries: &[MappingEntry],
    available: Option<&HashSet<String>>,
    fragments: &Fragments,
    meta: &SheetMeta,
) -> Stylesheet {
    let mut stats = SheetStats::default();
    let mut species_rules = Vec::new();
    let mut dex_aliases = Vec::new();
    let mut aliased = HashSet::new();

    for entry in entries {
        if let Some(available) = available {
            if !available.contains(&entry.sprite_file) {
                stats.skipped_no_sprite += 1;
                continue;
            }
        }

        species_rules.push(sprite_rule(&entry.class_name, entry, &meta.theme));

        // Only base forms get a dex alias, so a dex never has two
        if entry.is_base_form() && aliased.insert(entry.dex) {
            dex_aliases.push(sprite_rule(&entry.dex.to_string(), entry, &meta.theme));
        }
    }

    stats.species_rules = species_rules.len();
    stats.dex_aliases = dex_aliases.len();

    let header = format!(
        "/*!\n * pogo-icons v{}\n * Pokemon GO sprite icons\n * Theme: {}\n * Species: {}\n */\n",
        meta.version, meta.theme, stats.species_rules
    );

    let css = [
        header,
        "/* === Base === */".to_string(),
        fragments.base.trim().to_string(),
        String::new(),
        "/* === Sizes === */".to_string(),
        fragments.sizes.trim().to_string(),
        String::new(),
        "/* === Effects === */".to_string(),
        fragments.effects.trim().to_string(),
        String::new(),
        format!("/* === Species ({} entries) === */", stats.species_rules),
        species_rules.join("\n"),
        String::new(),
        format!("/* === Dex Number Aliases ({} base forms) === */", stats.dex_aliases),
        dex_aliases.join("\n"),
        String::new(),
    ]
    .join("\n");

    let minified = minify_css(&css);

    Stylesheet {
        css,
        minified,
        stats,
    }
}

fn sprite_rule(key: &str, entry: &MappingEntry, theme: &str) -> String {
    format!(
        ".{CLASS_PREFIX}{key} {{\n  --pogo-sprite: url('sprites/{theme}/regular/{}');\n  --pogo-sprite-shiny: url('sprites/{theme}/shiny/{}');\n}}",
        entry.sprite_file, entry.shiny_sprite_file
    )
}

/// File names in the optimized regular sprite directory, or `None` when the
/// directory does not exist yet.
pub fn available_sprites(regular_dir: &Path) -> Option<HashSet<String>> {
    let entries = std::fs::read_dir(regular_dir).ok()?;

    Some(
        entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .collect(),
    )
}
