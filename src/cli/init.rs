//! Init command implementation.
//!
//! Writes a `pogo.yaml` manifest with every default spelled out, plus the
//! starter data and style files the other commands expect.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{FormCodeTable, Manifest, MANIFEST_FILENAME};
use crate::error::{PogoError, Result};
use crate::output::{display_path, Printer};
use crate::stylesheet::Fragments;

/// Initialize a project with pogo.yaml, form codes, and style fragments
#[derive(Args, Debug, Default, Clone)]
pub struct InitArgs {
    /// Overwrite existing pogo.yaml
    #[arg(long)]
    pub force: bool,
}

const BASE_CSS: &str = r#"[class^="pogo-"], [class*=" pogo-"] {
  display: inline-block;
  width: var(--pogo-size, 64px);
  height: var(--pogo-size, 64px);
  background-image: var(--pogo-sprite);
  background-size: contain;
  background-repeat: no-repeat;
  background-position: center;
}
"#;

const SIZES_CSS: &str = r#".pogo-sm { --pogo-size: 32px; }
.pogo-md { --pogo-size: 64px; }
.pogo-lg { --pogo-size: 128px; }
"#;

const EFFECTS_CSS: &str = r#".pogo-shiny { background-image: var(--pogo-sprite-shiny); }
.pogo-grayscale { filter: grayscale(1); }
.pogo-flip { transform: scaleX(-1); }
"#;

pub fn run(root: &Path, args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = root.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(PogoError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let manifest = Manifest::default();
    let yaml = serde_yaml::to_string(&manifest).map_err(|e| PogoError::Build {
        message: format!("Failed to serialize manifest: {}", e),
        help: None,
    })?;
    write_file(&manifest_path, &yaml)?;
    printer.success("Created", &display_path(&manifest_path));

    let resolved = manifest.resolve(root);

    let form_codes = serde_json::to_string_pretty(&starter_form_codes()).map_err(|e| {
        PogoError::Build {
            message: format!("Failed to serialize form codes: {}", e),
            help: None,
        }
    })?;

    let mut starters: Vec<(PathBuf, &str)> =
        vec![(resolved.form_codes_path(), form_codes.as_str())];
    for (name, content) in Fragments::FILES.iter().zip([BASE_CSS, SIZES_CSS, EFFECTS_CSS]) {
        starters.push((resolved.styles.join(name), content));
    }

    for (path, content) in starters {
        if path.exists() {
            printer.info("Kept", &display_path(&path));
            continue;
        }
        write_file(&path, content)?;
        printer.success("Created", &display_path(&path));
    }

    Ok(())
}

fn starter_form_codes() -> FormCodeTable {
    let form_map: BTreeMap<String, Option<String>> = [
        ("Alolan", Some("ALOLA")),
        ("Galarian", Some("GALARIAN")),
        ("Hisuian", Some("HISUIAN")),
        ("Paldean", Some("PALDEA")),
        ("Mega", Some("MEGA")),
        ("Mega X", Some("MEGA_X")),
        ("Mega Y", Some("MEGA_Y")),
        ("Primal", Some("PRIMAL")),
        ("Normal", None),
    ]
    .into_iter()
    .map(|(form, code)| (form.to_string(), code.map(str::to_string)))
    .collect();

    FormCodeTable {
        form_map,
        default_forms: BTreeMap::new(),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PogoError::io(parent, "create directory", e))?;
    }
    fs::write(path, content).map_err(|e| PogoError::io(path, "write file", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Project;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_project() {
        let dir = tempdir().unwrap();

        run(dir.path(), InitArgs::default(), &Printer::plain()).unwrap();

        assert!(dir.path().join("pogo.yaml").exists());
        for name in Fragments::FILES {
            assert!(dir.path().join("styles").join(name).exists());
        }

        let project = Project::load(dir.path()).unwrap();
        assert!(project.has_manifest);
        assert_eq!(project.manifest.concurrency, 10);
        let table = project.form_codes().unwrap();
        assert_eq!(table.lookup("Mega X"), Some(Some("MEGA_X")));
        assert_eq!(table.lookup("Normal"), Some(None));
    }

    #[test]
    fn test_init_errors_if_manifest_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pogo.yaml"), "output: build").unwrap();

        let result = run(dir.path(), InitArgs::default(), &Printer::plain());

        assert!(result.is_err());
        let content = fs::read_to_string(dir.path().join("pogo.yaml")).unwrap();
        assert_eq!(content, "output: build");
    }

    #[test]
    fn test_init_force_overwrites_manifest_but_keeps_data() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pogo.yaml"), "output: build").unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        let custom = r#"{"formMap": {"Libre": "cLIBRE"}}"#;
        fs::write(dir.path().join("data/form-codes.json"), custom).unwrap();

        run(dir.path(), InitArgs { force: true }, &Printer::plain()).unwrap();

        let manifest = fs::read_to_string(dir.path().join("pogo.yaml")).unwrap();
        assert!(manifest.contains("output: dist"));
        let codes = fs::read_to_string(dir.path().join("data/form-codes.json")).unwrap();
        assert_eq!(codes, custom);
    }
}
