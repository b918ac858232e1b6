//! Css command implementation.
//!
//! Assembles the stylesheet from the persisted mapping and the style
//! fragments, then writes the expanded and minified files.

use crate::config::Project;
use crate::error::Result;
use crate::fetch::Variant;
use crate::mapping::read_mapping;
use crate::output::{display_path, kilobytes, plural, Printer};
use crate::stylesheet::{assemble, available_sprites, Fragments, SheetMeta, SheetStats};

pub fn run(project: &Project, printer: &Printer) -> Result<SheetStats> {
    let manifest = &project.manifest;

    let fragments = Fragments::load(&manifest.styles)?;
    let entries = read_mapping(&manifest.species_map_path())?;

    let regular_dir = manifest.dist_sprites_dir().join(Variant::Regular.dir_name());
    let available = available_sprites(&regular_dir);
    if available.is_none() {
        printer.info(
            "Note",
            &format!(
                "{} does not exist; emitting rules for every entry",
                display_path(&regular_dir)
            ),
        );
    }

    let meta = SheetMeta {
        version: manifest.version.clone(),
        theme: manifest.theme.clone(),
    };
    let sheet = assemble(&entries, available.as_ref(), &fragments, &meta);
    let (css_path, min_path) = sheet.write(&manifest.output)?;

    let stats = sheet.stats;
    printer.success(
        "Generated",
        &format!(
            "{} and {}",
            plural(stats.species_rules, "species rule", "species rules"),
            plural(stats.dex_aliases, "dex alias", "dex aliases")
        ),
    );
    if stats.skipped_no_sprite > 0 {
        printer.warning(
            "Skipped",
            &format!(
                "{} without an optimized sprite",
                plural(stats.skipped_no_sprite, "entry", "entries")
            ),
        );
    }
    printer.info(
        "Wrote",
        &format!("{} ({})", display_path(&css_path), kilobytes(sheet.css.len() as u64)),
    );
    printer.info(
        "Wrote",
        &format!("{} ({})", display_path(&min_path), kilobytes(sheet.minified.len() as u64)),
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const MAP: &str = r#"[
        {"name": "Bulbasaur", "form": "", "dex": 1, "className": "bulbasaur",
         "upstreamId": "bulbasaur", "spriteFile": "pm1.icon.png",
         "shinySpriteFile": "pm1.s.icon.png", "tags": []},
        {"name": "Ivysaur", "form": "", "dex": 2, "className": "ivysaur",
         "upstreamId": "ivysaur", "spriteFile": "pm2.icon.png",
         "shinySpriteFile": "pm2.s.icon.png", "tags": []}
    ]"#;

    fn seed(root: &Path) {
        fs::create_dir_all(root.join("data")).unwrap();
        fs::write(root.join("data/species-map.json"), MAP).unwrap();
        fs::create_dir_all(root.join("styles")).unwrap();
        for name in Fragments::FILES {
            fs::write(root.join("styles").join(name), "").unwrap();
        }
    }

    #[test]
    fn test_css_without_optimized_sprites_emits_every_rule() {
        let dir = tempdir().unwrap();
        seed(dir.path());
        let project = Project::load(dir.path()).unwrap();

        let stats = run(&project, &Printer::plain()).unwrap();

        assert_eq!(stats.species_rules, 2);
        assert_eq!(stats.dex_aliases, 2);
        let css = fs::read_to_string(dir.path().join("dist/pogo-icons.css")).unwrap();
        assert!(css.contains(".pogo-ivysaur {"));
        assert!(dir.path().join("dist/pogo-icons.min.css").exists());
    }

    #[test]
    fn test_css_filters_to_optimized_sprites() {
        let dir = tempdir().unwrap();
        seed(dir.path());
        let regular = dir.path().join("dist/sprites/go/regular");
        fs::create_dir_all(&regular).unwrap();
        fs::write(regular.join("pm1.icon.png"), b"png").unwrap();
        let project = Project::load(dir.path()).unwrap();

        let stats = run(&project, &Printer::plain()).unwrap();

        assert_eq!(stats.species_rules, 1);
        assert_eq!(stats.skipped_no_sprite, 1);
        let css = fs::read_to_string(dir.path().join("dist/pogo-icons.css")).unwrap();
        assert!(!css.contains("pogo-ivysaur"));
    }

    #[test]
    fn test_css_without_fragments_fails() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/species-map.json"), MAP).unwrap();
        let project = Project::load(dir.path()).unwrap();

        assert!(run(&project, &Printer::plain()).is_err());
    }
}
