//! Fetch command implementation.
//!
//! Downloads the regular and shiny sprite for every mapped species. Sprites
//! already on disk are kept, so the command can be re-run after an
//! interrupted or partially failed run.

use clap::Args;

use crate::config::Project;
use crate::error::Result;
use crate::fetch::{fetch_sprites, write_missing, FetchReport, FetchTally, HttpAssetSource};
use crate::mapping::read_mapping;
use crate::output::{display_path, plural, Printer};

/// Missing sprites listed before truncating.
const MISSING_PREVIEW: usize = 10;

/// Download sprites for every mapped species
#[derive(Args, Debug, Default, Clone)]
pub struct FetchArgs {
    /// Downloads per batch (overrides concurrency in pogo.yaml)
    #[arg(long, short = 'j')]
    pub concurrency: Option<usize>,
}

pub async fn run(project: &Project, args: &FetchArgs, printer: &Printer) -> Result<FetchReport> {
    let manifest = &project.manifest;
    let entries = read_mapping(&manifest.species_map_path())?;
    let sprites_dir = manifest.raw_sprites_dir();
    let source = HttpAssetSource::new(manifest.asset_base_url.as_str());
    let concurrency = args.concurrency.unwrap_or(manifest.concurrency).max(1);

    printer.status(
        "Fetching",
        &format!(
            "{} into {}",
            plural(entries.len() * 2, "sprite", "sprites"),
            display_path(&sprites_dir)
        ),
    );

    let report = fetch_sprites(&entries, &sprites_dir, &source, concurrency, |progress| {
        for failure in progress.failures {
            printer.warning(
                "Failed",
                &format!("{} ({}): {}", failure.label, failure.file, failure.reason),
            );
        }
        printer.progress(
            "Downloading",
            progress.completed,
            progress.total,
            &format!(
                "{} new, {} missing",
                progress.tally.downloaded, progress.tally.missing
            ),
        );
    })
    .await?;

    print_summary(&report, printer);

    let missing_path = manifest.missing_sprites_path();
    write_missing(&missing_path, &report.missing)?;

    if !report.missing.is_empty() {
        printer.warning(
            "Missing",
            &format!(
                "{} not published upstream, listed in {}",
                plural(report.missing.len(), "sprite", "sprites"),
                display_path(&missing_path)
            ),
        );
        printer.preview(
            report
                .missing
                .iter()
                .map(|m| format!("{} [{}] {}", m.class_name, m.variant, m.file)),
            MISSING_PREVIEW,
        );
    }

    if report.tally.failed > 0 {
        printer.warning(
            "Retry",
            &format!(
                "{} failed; run `pogo-icons fetch` again to retry",
                plural(report.tally.failed, "download", "downloads")
            ),
        );
    }

    Ok(report)
}

fn print_summary(report: &FetchReport, printer: &Printer) {
    let tally = &report.tally;
    printer.success("Fetched", &summary(tally));
    printer.info("On disk", &format!("{} of {}", tally.satisfied(), tally.attempted));
}

fn summary(tally: &FetchTally) -> String {
    format!(
        "{} downloaded, {} already present, {} missing, {} failed ({} total)",
        tally.downloaded, tally.skipped, tally.missing, tally.failed, tally.attempted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fetch_without_mapping_fails() {
        let dir = tempdir().unwrap();
        let project = Project::load(dir.path()).unwrap();

        let result = run(&project, &FetchArgs::default(), &Printer::plain()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_with_every_sprite_present_makes_no_requests() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("pogo.yaml"),
            "asset_base_url: http://127.0.0.1:9/unreachable\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("data/species-map.json"),
            r#"[{
                "name": "Bulbasaur", "form": "", "dex": 1, "className": "bulbasaur",
                "upstreamId": "bulbasaur", "spriteFile": "pm1.icon.png",
                "shinySpriteFile": "pm1.s.icon.png", "tags": []
            }]"#,
        )
        .unwrap();
        for (variant, file) in [("regular", "pm1.icon.png"), ("shiny", "pm1.s.icon.png")] {
            let sub = dir.path().join("sprites/go").join(variant);
            fs::create_dir_all(&sub).unwrap();
            fs::write(sub.join(file), b"png").unwrap();
        }
        let project = Project::load(dir.path()).unwrap();

        let report = run(&project, &FetchArgs::default(), &Printer::plain())
            .await
            .unwrap();

        assert_eq!(report.tally.skipped, 2);
        assert_eq!(report.tally.attempted, 2);
        assert_eq!(report.tally.failed, 0);
        let missing = fs::read_to_string(dir.path().join("data/missing-sprites.json")).unwrap();
        assert_eq!(missing.trim(), "[]");
    }

    #[tokio::test]
    async fn test_fetch_reports_artifact_write_failure_after_downloading() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pogo.yaml"), "data: data\n").unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/species-map.json"), "[]").unwrap();
        // A directory where the artifact should go makes the write fail
        fs::create_dir_all(dir.path().join("data/missing-sprites.json")).unwrap();
        let project = Project::load(dir.path()).unwrap();

        let result = run(&project, &FetchArgs::default(), &Printer::plain()).await;

        assert!(result.is_err());
        assert!(dir.path().join("sprites/go/regular").is_dir());
    }

    #[test]
    fn test_summary_counts() {
        let tally = FetchTally {
            attempted: 10,
            downloaded: 6,
            skipped: 2,
            missing: 1,
            failed: 1,
        };

        assert_eq!(
            summary(&tally),
            "6 downloaded, 2 already present, 1 missing, 1 failed (10 total)"
        );
        assert_eq!(tally.satisfied(), 8);
    }
}
