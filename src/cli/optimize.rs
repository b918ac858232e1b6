//! Optimize command implementation.
//!
//! Recompresses raw sprites into the distribution tree.

use clap::Args;

use crate::config::Project;
use crate::error::Result;
use crate::optimize::{optimize_sprites, OptimizeReport};
use crate::output::{display_path, megabytes, plural, Printer};

/// Recompress downloaded sprites into the distribution tree
#[derive(Args, Debug, Default, Clone)]
pub struct OptimizeArgs {
    /// Files per batch (overrides batch_size in pogo.yaml)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

pub async fn run(
    project: &Project,
    args: &OptimizeArgs,
    printer: &Printer,
) -> Result<OptimizeReport> {
    let manifest = &project.manifest;
    let source_dir = manifest.raw_sprites_dir();
    let dest_dir = manifest.dist_sprites_dir();
    let batch_size = args.batch_size.unwrap_or(manifest.batch_size).max(1);

    printer.status(
        "Optimizing",
        &format!("{} -> {}", display_path(&source_dir), display_path(&dest_dir)),
    );

    let report = optimize_sprites(&source_dir, &dest_dir, batch_size, |progress| {
        printer.progress(
            &format!("{}", progress.variant),
            progress.completed,
            progress.total,
            "sprites",
        );
    })
    .await?;

    for variant in &report.absent {
        printer.info(
            "Skipped",
            &format!(
                "{} (no {} directory)",
                variant,
                display_path(&source_dir.join(variant.dir_name()))
            ),
        );
    }

    for failure in &report.failures {
        printer.warning(
            "Failed",
            &format!("{}/{}: {}", failure.variant, failure.file, failure.message),
        );
    }

    let stats = &report.stats;
    printer.success(
        "Optimized",
        &format!(
            "{}, {} up to date, {} failed",
            plural(stats.processed, "sprite", "sprites"),
            stats.skipped,
            stats.failed
        ),
    );
    if stats.processed > 0 {
        printer.info("Saved", &megabytes(stats.saved_bytes()));
    }

    Ok(report)
}
