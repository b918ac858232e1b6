//! Bulk sprite optimization.
//!
//! Recompresses every downloaded PNG into the distribution tree. A sprite
//! whose output is at least as new as its source is left alone, so re-runs
//! only touch what changed. The `regular` and `shiny` subsets are handled
//! independently and a missing subset is skipped.

mod png;

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use futures::future::join_all;
use walkdir::WalkDir;

use crate::error::{PogoError, Result};
use crate::fetch::Variant;

pub use png::recompress_png;

/// Counts for an optimize run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizeStats {
    pub processed: usize,
    /// Output already up to date.
    pub skipped: usize,
    pub failed: usize,
    /// Source bytes of processed files.
    pub source_bytes: u64,
    /// Output bytes of processed files.
    pub output_bytes: u64,
}

impl OptimizeStats {
    pub fn attempted(&self) -> usize {
        self.processed + self.skipped + self.failed
    }

    /// Bytes saved by recompression.
    pub fn saved_bytes(&self) -> i64 {
        self.source_bytes as i64 - self.output_bytes as i64
    }

    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Processed {
                source_bytes,
                output_bytes,
            } => {
                self.processed += 1;
                self.source_bytes += source_bytes;
                self.output_bytes += output_bytes;
            }
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// A sprite that could not be optimized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeFailure {
    pub variant: Variant,
    pub file: String,
    pub message: String,
}

/// Result of optimizing both subsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizeReport {
    pub stats: OptimizeStats,
    pub failures: Vec<OptimizeFailure>,
    /// Subsets with no source directory.
    pub absent: Vec<Variant>,
}

/// Progress after a batch settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetProgress {
    pub variant: Variant,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug)]
enum FileOutcome {
    Processed { source_bytes: u64, output_bytes: u64 },
    Skipped,
    Failed(String),
}

/// Optimize `source_dir/{regular,shiny}/*.png` into `dest_dir/{regular,shiny}`.
pub async fn optimize_sprites<F>(
    source_dir: &Path,
    dest_dir: &Path,
    batch_size: usize,
    mut on_progress: F,
) -> Result<OptimizeReport>
where
    F: FnMut(SubsetProgress),
{
    let mut report = OptimizeReport::default();

    for variant in Variant::ALL {
        let src = source_dir.join(variant.dir_name());
        let dst = dest_dir.join(variant.dir_name());

        if !src.is_dir() {
            report.absent.push(variant);
            continue;
        }

        tokio::fs::create_dir_all(&dst)
            .await
            .map_err(|e| PogoError::io(&dst, "create output directory", e))?;

        let files = list_pngs(&src);
        let total = files.len();
        let mut completed = 0;

        for batch in files.chunks(batch_size.max(1)) {
            let outcomes = join_all(
                batch
                    .iter()
                    .map(|file| optimize_file(src.join(file), dst.join(file))),
            )
            .await;

            for (file, outcome) in batch.iter().zip(outcomes) {
                report.stats.record(&outcome);
                if let FileOutcome::Failed(message) = outcome {
                    report.failures.push(OptimizeFailure {
                        variant,
                        file: file.clone(),
                        message,
                    });
                }
            }

            completed += batch.len();
            on_progress(SubsetProgress {
                variant,
                completed,
                total,
            });
        }
    }

    Ok(report)
}

/// PNG file names directly inside `dir`, sorted.
fn list_pngs(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .filter(|name| name.ends_with(".png"))
        .collect();

    files.sort();
    files
}

async fn optimize_file(src: PathBuf, dst: PathBuf) -> FileOutcome {
    let src_meta = match tokio::fs::metadata(&src).await {
        Ok(meta) => meta,
        Err(e) => return FileOutcome::Failed(e.to_string()),
    };

    if let Ok(dst_meta) = tokio::fs::metadata(&dst).await {
        if is_up_to_date(src_meta.modified().ok(), dst_meta.modified().ok()) {
            return FileOutcome::Skipped;
        }
    }

    let bytes = match tokio::fs::read(&src).await {
        Ok(bytes) => bytes,
        Err(e) => return FileOutcome::Failed(e.to_string()),
    };

    let encoded = match tokio::task::spawn_blocking(move || recompress_png(&bytes)).await {
        Ok(Ok(encoded)) => encoded,
        Ok(Err(e)) => return FileOutcome::Failed(e.to_string()),
        Err(e) => return FileOutcome::Failed(format!("Encoder task failed: {}", e)),
    };

    let partial = dst.with_extension("part");
    let written = match tokio::fs::write(&partial, &encoded).await {
        Ok(()) => tokio::fs::rename(&partial, &dst).await,
        Err(e) => Err(e),
    };

    match written {
        Ok(()) => FileOutcome::Processed {
            source_bytes: src_meta.len(),
            output_bytes: encoded.len() as u64,
        },
        Err(e) => FileOutcome::Failed(e.to_string()),
    }
}

/// Output counts as fresh when its mtime is at or after the source's.
fn is_up_to_date(src: Option<SystemTime>, dst: Option<SystemTime>) -> bool {
    matches!((src, dst), (Some(src), Some(dst)) if dst >= src)
}
