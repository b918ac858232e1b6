//! Bulk sprite download.
//!
//! Every mapping entry yields a regular and a shiny download. Files already
//! on disk are skipped before any request is made, so an interrupted run
//! can simply be started again. The rest are downloaded in fixed-size
//! batches; a batch fully settles before the next one starts.

mod report;
mod source;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures::future::join_all;

use crate::error::{PogoError, Result};
use crate::mapping::MappingEntry;

pub use report::{
    write_missing, FailureReason, FetchReport, FetchTally, MissingAssetRecord, TaskFailure,
    TaskOutcome, Variant,
};
pub use source::{AssetSource, FetchResponse, HttpAssetSource};

/// One sprite to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub class_name: String,
    pub label: String,
    pub variant: Variant,
    pub file: String,
    pub dest: PathBuf,
}

/// Progress after a batch settles.
#[derive(Debug)]
pub struct BatchProgress<'a> {
    /// Tasks settled so far (excluding skipped ones).
    pub completed: usize,
    /// Tasks that needed downloading.
    pub total: usize,
    /// Running tally including skipped files.
    pub tally: FetchTally,
    /// Failures from the batch that just settled.
    pub failures: &'a [TaskFailure],
}

/// Plan the two downloads for every entry, in mapping order.
///
/// Entries that resolve to the same sprite file share one task, owned by
/// the first of them, so no two tasks ever write the same destination.
pub fn plan_tasks(entries: &[MappingEntry], sprites_dir: &Path) -> Vec<FetchTask> {
    let mut tasks = Vec::with_capacity(entries.len() * 2);
    let mut planned = HashSet::new();

    for entry in entries {
        for variant in Variant::ALL {
            let (file, label) = match variant {
                Variant::Regular => (&entry.sprite_file, entry.label()),
                Variant::Shiny => (
                    &entry.shiny_sprite_file,
                    format!("{} [shiny]", entry.label()),
                ),
            };

            let dest = sprites_dir.join(variant.dir_name()).join(file);
            if !planned.insert(dest.clone()) {
                continue;
            }

            tasks.push(FetchTask {
                class_name: entry.class_name.clone(),
                label,
                variant,
                file: file.clone(),
                dest,
            });
        }
    }

    tasks
}

/// Download all sprites for the mapping into `sprites_dir/{regular,shiny}`.
///
/// Per-task problems never abort the run; they are counted and returned.
/// Only failing to create the output directories is an error.
pub async fn fetch_sprites<S, F>(
    entries: &[MappingEntry],
    sprites_dir: &Path,
    source: &S,
    concurrency: usize,
    mut on_progress: F,
) -> Result<FetchReport>
where
    S: AssetSource,
    F: FnMut(&BatchProgress<'_>),
{
    for variant in Variant::ALL {
        let dir = sprites_dir.join(variant.dir_name());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| PogoError::io(&dir, "create sprite directory", e))?;
    }

    let tasks = plan_tasks(entries, sprites_dir);
    let planned = tasks.len();
    let pending = pending_tasks(tasks).await;

    let mut report = FetchReport::default();
    report.tally.attempted = planned - pending.len();
    report.tally.skipped = planned - pending.len();

    let total = pending.len();
    let mut completed = 0;

    for batch in pending.chunks(concurrency.max(1)) {
        let outcomes = join_all(batch.iter().map(|task| run_task(source, task))).await;
        let batch_report = FetchReport::from_outcomes(outcomes);
        completed += batch.len();

        on_progress(&BatchProgress {
            completed,
            total,
            tally: {
                let mut running = report.tally;
                running += batch_report.tally;
                running
            },
            failures: &batch_report.failures,
        });

        report.merge(batch_report);
    }

    Ok(report)
}

/// Drop tasks whose destination already exists.
async fn pending_tasks(tasks: Vec<FetchTask>) -> Vec<FetchTask> {
    let probes = join_all(tasks.iter().map(|t| tokio::fs::try_exists(&t.dest))).await;

    tasks
        .into_iter()
        .zip(probes)
        .filter(|(_, exists)| !matches!(exists, Ok(true)))
        .map(|(task, _)| task)
        .collect()
}

async fn run_task<S: AssetSource>(source: &S, task: &FetchTask) -> TaskOutcome {
    let failed = |reason| {
        TaskOutcome::Failed(TaskFailure {
            label: task.label.clone(),
            file: task.file.clone(),
            reason,
        })
    };

    match source.get(&task.file).await {
        Ok(FetchResponse::Found(body)) => match write_atomically(&task.dest, &body).await {
            Ok(()) => TaskOutcome::Downloaded,
            Err(e) => failed(FailureReason::Transport(e.to_string())),
        },
        Ok(FetchResponse::NotFound) => TaskOutcome::Missing(MissingAssetRecord {
            class_name: task.class_name.clone(),
            variant: task.variant,
            file: task.file.clone(),
        }),
        Ok(FetchResponse::Status(code)) => failed(FailureReason::Status(code)),
        Err(e) => failed(FailureReason::Transport(e.to_string())),
    }
}

/// Write via a sibling temp file so an interrupted download never looks
/// complete to the next run.
async fn write_atomically(dest: &Path, body: &[u8]) -> std::io::Result<()> {
    let partial = dest.with_extension("part");
    tokio::fs::write(&partial, body).await?;
    tokio::fs::rename(&partial, dest).await
}
