//! Build command implementation.
//!
//! Runs the pipeline steps in order: mapping, fetch, optimize, css. Each
//! step reads what the previous one wrote, so the first failure stops the
//! run.

use std::time::Instant;

use clap::Args;

use crate::config::Project;
use crate::error::{PogoError, Result};
use crate::output::Printer;

use super::css;
use super::fetch::{self, FetchArgs};
use super::mapping::{self, MappingArgs};
use super::optimize::{self, OptimizeArgs};

/// Run the whole pipeline
#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    /// Only regenerate the stylesheet from the existing mapping
    #[arg(long, conflicts_with = "skip_fetch")]
    pub css_only: bool,

    /// Rebuild the mapping, optimize, and css without downloading
    #[arg(long)]
    pub skip_fetch: bool,

    /// Dataset URL or local JSON file (overrides dataset_url in pogo.yaml)
    #[arg(long)]
    pub dataset: Option<String>,

    /// Downloads per batch (overrides concurrency in pogo.yaml)
    #[arg(long, short = 'j')]
    pub concurrency: Option<usize>,
}

/// A pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Mapping,
    Fetch,
    Optimize,
    Css,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Mapping => "mapping",
            Step::Fetch => "fetch",
            Step::Optimize => "optimize",
            Step::Css => "css",
        }
    }
}

impl BuildArgs {
    /// Steps this invocation runs, in order.
    pub fn steps(&self) -> Vec<Step> {
        if self.css_only {
            vec![Step::Css]
        } else if self.skip_fetch {
            vec![Step::Mapping, Step::Optimize, Step::Css]
        } else {
            vec![Step::Mapping, Step::Fetch, Step::Optimize, Step::Css]
        }
    }
}

pub async fn run(project: &Project, args: BuildArgs, printer: &Printer) -> Result<()> {
    let started = Instant::now();
    let steps = args.steps();

    for (i, step) in steps.iter().enumerate() {
        printer.status(
            "Step",
            &printer.bold(&format!("[{}/{}] {}", i + 1, steps.len(), step.name())),
        );

        run_step(project, &args, *step, printer)
            .await
            .map_err(|e| PogoError::Build {
                message: format!("step '{}' failed: {}", step.name(), e),
                help: Some(format!(
                    "Fix the problem and re-run, or run `pogo-icons {}` on its own",
                    step.name()
                )),
            })?;
    }

    printer.success("Finished", &format!("in {:.1}s", started.elapsed().as_secs_f64()));

    Ok(())
}

async fn run_step(
    project: &Project,
    args: &BuildArgs,
    step: Step,
    printer: &Printer,
) -> Result<()> {
    match step {
        Step::Mapping => {
            let mapping_args = MappingArgs {
                dataset: args.dataset.clone(),
            };
            mapping::run(project, &mapping_args, printer).await?;
        }
        Step::Fetch => {
            let fetch_args = FetchArgs {
                concurrency: args.concurrency,
            };
            fetch::run(project, &fetch_args, printer).await?;
        }
        Step::Optimize => {
            optimize::run(project, &OptimizeArgs::default(), printer).await?;
        }
        Step::Css => {
            css::run(project, printer)?;
        }
    }
    Ok(())
}
