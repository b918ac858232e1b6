pub mod build;
pub mod completions;
pub mod css;
pub mod fetch;
pub mod init;
pub mod mapping;
pub mod optimize;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Project;
use crate::error::Result;
use crate::output::Printer;

/// pogo-icons - Pokemon GO sprite icon set builder
#[derive(Parser, Debug)]
#[command(name = "pogo-icons")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project directory (where pogo.yaml lives)
    #[arg(long, short = 'C', global = true, default_value = ".")]
    pub project: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the whole pipeline: mapping, fetch, optimize, css
    Build(build::BuildArgs),

    /// Build the species mapping from the upstream dataset
    Mapping(mapping::MappingArgs),

    /// Download regular and shiny sprites for every mapped species
    Fetch(fetch::FetchArgs),

    /// Recompress downloaded sprites into the distribution tree
    Optimize(optimize::OptimizeArgs),

    /// Generate the stylesheet from the mapping
    Css,

    /// Check a persisted mapping without touching the network
    Validate(validate::ValidateArgs),

    /// Create pogo.yaml, a starter form code table, and style fragments
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli, printer: &Printer) -> Result<()> {
    let load = || Project::load(&cli.project);

    match cli.command {
        Commands::Init(args) => init::run(&cli.project, args, printer),
        Commands::Completions(args) => completions::run(args),
        Commands::Build(args) => build::run(&load()?, args, printer).await,
        Commands::Mapping(args) => mapping::run(&load()?, &args, printer).await.map(drop),
        Commands::Fetch(args) => fetch::run(&load()?, &args, printer).await.map(drop),
        Commands::Optimize(args) => optimize::run(&load()?, &args, printer).await.map(drop),
        Commands::Css => css::run(&load()?, printer).map(drop),
        Commands::Validate(args) => validate::run(&load()?, args, printer),
    }
}
