use clap::Parser;
use miette::Result;
use pogo_icons::cli::Cli;
use pogo_icons::output::Printer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    pogo_icons::cli::run(cli, &printer).await?;

    Ok(())
}
