//! dashify CLI: build a docset bundle from a Markdown documentation tree.
//!
//! Reads one JSON options file and writes `{docsetName}.docset/` into the
//! working directory.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
