//! CLI definition, tracing setup, and the build command.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use dashify_core::{BuildReport, ProgressReporter, build_docset};
use dashify_shared::load_options;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// dashify: turn a Markdown documentation tree into a docset.
#[derive(Parser)]
#[command(
    name = "dashify",
    version,
    about = "Build a Dash/Zeal docset from a tree of Markdown files.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Path to the JSON options file.
    #[arg(value_name = "OPTIONS_FILE")]
    pub options: PathBuf,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "dashify=info",
        1 => "dashify=debug",
        _ => "dashify=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the build described by the options file.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    cmd_build(&cli.options).await
}

async fn cmd_build(options_path: &Path) -> Result<()> {
    let options = load_options(options_path)?;

    info!(
        options = %options_path.display(),
        docset = %options.docset_name,
        "building docset"
    );

    let output_root = std::env::current_dir().wrap_err("cannot determine working directory")?;

    let reporter = CliProgress::new();
    let report = build_docset(&options, &output_root, &reporter).await?;

    println!();
    println!("  Docset built successfully!");
    println!("  Pages:   {}", report.page_count);
    println!("  Skipped: {}", report.skipped);
    println!("  Path:    {}", report.bundle_path.display());
    println!("  Time:    {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn page_written(&self, relative_path: &str, file_name: &str) {
        self.spinner
            .set_message(format!("Rendering {relative_path} -> {file_name}"));
    }

    fn done(&self, _report: &BuildReport) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
