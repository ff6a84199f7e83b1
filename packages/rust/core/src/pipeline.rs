//! End-to-end build pipeline: Markdown tree → pages → plist → index → icon.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use dashify_markdown::{Prepared, SkipReason};
use dashify_shared::{BuildOptions, DashifyError, DocsetLayout, OutputFile, Result};

use crate::assembler;
use crate::walker::walk_files;

/// Result of a successful [`build_docset`] run.
#[derive(Debug)]
pub struct BuildReport {
    /// Path to the `.docset` bundle.
    pub bundle_path: PathBuf,
    /// Number of pages written and indexed.
    pub page_count: usize,
    /// Files dropped as hidden or empty.
    pub skipped: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after a page has been written.
    fn page_written(&self, relative_path: &str, file_name: &str);
    /// Called when the pipeline completes.
    fn done(&self, report: &BuildReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn page_written(&self, _relative_path: &str, _file_name: &str) {}
    fn done(&self, _report: &BuildReport) {}
}

/// Build a docset bundle under `output_root`.
///
/// 1. Create the bundle directories
/// 2. Walk the Markdown tree, writing one HTML file per kept page
/// 3. Write `Info.plist`
/// 4. Populate the search index
/// 5. Copy the icon
#[instrument(skip_all, fields(docset = %options.docset_name))]
pub async fn build_docset(
    options: &BuildOptions,
    output_root: &Path,
    progress: &dyn ProgressReporter,
) -> Result<BuildReport> {
    let start = Instant::now();
    let layout = DocsetLayout::new(output_root, &options.docset_name);

    info!(
        source = %options.markdown_path.display(),
        bundle = %layout.bundle_dir().display(),
        "starting docset build"
    );

    progress.phase("Creating bundle");
    assembler::create_dirs(&layout)?;

    progress.phase("Rendering pages");
    let pages = generate_pages(options, &layout.documents_dir(), progress)?;

    progress.phase("Writing Info.plist");
    assembler::write_plist(&layout, &options.plist)?;

    progress.phase("Building search index");
    assembler::write_index(&layout, &pages.files).await?;

    progress.phase("Copying icon");
    assembler::copy_icon(&layout, &options.icon_path)?;

    let report = BuildReport {
        bundle_path: layout.bundle_dir().to_path_buf(),
        page_count: pages.files.len(),
        skipped: pages.skipped,
        elapsed: start.elapsed(),
    };

    progress.done(&report);

    info!(
        page_count = report.page_count,
        skipped = report.skipped,
        elapsed_ms = report.elapsed.as_millis(),
        "docset build complete"
    );

    Ok(report)
}

// ---------------------------------------------------------------------------
// Page stage
// ---------------------------------------------------------------------------

/// Pages emitted by one run, in emission order.
#[derive(Debug, Default)]
pub struct GeneratedPages {
    pub files: Vec<OutputFile>,
    pub skipped: usize,
}

/// A source file that survived filtering, ready to be numbered and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    pub relative_path: String,
    pub online_url: String,
    pub title: Option<String>,
    pub entry_type: String,
    pub body_html: String,
}

/// Transform every file under the Markdown root and write the kept pages.
///
/// Each page is written before its record is appended, so the returned list
/// only names files that exist on disk.
#[instrument(skip_all, fields(root = %options.markdown_path.display()))]
pub fn generate_pages(
    options: &BuildOptions,
    documents_dir: &Path,
    progress: &dyn ProgressReporter,
) -> Result<GeneratedPages> {
    let mut generated = GeneratedPages::default();

    for path in walk_files(&options.markdown_path)? {
        let path = path?;

        let page = match transform_page(options, &path)? {
            Ok(page) => page,
            Err(reason) => {
                debug!(path = %path.display(), %reason, "skipping file");
                generated.skipped += 1;
                continue;
            }
        };

        let file_name = OutputFile::file_name(generated.files.len());
        let document = dashify_markdown::wrap_document(
            &page.online_url,
            page.title.as_deref(),
            &page.body_html,
        );
        assembler::write_page(documents_dir, &file_name, &document)?;
        progress.page_written(&page.relative_path, &file_name);

        debug!(
            relative_path = %page.relative_path,
            entry_type = %page.entry_type,
            file = %file_name,
            "page emitted"
        );

        generated.files.push(OutputFile {
            name: page.title,
            entry_type: page.entry_type,
            path: file_name,
        });
    }

    info!(
        pages = generated.files.len(),
        skipped = generated.skipped,
        "page stage complete"
    );
    Ok(generated)
}

/// Read one source file and decide whether it becomes a page.
///
/// The outer `Result` carries fatal errors; the inner one is the skip decision.
pub fn transform_page(
    options: &BuildOptions,
    path: &Path,
) -> Result<std::result::Result<SourcePage, SkipReason>> {
    let bytes = std::fs::read(path).map_err(|e| DashifyError::io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);

    let prepared = match dashify_markdown::prepare(&text) {
        Prepared::Page(prepared) => prepared,
        Prepared::Skipped(reason) => return Ok(Err(reason)),
    };

    let relative_path = relative_path(&options.markdown_path, path);
    let online_url = format!("{}{}", options.base_url, relative_path);
    let entry_type = options.classify(&relative_path).to_string();
    debug!(%online_url, %entry_type, "classified page");

    Ok(Ok(SourcePage {
        relative_path,
        online_url,
        title: prepared.title,
        entry_type,
        body_html: prepared.body_html,
    }))
}

/// Path of `path` below `root`, minus a trailing `.md`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    relative
        .strip_suffix(".md")
        .unwrap_or(&*relative)
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
