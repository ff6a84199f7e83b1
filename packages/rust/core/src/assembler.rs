//! Docset bundle assembler.
//!
//! Materializes the bundle around the rendered pages: directory skeleton,
//! page files, `Info.plist`, the search index and the icon.

use std::fmt::Write as _;
use std::path::Path;

use tracing::{debug, info, instrument};

use dashify_shared::{DashifyError, DocsetLayout, OutputFile, PlistValue, Result};
use dashify_storage::SearchIndex;

const PLIST_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
"#;

const PLIST_FOOTER: &str = "</dict>\n</plist>";

/// Create the bundle directory structure down to `Documents/`.
pub fn create_dirs(layout: &DocsetLayout) -> Result<()> {
    let documents = layout.documents_dir();
    std::fs::create_dir_all(&documents).map_err(|e| DashifyError::io(&documents, e))?;

    debug!(path = %layout.bundle_dir().display(), "directory structure created");
    Ok(())
}

/// Write one rendered page into `Documents/`.
pub fn write_page(documents_dir: &Path, file_name: &str, html: &str) -> Result<()> {
    let file_path = documents_dir.join(file_name);
    std::fs::write(&file_path, html).map_err(|e| DashifyError::io(&file_path, e))?;

    debug!(path = %file_path.display(), bytes = html.len(), "wrote page");
    Ok(())
}

// ---------------------------------------------------------------------------
// Info.plist
// ---------------------------------------------------------------------------

/// Render manifest entries into the fixed plist skeleton, in entry order.
pub fn render_plist(entries: &[(String, PlistValue)]) -> String {
    let mut xml = String::from(PLIST_HEADER);

    for (key, value) in entries {
        let _ = writeln!(xml, "  <key>{}</key>", html_escape::encode_text(key));
        match value {
            PlistValue::Bool(b) => {
                let _ = writeln!(xml, "  <{b}/>");
            }
            PlistValue::String(s) => {
                let _ = writeln!(xml, "  <string>{}</string>", html_escape::encode_text(s));
            }
        }
    }

    xml.push_str(PLIST_FOOTER);
    xml
}

/// Write `Contents/Info.plist`.
pub fn write_plist(layout: &DocsetLayout, entries: &[(String, PlistValue)]) -> Result<()> {
    let path = layout.info_plist();
    std::fs::write(&path, render_plist(entries)).map_err(|e| DashifyError::io(&path, e))?;

    debug!(path = %path.display(), keys = entries.len(), "wrote Info.plist");
    Ok(())
}

// ---------------------------------------------------------------------------
// Search index
// ---------------------------------------------------------------------------

/// Build `docSet.dsidx` from the run's output files.
///
/// An index left by an earlier run is removed first: output filenames are
/// renumbered from zero every run, so old rows would collide with new ones.
#[instrument(skip_all, fields(entries = files.len()))]
pub async fn write_index(layout: &DocsetLayout, files: &[OutputFile]) -> Result<usize> {
    let path = layout.index_path();
    if path.exists() {
        std::fs::remove_file(&path).map_err(|e| DashifyError::io(&path, e))?;
        debug!(path = %path.display(), "removed stale search index");
    }

    let index = SearchIndex::open(&path).await?;
    let inserted = index.insert_all(files).await?;

    info!(rows = inserted, path = %path.display(), "search index written");
    Ok(inserted)
}

// ---------------------------------------------------------------------------
// Icon
// ---------------------------------------------------------------------------

/// Copy the configured icon to `icon.png` at the bundle root.
pub fn copy_icon(layout: &DocsetLayout, icon_path: &Path) -> Result<u64> {
    let target = layout.icon_path();
    let bytes = std::fs::copy(icon_path, &target).map_err(|e| DashifyError::io(icon_path, e))?;

    debug!(from = %icon_path.display(), to = %target.display(), bytes, "copied icon");
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
