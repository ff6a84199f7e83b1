//! Core domain types for dashify docsets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OutputFile
// ---------------------------------------------------------------------------

/// One emitted page, as recorded in the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    /// Page title from its `title:` line, if any.
    pub name: Option<String>,
    /// Resolved type label.
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Output filename inside `Documents/` (`"{n}.html"`).
    pub path: String,
}

impl OutputFile {
    /// Filename for the `index`-th emitted page of a run.
    pub fn file_name(index: usize) -> String {
        format!("{index}.html")
    }
}

// ---------------------------------------------------------------------------
// DocsetLayout
// ---------------------------------------------------------------------------

/// Paths inside a `{name}.docset` bundle.
///
/// ```text
/// <root>/<name>.docset/
/// ├── icon.png
/// └── Contents/
///     ├── Info.plist
///     └── Resources/
///         ├── docSet.dsidx
///         └── Documents/
///             ├── 0.html
///             └── ...
/// ```
#[derive(Debug, Clone)]
pub struct DocsetLayout {
    bundle: PathBuf,
}

impl DocsetLayout {
    pub fn new(output_root: &Path, docset_name: &str) -> Self {
        Self {
            bundle: output_root.join(format!("{docset_name}.docset")),
        }
    }

    pub fn bundle_dir(&self) -> &Path {
        &self.bundle
    }

    pub fn contents_dir(&self) -> PathBuf {
        self.bundle.join("Contents")
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.contents_dir().join("Resources")
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.resources_dir().join("Documents")
    }

    pub fn info_plist(&self) -> PathBuf {
        self.contents_dir().join("Info.plist")
    }

    pub fn index_path(&self) -> PathBuf {
        self.resources_dir().join("docSet.dsidx")
    }

    pub fn icon_path(&self) -> PathBuf {
        self.bundle.join("icon.png")
    }
}
