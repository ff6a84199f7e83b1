//! Depth-first listing of a documentation tree.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use dashify_shared::{DashifyError, Result};

/// Lazily list every non-directory entry under `root`.
///
/// Directories are descended into, never yielded. Entries come in directory
/// listing order, which is filesystem-defined and not sorted. An unreadable
/// directory surfaces as an `Err` item at the point it is reached.
pub fn walk_files(root: &Path) -> Result<impl Iterator<Item = Result<PathBuf>>> {
    let meta = std::fs::metadata(root).map_err(|e| DashifyError::io(root, e))?;
    if !meta.is_dir() {
        return Err(DashifyError::io(
            root,
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "markdown root is not a directory"),
        ));
    }

    let root = root.to_path_buf();
    let walker = WalkDir::new(&root).min_depth(1).into_iter();

    Ok(walker.filter_map(move |entry| match entry {
        Ok(entry) if entry.file_type().is_dir() => None,
        Ok(entry) => Some(Ok(entry.into_path())),
        Err(err) => {
            let path = err.path().unwrap_or(&root).to_path_buf();
            Some(Err(DashifyError::io(path, std::io::Error::from(err))))
        }
    }))
}
