//! Source file discovery.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use assay_foundation::{Error, Result};

/// Extension of tree notation files picked up from directories.
pub const EXTENSION: &str = "sexp";

/// Expands `paths` into the files to analyze, stopping at the first path
/// that cannot be expanded.
///
/// # Errors
/// Returns the error of the first path [`sources_for`] rejects.
pub fn collect_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for path in paths {
        sources.extend(sources_for(path)?);
    }
    Ok(sources)
}

/// Expands one path into the files to analyze.
///
/// A file is kept as given, whatever its extension. A directory is walked
/// recursively for `*.sexp` files, in sorted order.
///
/// # Errors
/// Returns an I/O error for a path that does not exist or a directory that
/// cannot be walked.
pub fn sources_for(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        walk_dir(path)
    } else if path.exists() {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(Error::io(
            path.display().to_string(),
            &io::Error::from(io::ErrorKind::NotFound),
        ))
    }
}

fn walk_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| Error::io(dir.display().to_string(), &io::Error::from(e)))?;
        if entry.file_type().is_file() && has_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    tracing::debug!(dir = %dir.display(), files = files.len(), "walked");
    Ok(files)
}

fn has_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION))
}
