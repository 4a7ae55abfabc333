use crate::error::OrganizerError;
use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Get file extension from path (without the dot), case preserved
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_string())
}

/// Check whether `path` names a note with the given extension. The match is
/// case-sensitive: `NOTE.MD` is not an `md` note.
pub fn is_note_file(path: &Path, extension: &str) -> bool {
    path.is_file()
        && get_extension(path)
            .map(|ext| ext == extension.trim_start_matches('.'))
            .unwrap_or(false)
}

/// Snapshot the immediate entries of `dir`, sorted by name
pub fn snapshot_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
            OrganizerError::filesystem(path, source)
        })?;
        entries.push(entry.into_path());
    }
    Ok(entries)
}

/// Names of the immediate subdirectories of `dir`, sorted
pub fn list_subdirectories(dir: &Path) -> Result<Vec<String>> {
    Ok(snapshot_entries(dir)?
        .into_iter()
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
        })
        .collect())
}

/// Percentage of `index` over `total`, 0 when there is nothing to count
pub fn progress_percent(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    index as f64 / total as f64 * 100.0
}
