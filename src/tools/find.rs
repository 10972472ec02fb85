//! File search tools: by name, by extension, by content.
//!
//! All stateless; searches walk the tree with `walkdir` and match
//! case-insensitively, the way agent callers phrase queries.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, TransactError};

/// Finds files whose name contains `pattern` (case-insensitive).
pub fn find_by_name(dir: &Path, pattern: &str) -> Result<String> {
    log::debug!(
        "Finding files with pattern '{}' in directory: {}",
        pattern,
        dir.display()
    );

    let needle = pattern.to_lowercase();
    let matches = walk_files(dir, |path| {
        path.file_name()
            .is_some_and(|name| name.to_string_lossy().to_lowercase().contains(&needle))
    })?;

    Ok(render_matches(
        matches,
        &format!("No files found matching pattern '{pattern}' in directory: {}", dir.display()),
    ))
}

/// Finds files with the given extension; a missing leading dot is added.
pub fn find_by_extension(dir: &Path, extension: &str) -> Result<String> {
    let normalized = if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    };
    log::debug!(
        "Finding files with extension '{}' in directory: {}",
        normalized,
        dir.display()
    );

    let suffix = normalized.to_lowercase();
    let matches = walk_files(dir, |path| {
        path.file_name()
            .is_some_and(|name| name.to_string_lossy().to_lowercase().ends_with(&suffix))
    })?;

    Ok(render_matches(
        matches,
        &format!(
            "No files found with extension '{normalized}' in directory: {}",
            dir.display()
        ),
    ))
}

/// Finds files whose contents contain `text` (case-insensitive), optionally
/// restricted to an extension. Unreadable files are logged and skipped.
pub fn search_contents(dir: &Path, text: &str, extension: Option<&str>) -> Result<String> {
    log::debug!(
        "Searching for text '{}' in files in directory: {}",
        text,
        dir.display()
    );

    let needle = text.to_lowercase();
    let suffix = extension.map(|ext| {
        if ext.starts_with('.') {
            ext.to_lowercase()
        } else {
            format!(".{}", ext.to_lowercase())
        }
    });

    let matches = walk_files(dir, |path| {
        if let Some(suffix) = &suffix {
            let name = match path.file_name() {
                Some(name) => name.to_string_lossy().to_lowercase(),
                None => return false,
            };
            if !name.ends_with(suffix) {
                return false;
            }
        }
        match fs::read_to_string(path) {
            Ok(content) => content.to_lowercase().contains(&needle),
            Err(e) => {
                log::warn!("Could not read file {}: {}", path.display(), e);
                false
            }
        }
    })?;

    if matches.is_empty() {
        Ok(format!(
            "No files found containing text '{text}' in directory: {}",
            dir.display()
        ))
    } else {
        Ok(format!(
            "Found {} files containing '{text}':\n{}",
            matches.len(),
            matches.join("\n")
        ))
    }
}

fn walk_files(dir: &Path, mut matcher: impl FnMut(&Path) -> bool) -> Result<Vec<String>> {
    if !dir.exists() {
        return Err(TransactError::DirectoryNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(TransactError::NotADirectory(dir.to_path_buf()));
    }

    let mut matches = Vec::new();
    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_map(walkdir::Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        if matcher(entry.path()) {
            matches.push(entry.path().display().to_string());
        }
    }
    matches.sort();
    Ok(matches)
}

fn render_matches(matches: Vec<String>, empty_message: &str) -> String {
    if matches.is_empty() {
        empty_message.to_string()
    } else {
        format!("Found {} files:\n{}", matches.len(), matches.join("\n"))
    }
}
