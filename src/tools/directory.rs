//! Directory tool operations.
//!
//! Creation and deletion report to the [`TransactionManager`]; the listing
//! operations are stateless.

use std::fs;
use std::path::Path;

use crate::error::{Result, TransactError};
use crate::tools::file::missing_levels;
use crate::txn::TransactionManager;

/// Creates a single directory level.
///
/// An already-present directory is observed as pre-existing and reported as
/// success; a file at the path is an error. The parent must exist.
pub fn create_directory(txn: &mut TransactionManager, path: &Path) -> Result<String> {
    log::debug!("Creating directory: {}", path.display());

    if path.exists() {
        return if path.is_dir() {
            observe_existing_directory(txn, path);
            Ok(format!("Directory already exists: {}", path.display()))
        } else {
            Err(TransactError::FileExists(path.to_path_buf()))
        };
    }

    fs::create_dir(path)?;
    txn.track_directory_creation(path);

    log::debug!("Created directory: {}", path.display());
    Ok(format!("Successfully created directory: {}", path.display()))
}

/// Creates a directory and every missing parent, tracking each new level
/// individually so rollback can remove exactly the levels this call added.
pub fn create_directories(txn: &mut TransactionManager, path: &Path) -> Result<String> {
    log::debug!("Creating directories (including parents): {}", path.display());

    if path.exists() {
        return if path.is_dir() {
            observe_existing_directory(txn, path);
            Ok(format!("Directory already exists: {}", path.display()))
        } else {
            Err(TransactError::FileExists(path.to_path_buf()))
        };
    }

    let levels = missing_levels(path);
    fs::create_dir_all(path)?;
    for level in &levels {
        txn.track_directory_creation(level);
    }

    log::debug!("Created directories: {}", path.display());
    Ok(format!("Successfully created directories: {}", path.display()))
}

/// Deletes a directory.
///
/// Without `recursive` the directory must be empty. With it, the whole
/// subtree is snapshotted (when pre-existing) and removed.
pub fn delete_directory(txn: &mut TransactionManager, path: &Path, recursive: bool) -> Result<String> {
    log::debug!("Deleting directory: {}", path.display());

    if !path.exists() {
        return Err(TransactError::DirectoryNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(TransactError::NotADirectory(path.to_path_buf()));
    }
    if !recursive && fs::read_dir(path)?.next().is_some() {
        return Err(TransactError::DirectoryNotEmpty(path.to_path_buf()));
    }

    txn.track_item_deletion(path);

    if recursive {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_dir(path)?;
    }

    log::debug!("Deleted directory: {}", path.display());
    Ok(format!("Successfully deleted directory: {}", path.display()))
}

/// Lists a directory's entries with `[DIR]`/`[FILE]` markers, sorted.
pub fn list_directory(path: &Path) -> Result<String> {
    log::debug!("Listing contents of directory: {}", path.display());

    let mut entries = Vec::new();
    for entry in read_dir_checked(path)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() {
            entries.push(format!("[DIR] {name}"));
        } else {
            entries.push(format!("[FILE] {name}{}", size_suffix(&entry)));
        }
    }
    entries.sort();

    if entries.is_empty() {
        Ok(format!("Directory is empty: {}", path.display()))
    } else {
        Ok(format!(
            "Directory contents for {}:\n{}",
            path.display(),
            entries.join("\n")
        ))
    }
}

/// Lists only the regular files in a directory.
pub fn list_files(path: &Path) -> Result<String> {
    log::debug!("Listing files in directory: {}", path.display());

    let mut files = Vec::new();
    for entry in read_dir_checked(path)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            let name = entry.file_name().to_string_lossy().into_owned();
            files.push(format!("{name}{}", size_suffix(&entry)));
        }
    }
    files.sort();

    if files.is_empty() {
        Ok(format!("No files found in directory: {}", path.display()))
    } else {
        Ok(format!("Files in {}:\n{}", path.display(), files.join("\n")))
    }
}

/// Lists only the subdirectories of a directory.
pub fn list_directories(path: &Path) -> Result<String> {
    log::debug!("Listing subdirectories in: {}", path.display());

    let mut dirs = Vec::new();
    for entry in read_dir_checked(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    dirs.sort();

    if dirs.is_empty() {
        Ok(format!("No subdirectories found in: {}", path.display()))
    } else {
        Ok(format!(
            "Subdirectories in {}:\n{}",
            path.display(),
            dirs.join("\n")
        ))
    }
}

/// A directory that exists and was not created by the active transaction
/// predates it.
fn observe_existing_directory(txn: &mut TransactionManager, path: &Path) {
    if !txn.was_directory_created_during_transaction(path) {
        txn.track_pre_existing_directory(path);
    }
}

fn read_dir_checked(path: &Path) -> Result<fs::ReadDir> {
    if !path.exists() {
        return Err(TransactError::DirectoryNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(TransactError::NotADirectory(path.to_path_buf()));
    }
    Ok(fs::read_dir(path)?)
}

fn size_suffix(entry: &fs::DirEntry) -> String {
    match entry.metadata() {
        Ok(metadata) => format!(" ({} bytes)", metadata.len()),
        Err(_) => " (size unknown)".to_string(),
    }
}
