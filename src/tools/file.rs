//! File tool operations.
//!
//! The stateful operations (`write_file`, `append_file`, `delete_file`)
//! report to the [`TransactionManager`] around their mutation: observe and
//! snapshot a pre-existing target first, mutate, then record a creation.
//! `read_file` is stateless and never touches the journal. An I/O failure in
//! the mutation itself surfaces as an error; hook entries recorded for the
//! sub-steps that already succeeded stay intact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, TransactError};
use crate::txn::TransactionManager;

/// Reads the contents of a file.
pub fn read_file(path: &Path) -> Result<String> {
    log::debug!("Reading file: {}", path.display());

    if !path.exists() {
        return Err(TransactError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(TransactError::NotAFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    log::debug!("Read {} bytes from file: {}", content.len(), path.display());
    Ok(content)
}

/// Writes `content` to `path`, creating missing parent directories.
///
/// An existing pre-existing target is snapshotted before the overwrite.
/// Literal `\n`, `\t`, `\r`, `\"` and `\\` sequences in `content` are
/// expanded first; agent callers routinely emit them.
pub fn write_file(txn: &mut TransactionManager, path: &Path, content: &str) -> Result<String> {
    log::debug!("Writing to file: {}", path.display());

    let existed = path.exists();
    if existed {
        if txn.was_file_created_during_transaction(path) {
            log::debug!(
                "Skipping backup for file created during transaction: {}",
                path.display()
            );
        } else {
            txn.track_pre_existing_file(path);
            txn.track_file_modification(path);
        }
    }

    ensure_parent(txn, path)?;

    fs::write(path, unescape_content(content))?;

    if !existed {
        txn.track_file_creation(path);
    }

    log::debug!("Wrote {} characters to file: {}", content.len(), path.display());
    Ok(format!("Successfully wrote content to file: {}", path.display()))
}

/// Appends `content` to `path`, creating the file (and missing parents) if
/// needed. Same tracking discipline as [`write_file`].
pub fn append_file(txn: &mut TransactionManager, path: &Path, content: &str) -> Result<String> {
    log::debug!("Appending to file: {}", path.display());

    let existed = path.exists();
    if existed {
        if txn.was_file_created_during_transaction(path) {
            log::debug!(
                "Skipping backup for file created during transaction: {}",
                path.display()
            );
        } else {
            txn.track_pre_existing_file(path);
            txn.track_file_modification(path);
        }
    }

    ensure_parent(txn, path)?;

    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(unescape_content(content).as_bytes())?;

    if !existed {
        txn.track_file_creation(path);
    }

    log::debug!(
        "Appended {} characters to file: {}",
        content.len(),
        path.display()
    );
    Ok(format!("Successfully appended content to file: {}", path.display()))
}

/// Deletes a file.
pub fn delete_file(txn: &mut TransactionManager, path: &Path) -> Result<String> {
    log::debug!("Deleting file: {}", path.display());

    if !path.exists() {
        return Err(TransactError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(TransactError::NotAFile(path.to_path_buf()));
    }

    txn.track_item_deletion(path);
    fs::remove_file(path)?;

    log::debug!("Deleted file: {}", path.display());
    Ok(format!("Successfully deleted file: {}", path.display()))
}

/// Creates any missing parents of `path`, tracking each new level
/// individually; a parent that is already present is observed as
/// pre-existing instead.
fn ensure_parent(txn: &mut TransactionManager, path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    if parent.exists() {
        if !txn.was_directory_created_during_transaction(parent) {
            txn.track_pre_existing_directory(parent);
        }
        return Ok(());
    }

    let levels = missing_levels(parent);
    fs::create_dir_all(parent)?;
    for level in &levels {
        txn.track_directory_creation(level);
    }
    log::debug!("Created parent directories for: {}", path.display());
    Ok(())
}

/// Ancestor chain of `dir` that does not exist yet, shallowest first.
pub(crate) fn missing_levels(dir: &Path) -> Vec<PathBuf> {
    let mut levels = Vec::new();
    let mut current = Some(dir);

    while let Some(path) = current {
        if path.as_os_str().is_empty() || path.exists() {
            break;
        }
        levels.push(path.to_path_buf());
        current = path.parent();
    }

    levels.reverse();
    levels
}

/// Expands the literal escape sequences agent callers tend to emit.
///
/// `\n`, `\t`, `\r`, `\"` and `\\` become their characters; a single
/// trailing backslash is dropped.
pub(crate) fn unescape_content(content: &str) -> String {
    let processed = content
        .replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\r", "\r")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\");

    match processed.strip_suffix('\\') {
        Some(stripped) => stripped.to_string(),
        None => processed,
    }
}
