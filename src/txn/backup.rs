//! Snapshot storage for transactional undo.
//!
//! Snapshots live as sibling artifacts next to the paths they protect:
//! `<path>.backup` for a file about to be overwritten, `<path>.removed` for a
//! file or directory about to be deleted. The naming convention is confined
//! to this type so it can be swapped for a dedicated backup directory without
//! touching the journal or the lifecycle logic.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix appended to a file's path for its pre-modification snapshot.
pub const BACKUP_SUFFIX: &str = "backup";

/// Suffix appended to an item's path for its pre-deletion snapshot.
pub const REMOVED_SUFFIX: &str = "removed";

/// Produces, restores and discards the on-disk snapshots used to undo
/// tracked mutations.
#[derive(Debug, Default)]
pub struct BackupStore;

impl BackupStore {
    pub fn new() -> Self {
        Self
    }

    /// Sibling path holding the pre-modification snapshot of `path`.
    pub fn backup_path(&self, path: &Path) -> PathBuf {
        sibling(path, BACKUP_SUFFIX)
    }

    /// Sibling path holding the pre-deletion snapshot of `path`.
    pub fn removed_path(&self, path: &Path) -> PathBuf {
        sibling(path, REMOVED_SUFFIX)
    }

    /// Byte-exact snapshot of a single file.
    pub fn snapshot_file(&self, src: &Path, dst: &Path) -> io::Result<()> {
        fs::copy(src, dst).map(|_| ())
    }

    /// Snapshot of a file, or of a whole directory subtree.
    pub fn snapshot(&self, src: &Path, dst: &Path) -> io::Result<()> {
        if src.is_dir() {
            copy_tree(src, dst)
        } else {
            self.snapshot_file(src, dst)
        }
    }

    /// Copies a snapshot back over the original path, overwriting whatever
    /// is there.
    pub fn restore(&self, backup: &Path, original: &Path, is_dir: bool) -> io::Result<()> {
        if is_dir {
            copy_tree(backup, original)
        } else {
            fs::copy(backup, original).map(|_| ())
        }
    }

    /// Deletes a snapshot artifact, recursively when it is a directory.
    pub fn discard(&self, backup: &Path) -> io::Result<()> {
        if backup.is_dir() {
            remove_tree(backup)
        } else {
            fs::remove_file(backup)
        }
    }
}

/// Appends `.suffix` to the full path, `x/y.txt` -> `x/y.txt.backup`.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".");
    os.push(suffix);
    PathBuf::from(os)
}

/// Copies the directory tree at `src` into `dst`, creating `dst`.
///
/// Work-list traversal; deep trees stay off the call stack.
fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    let mut pending = vec![(src.to_path_buf(), dst.to_path_buf())];

    while let Some((from, to)) = pending.pop() {
        fs::create_dir_all(&to)?;

        for entry in fs::read_dir(&from)? {
            let entry = entry?;
            let from_path = entry.path();
            let to_path = to.join(entry.file_name());

            if entry.file_type()?.is_dir() {
                pending.push((from_path, to_path));
            } else {
                fs::copy(&from_path, &to_path)?;
            }
        }
    }

    Ok(())
}

/// Removes the directory tree at `root`, children before parents.
fn remove_tree(root: &Path) -> io::Result<()> {
    let mut dirs = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                pending.push(entry.path());
            } else {
                fs::remove_file(entry.path())?;
            }
        }
        dirs.push(dir);
    }

    // A directory is always listed before anything inside it, so the
    // reversed order empties child before parent.
    for dir in dirs.iter().rev() {
        fs::remove_dir(dir)?;
    }

    Ok(())
}
