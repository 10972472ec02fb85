//! Transaction lifecycle and mutation tracking.
//!
//! One [`TransactionManager`] owns at most one active [`Journal`]. Tool
//! operations report every mutation through the tracking hooks; `commit`
//! discards the accumulated snapshots and `rollback` replays them in
//! reverse.
//!
//! ## Execution guarantees
//!
//! - **Single transaction**: `start` refuses to stack transactions; the
//!   active journal is an explicit `Option`, not hidden global state.
//! - **Ordering**: rollback removes created files, then created directories,
//!   each in reverse creation order, before restoring modified and deleted
//!   items from their snapshots.
//! - **Best effort**: commit and rollback log per-item failures and keep
//!   going. A snapshot that cannot be restored leaves a log entry naming the
//!   path, not an aborted transaction.
//!
//! All hooks are no-ops while no transaction is active, so tool operations
//! behave normally outside transactions. A hook that hits an I/O error logs
//! it and returns; tracking failures never surface to the tool that called
//! the hook.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use colored::Colorize;

use super::backup::BackupStore;
use super::journal::{DeletedItem, Journal, ModifiedFile};

/// Coordinates one filesystem transaction at a time.
///
/// Paths are journaled exactly as supplied; callers that address one file
/// through several spellings get per-spelling tracking.
#[derive(Debug, Default)]
pub struct TransactionManager {
    active: Option<Journal>,
    store: BackupStore,
}

impl TransactionManager {
    pub fn new() -> Self {
        Self {
            active: None,
            store: BackupStore::new(),
        }
    }

    /// Returns true while a transaction is active.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Begins a new transaction.
    ///
    /// Returns `false` (and leaves the current journal untouched) if one is
    /// already active.
    pub fn start(&mut self) -> bool {
        if self.active.is_some() {
            log::warn!("Transaction already active. Commit or roll back the current transaction first.");
            return false;
        }
        self.active = Some(Journal::new());
        log::debug!("Started transaction");
        true
    }

    /// Makes the tracked mutations permanent and deletes their snapshots.
    ///
    /// Returns `false` if no transaction is active. Snapshot cleanup is
    /// best-effort; failures are logged per artifact.
    pub fn commit(&mut self) -> bool {
        let Some(journal) = self.active.take() else {
            log::warn!("No active transaction to commit");
            return false;
        };

        log::debug!("Committing transaction ({} tracked entries)", journal.len());

        for entry in &journal.modified_files {
            if entry.backup.exists()
                && let Err(e) = self.store.discard(&entry.backup)
            {
                log::warn!("Failed to remove backup {}: {}", entry.backup.display(), e);
            }
        }

        for entry in &journal.deleted_items {
            if entry.backup.exists()
                && let Err(e) = self.store.discard(&entry.backup)
            {
                log::warn!(
                    "Failed to remove removal snapshot {}: {}",
                    entry.backup.display(),
                    e
                );
            }
        }

        true
    }

    /// Reverses every tracked mutation and deletes the consumed snapshots.
    ///
    /// Order: created files (reverse creation order), created directories
    /// (reverse creation order, each only once empty), modified files
    /// (restored from `.backup`), deleted items (restored from `.removed`).
    /// Returns `false` if no transaction is active. Each item is undone
    /// best-effort; a partial failure leaves the remaining items restored
    /// and the failed paths in the log.
    pub fn rollback(&mut self) -> bool {
        let Some(journal) = self.active.take() else {
            log::warn!("No active transaction to roll back");
            return false;
        };

        log::debug!("Rolling back transaction ({} tracked entries)", journal.len());

        for path in journal.created_files.iter().rev() {
            if path.exists() {
                match fs::remove_file(path) {
                    Ok(()) => log::debug!("Removed created file: {}", path.display()),
                    Err(e) => {
                        log::warn!("Failed to remove created file {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Reverse creation order empties child before parent. Anything still
        // inside was not created by this transaction and stays put.
        for path in journal.created_dirs.iter().rev() {
            if path.is_dir() {
                match fs::remove_dir(path) {
                    Ok(()) => log::debug!("Removed created directory: {}", path.display()),
                    Err(e) => {
                        log::warn!(
                            "Failed to remove created directory {}: {}",
                            path.display(),
                            e
                        );
                    }
                }
            }
        }

        for entry in &journal.modified_files {
            if entry.backup.exists() {
                let restored = self
                    .store
                    .restore(&entry.backup, &entry.path, false)
                    .and_then(|()| self.store.discard(&entry.backup));
                match restored {
                    Ok(()) => log::debug!(
                        "Restored file from backup: {} -> {}",
                        entry.backup.display(),
                        entry.path.display()
                    ),
                    Err(e) => log::warn!(
                        "Failed to restore {} from {}: {}",
                        entry.path.display(),
                        entry.backup.display(),
                        e
                    ),
                }
            } else {
                log::warn!("Backup does not exist: {}", entry.backup.display());
            }
        }

        for entry in &journal.deleted_items {
            if entry.backup.exists() {
                let restored = self
                    .store
                    .restore(&entry.backup, &entry.path, entry.is_dir)
                    .and_then(|()| self.store.discard(&entry.backup));
                match restored {
                    Ok(()) => log::debug!(
                        "Restored deleted item: {} -> {}",
                        entry.backup.display(),
                        entry.path.display()
                    ),
                    Err(e) => log::warn!(
                        "Failed to restore deleted item {} from {}: {}",
                        entry.path.display(),
                        entry.backup.display(),
                        e
                    ),
                }
            }
        }

        true
    }

    /// Records a file brought into existence by the active transaction.
    pub fn track_file_creation(&mut self, path: &Path) {
        if let Some(journal) = self.active.as_mut() {
            journal.created_files.push(path.to_path_buf());
            log::debug!("Tracked file creation: {}", path.display());
        }
    }

    /// Records a directory brought into existence by the active transaction.
    pub fn track_directory_creation(&mut self, path: &Path) {
        if let Some(journal) = self.active.as_mut() {
            journal.created_dirs.push(path.to_path_buf());
            log::debug!("Tracked directory creation: {}", path.display());
        }
    }

    /// Records a file that already existed when the transaction began.
    pub fn track_pre_existing_file(&mut self, path: &Path) {
        if let Some(journal) = self.active.as_mut()
            && journal.pre_existing_files.insert(path.to_path_buf())
        {
            log::debug!("Tracked pre-existing file: {}", path.display());
        }
    }

    /// Records a directory that already existed when the transaction began.
    pub fn track_pre_existing_directory(&mut self, path: &Path) {
        if let Some(journal) = self.active.as_mut()
            && journal.pre_existing_dirs.insert(path.to_path_buf())
        {
            log::debug!("Tracked pre-existing directory: {}", path.display());
        }
    }

    /// Snapshots a pre-existing file ahead of an in-transaction write.
    ///
    /// The first modification wins: repeated writes to the same path reuse
    /// the original snapshot, so intermediate content never leaks into the
    /// backup. Files created by this transaction are skipped; undoing their
    /// creation is all the rollback they need.
    pub fn track_file_modification(&mut self, path: &Path) {
        let Some(journal) = self.active.as_mut() else {
            return;
        };
        if !path.exists() {
            return;
        }
        if !journal.pre_existing_files.contains(path) {
            log::debug!(
                "Skipping backup for file created during transaction: {}",
                path.display()
            );
            return;
        }
        if journal.has_backup_for(path) {
            return;
        }

        let backup = self.store.backup_path(path);
        match self.store.snapshot_file(path, &backup) {
            Ok(()) => {
                log::debug!(
                    "Created backup for pre-existing file: {} -> {}",
                    path.display(),
                    backup.display()
                );
                journal.modified_files.push(ModifiedFile {
                    path: path.to_path_buf(),
                    backup,
                });
            }
            Err(e) => log::warn!("Failed to create backup for {}: {}", path.display(), e),
        }
    }

    /// Snapshots a pre-existing item ahead of its deletion.
    ///
    /// An item the active transaction itself created is dropped from the
    /// creation lists instead: create-then-delete collapses to never
    /// happened, and rollback has nothing to do for it.
    pub fn track_item_deletion(&mut self, path: &Path) {
        let Some(journal) = self.active.as_mut() else {
            return;
        };
        if !path.exists() {
            return;
        }

        let created_here = journal.created_files.iter().any(|p| p == path)
            || journal.created_dirs.iter().any(|p| p == path);
        if created_here {
            journal.created_files.retain(|p| p != path);
            journal.created_dirs.retain(|p| p != path);
            log::debug!(
                "Dropped created item from tracking (no snapshot needed): {}",
                path.display()
            );
            return;
        }

        let is_dir = path.is_dir();
        let backup = self.store.removed_path(path);
        match self.store.snapshot(path, &backup) {
            Ok(()) => {
                log::debug!(
                    "Created removal snapshot: {} -> {}",
                    path.display(),
                    backup.display()
                );
                journal.deleted_items.push(DeletedItem {
                    path: path.to_path_buf(),
                    backup,
                    is_dir,
                });
            }
            Err(e) => log::warn!(
                "Failed to snapshot {} before deletion: {}",
                path.display(),
                e
            ),
        }
    }

    /// Whether `path` was recorded as a file that predates the transaction.
    pub fn is_file_pre_existing(&self, path: &Path) -> bool {
        self.active
            .as_ref()
            .is_some_and(|j| j.pre_existing_files.contains(path))
    }

    /// Whether `path` was recorded as a directory that predates the transaction.
    pub fn is_directory_pre_existing(&self, path: &Path) -> bool {
        self.active
            .as_ref()
            .is_some_and(|j| j.pre_existing_dirs.contains(path))
    }

    /// Whether the active transaction created the file at `path`.
    pub fn was_file_created_during_transaction(&self, path: &Path) -> bool {
        self.active
            .as_ref()
            .is_some_and(|j| j.created_files.iter().any(|p| p == path))
    }

    /// Whether the active transaction created the directory at `path`.
    pub fn was_directory_created_during_transaction(&self, path: &Path) -> bool {
        self.active
            .as_ref()
            .is_some_and(|j| j.created_dirs.iter().any(|p| p == path))
    }

    /// Start time of the active transaction, if any.
    pub fn transaction_start_time(&self) -> Option<SystemTime> {
        self.active.as_ref().map(Journal::started_at)
    }

    /// Human-readable one-liners for everything the active transaction
    /// has tracked so far.
    pub fn preview(&self) -> Vec<String> {
        let Some(journal) = self.active.as_ref() else {
            return Vec::new();
        };

        let mut lines = Vec::new();
        for path in &journal.created_dirs {
            lines.push(format!("Create directory: {}", path.display()));
        }
        for path in &journal.created_files {
            lines.push(format!("Create file: {}", path.display()));
        }
        for entry in &journal.modified_files {
            lines.push(format!("Modify: {}", entry.path.display()));
        }
        for entry in &journal.deleted_items {
            let kind = if entry.is_dir { "directory" } else { "file" };
            lines.push(format!("Delete {}: {}", kind, entry.path.display()));
        }
        lines
    }

    /// Prints a categorized summary of the active transaction to stdout.
    ///
    /// Paths are shown relative to `root` with forward slashes.
    pub fn print_summary(&self, root: &Path) {
        let Some(journal) = self.active.as_ref() else {
            return;
        };

        if journal.is_empty() {
            println!("\n{}", "No changes tracked".yellow());
            return;
        }

        let display = |path: &Path| -> String {
            let relative =
                pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
            relative.to_string_lossy().replace('\\', "/")
        };

        println!("\n{}", "Tracked changes:".bold());

        if !journal.created_dirs.is_empty() || !journal.created_files.is_empty() {
            println!("\n{}", "Created".green().bold());
            for path in &journal.created_dirs {
                println!("   {} {}/", "+".green(), display(path));
            }
            for path in &journal.created_files {
                println!("   {} {}", "+".green(), display(path));
            }
        }

        if !journal.modified_files.is_empty() {
            println!("\n{}", "Modified".yellow().bold());
            for entry in &journal.modified_files {
                println!("   {} {}", "~".yellow(), display(&entry.path));
            }
        }

        if !journal.deleted_items.is_empty() {
            println!("\n{}", "Deleted".red().bold());
            for entry in &journal.deleted_items {
                let suffix = if entry.is_dir { "/" } else { "" };
                println!("   {} {}{}", "-".red(), display(&entry.path), suffix);
            }
        }

        let total = journal.len();
        println!(
            "\n{} tracked operation{}",
            total.to_string().cyan().bold(),
            if total == 1 { "" } else { "s" }
        );
    }
}

impl Drop for TransactionManager {
    fn drop(&mut self) {
        if let Some(journal) = self.active.as_ref()
            && !journal.is_empty()
        {
            log::warn!("Transaction dropped without commit or rollback");
        }
    }
}
