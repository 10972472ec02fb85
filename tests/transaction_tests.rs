//! Transaction behavior through the library API: tool operations tracked by
//! an active transaction, then committed or rolled back.

use std::fs;
use std::path::Path;

use fs_transact::tools::{directory, file};
use fs_transact::txn::TransactionManager;
use tempfile::TempDir;

fn backup_of(path: &Path) -> std::path::PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".backup");
    os.into()
}

fn removed_of(path: &Path) -> std::path::PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".removed");
    os.into()
}

#[test]
fn commit_keeps_created_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("test-file.txt");

    let mut txn = TransactionManager::new();
    txn.start();

    let message = file::write_file(&mut txn, &target, "test content").unwrap();
    assert!(message.starts_with("Successfully wrote content"));
    assert_eq!(fs::read_to_string(&target).unwrap(), "test content");

    assert!(txn.commit());
    assert_eq!(fs::read_to_string(&target).unwrap(), "test content");
}

#[test]
fn rollback_removes_created_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("test-file.txt");

    let mut txn = TransactionManager::new();
    txn.start();

    file::write_file(&mut txn, &target, "test content").unwrap();
    assert!(target.exists());

    assert!(txn.rollback());
    assert!(!target.exists());
}

#[test]
fn commit_keeps_modification_and_discards_backup() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("existing-file.txt");
    fs::write(&target, "original content").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    file::write_file(&mut txn, &target, "modified content").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "modified content");

    txn.commit();
    assert_eq!(fs::read_to_string(&target).unwrap(), "modified content");
    assert!(!backup_of(&target).exists());
}

#[test]
fn rollback_restores_modified_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("existing-file.txt");
    fs::write(&target, "original content").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    file::write_file(&mut txn, &target, "modified content").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "modified content");

    txn.rollback();
    assert_eq!(fs::read_to_string(&target).unwrap(), "original content");
    assert!(!backup_of(&target).exists());
}

#[test]
fn repeated_writes_and_appends_restore_original_content() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("churn.txt");
    fs::write(&target, "original").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    file::write_file(&mut txn, &target, "v1").unwrap();
    file::append_file(&mut txn, &target, " more").unwrap();
    file::write_file(&mut txn, &target, "v2").unwrap();
    file::append_file(&mut txn, &target, " again").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "v2 again");

    txn.rollback();
    assert_eq!(fs::read_to_string(&target).unwrap(), "original");
    assert!(!backup_of(&target).exists());
}

#[test]
fn commit_keeps_file_deletion_and_discards_snapshot() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("file-to-delete.txt");
    fs::write(&target, "content to delete").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    let message = file::delete_file(&mut txn, &target).unwrap();
    assert!(message.starts_with("Successfully deleted file"));
    assert!(!target.exists());

    txn.commit();
    assert!(!target.exists());
    assert!(!removed_of(&target).exists());
}

#[test]
fn rollback_restores_deleted_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("file-to-delete.txt");
    fs::write(&target, "content to delete").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    file::delete_file(&mut txn, &target).unwrap();
    assert!(!target.exists());

    txn.rollback();
    assert_eq!(fs::read_to_string(&target).unwrap(), "content to delete");
    assert!(!removed_of(&target).exists());
}

#[test]
fn rollback_removes_created_directory() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("test-directory");

    let mut txn = TransactionManager::new();
    txn.start();

    let message = directory::create_directory(&mut txn, &dir).unwrap();
    assert!(message.starts_with("Successfully created directory"));
    assert!(dir.is_dir());

    txn.rollback();
    assert!(!dir.exists());
}

#[test]
fn commit_keeps_nested_directory_creation() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("level1/level2/level3");

    let mut txn = TransactionManager::new();
    txn.start();

    let message = directory::create_directories(&mut txn, &nested).unwrap();
    assert!(message.starts_with("Successfully created directories"));
    assert!(nested.is_dir());

    txn.commit();
    assert!(nested.is_dir());
    assert!(temp.path().join("level1").is_dir());
    assert!(temp.path().join("level1/level2").is_dir());
}

#[test]
fn rollback_removes_every_created_directory_level() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("level1/level2/level3");

    let mut txn = TransactionManager::new();
    txn.start();

    directory::create_directories(&mut txn, &nested).unwrap();
    assert!(nested.is_dir());

    txn.rollback();
    assert!(!nested.exists());
    assert!(!temp.path().join("level1/level2").exists());
    assert!(!temp.path().join("level1").exists());
}

#[test]
fn rollback_preserves_pre_existing_directory_levels() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("base");
    fs::create_dir(&base).unwrap();
    fs::write(base.join("untouched.txt"), "stays").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    file::write_file(&mut txn, &base.join("fresh/deep/file.txt"), "x").unwrap();

    txn.rollback();
    assert!(!base.join("fresh").exists());
    assert!(base.is_dir());
    assert_eq!(fs::read_to_string(base.join("untouched.txt")).unwrap(), "stays");
}

#[test]
fn commit_keeps_directory_deletion() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("directory-to-delete");
    fs::create_dir(&dir).unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    let message = directory::delete_directory(&mut txn, &dir, false).unwrap();
    assert!(message.starts_with("Successfully deleted directory"));
    assert!(!dir.exists());

    txn.commit();
    assert!(!dir.exists());
    assert!(!removed_of(&dir).exists());
}

#[test]
fn rollback_restores_deleted_empty_directory() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("directory-to-delete");
    fs::create_dir(&dir).unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    directory::delete_directory(&mut txn, &dir, false).unwrap();
    assert!(!dir.exists());

    txn.rollback();
    assert!(dir.is_dir());
    assert!(!removed_of(&dir).exists());
}

#[test]
fn rollback_restores_deleted_subtree_byte_for_byte() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    fs::create_dir_all(root.join("src/nested")).unwrap();
    fs::write(root.join("readme.md"), "# project").unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
    fs::write(root.join("src/nested/util.rs"), "pub fn util() {}").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    directory::delete_directory(&mut txn, &root, true).unwrap();
    assert!(!root.exists());

    txn.rollback();
    assert_eq!(fs::read_to_string(root.join("readme.md")).unwrap(), "# project");
    assert_eq!(
        fs::read_to_string(root.join("src/main.rs")).unwrap(),
        "fn main() {}"
    );
    assert_eq!(
        fs::read_to_string(root.join("src/nested/util.rs")).unwrap(),
        "pub fn util() {}"
    );
    assert!(!removed_of(&root).exists());
}

#[test]
fn complex_transaction_rolls_back_every_operation() {
    let temp = TempDir::new().unwrap();
    let existing_file = temp.path().join("existing.txt");
    fs::write(&existing_file, "original content").unwrap();
    let existing_dir = temp.path().join("existing-dir");
    fs::create_dir(&existing_dir).unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    let new_file = temp.path().join("new-file.txt");
    let new_dir = temp.path().join("new-directory");

    file::write_file(&mut txn, &new_file, "new content").unwrap();
    file::write_file(&mut txn, &existing_file, "modified content").unwrap();
    directory::create_directory(&mut txn, &new_dir).unwrap();
    directory::delete_directory(&mut txn, &existing_dir, false).unwrap();

    assert!(new_file.exists());
    assert_eq!(fs::read_to_string(&existing_file).unwrap(), "modified content");
    assert!(new_dir.is_dir());
    assert!(!existing_dir.exists());

    txn.rollback();

    assert!(!new_file.exists());
    assert_eq!(fs::read_to_string(&existing_file).unwrap(), "original content");
    assert!(!new_dir.exists());
    assert!(existing_dir.is_dir());
}

#[test]
fn operations_work_without_active_transaction() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("no-transaction.txt");
    let dir = temp.path().join("no-transaction-dir");

    let mut txn = TransactionManager::new();
    let write_message = file::write_file(&mut txn, &target, "content").unwrap();
    let mkdir_message = directory::create_directory(&mut txn, &dir).unwrap();

    assert!(write_message.starts_with("Successfully wrote content"));
    assert!(mkdir_message.starts_with("Successfully created directory"));
    assert_eq!(fs::read_to_string(&target).unwrap(), "content");
    assert!(dir.is_dir());
}

#[test]
fn read_operations_never_touch_the_journal() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("readable-file.txt");
    fs::write(&target, "readable content").unwrap();

    let content = file::read_file(&target).unwrap();
    let listing = directory::list_directory(temp.path()).unwrap();

    assert_eq!(content, "readable content");
    assert!(listing.contains("readable-file.txt"));
}

#[test]
fn rollback_mixed_modified_and_created_files() {
    let temp = TempDir::new().unwrap();
    let existing = temp.path().join("existing-file.txt");
    fs::write(&existing, "original content before transaction").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    let new_file = temp.path().join("new-file.txt");
    file::write_file(&mut txn, &new_file, "content of new file").unwrap();
    file::write_file(&mut txn, &existing, "modified content during transaction").unwrap();
    // Editing the just-created file must not produce a backup.
    file::write_file(&mut txn, &new_file, "updated content of new file").unwrap();

    assert_eq!(
        fs::read_to_string(&existing).unwrap(),
        "modified content during transaction"
    );
    assert_eq!(
        fs::read_to_string(&new_file).unwrap(),
        "updated content of new file"
    );
    assert!(!backup_of(&new_file).exists());

    txn.rollback();

    assert_eq!(
        fs::read_to_string(&existing).unwrap(),
        "original content before transaction"
    );
    assert!(!backup_of(&existing).exists());
    assert!(!new_file.exists());
}

#[test]
fn rollback_mixed_with_new_file_in_auto_created_directory() {
    let temp = TempDir::new().unwrap();
    let existing = temp.path().join("existing-file.txt");
    fs::write(&existing, "original content before transaction").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    let new_file = temp.path().join("new-directory/new-file.txt");
    file::write_file(&mut txn, &new_file, "content of new file").unwrap();
    file::write_file(&mut txn, &existing, "modified content during transaction").unwrap();
    file::write_file(&mut txn, &new_file, "updated content of new file").unwrap();

    txn.rollback();

    assert_eq!(
        fs::read_to_string(&existing).unwrap(),
        "original content before transaction"
    );
    assert!(!backup_of(&existing).exists());
    assert!(!new_file.exists());
    assert!(!temp.path().join("new-directory").exists());
}

#[test]
fn rollback_mixed_with_explicitly_created_directory() {
    let temp = TempDir::new().unwrap();
    let existing = temp.path().join("existing-file.txt");
    fs::write(&existing, "original content before transaction").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    let new_dir = temp.path().join("new-directory");
    directory::create_directory(&mut txn, &new_dir).unwrap();

    let new_file = new_dir.join("new-file.txt");
    file::write_file(&mut txn, &new_file, "content of new file in new directory").unwrap();
    file::write_file(&mut txn, &existing, "modified content during transaction").unwrap();
    file::write_file(&mut txn, &new_file, "updated content").unwrap();

    txn.rollback();

    assert_eq!(
        fs::read_to_string(&existing).unwrap(),
        "original content before transaction"
    );
    assert!(!new_file.exists());
    assert!(!new_dir.exists());
}

#[test]
fn create_then_delete_leaves_no_trace_after_rollback() {
    let temp = TempDir::new().unwrap();
    let existing = temp.path().join("existing-file.txt");
    fs::write(&existing, "original content before transaction").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    let new_file = temp.path().join("new-file.txt");
    file::write_file(&mut txn, &new_file, "content of new file").unwrap();
    file::write_file(&mut txn, &existing, "modified content during transaction").unwrap();
    file::delete_file(&mut txn, &new_file).unwrap();

    txn.rollback();

    assert_eq!(
        fs::read_to_string(&existing).unwrap(),
        "original content before transaction"
    );
    assert!(!backup_of(&existing).exists());
    assert!(!new_file.exists());
    assert!(!removed_of(&new_file).exists());
    assert!(!backup_of(&new_file).exists());
}

#[test]
fn classification_queries_reflect_journal() {
    let temp = TempDir::new().unwrap();
    let existing_file = temp.path().join("existing.txt");
    fs::write(&existing_file, "original").unwrap();
    let existing_dir = temp.path().join("existing-dir");
    fs::create_dir(&existing_dir).unwrap();

    let mut txn = TransactionManager::new();
    assert!(txn.transaction_start_time().is_none());
    txn.start();
    assert!(txn.transaction_start_time().is_some());

    file::write_file(&mut txn, &existing_file, "edited").unwrap();
    assert!(txn.is_file_pre_existing(&existing_file));
    assert!(!txn.was_file_created_during_transaction(&existing_file));

    directory::create_directory(&mut txn, &existing_dir).unwrap();
    assert!(txn.is_directory_pre_existing(&existing_dir));
    assert!(!txn.was_directory_created_during_transaction(&existing_dir));

    let new_file = temp.path().join("new.txt");
    let new_dir = temp.path().join("new-dir");
    file::write_file(&mut txn, &new_file, "fresh").unwrap();
    directory::create_directory(&mut txn, &new_dir).unwrap();
    assert!(txn.was_file_created_during_transaction(&new_file));
    assert!(txn.was_directory_created_during_transaction(&new_dir));
    assert!(!txn.is_file_pre_existing(&new_file));
    assert!(!txn.is_directory_pre_existing(&new_dir));

    txn.rollback();
    assert!(txn.transaction_start_time().is_none());
}

#[test]
fn tool_failure_leaves_journal_usable() {
    let temp = TempDir::new().unwrap();
    let existing = temp.path().join("existing.txt");
    fs::write(&existing, "original").unwrap();

    let mut txn = TransactionManager::new();
    txn.start();

    file::write_file(&mut txn, &existing, "modified").unwrap();
    // Deleting a path that does not exist fails the tool, not the journal.
    assert!(file::delete_file(&mut txn, &temp.path().join("ghost.txt")).is_err());

    txn.rollback();
    assert_eq!(fs::read_to_string(&existing).unwrap(), "original");
}
