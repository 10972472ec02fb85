//! Transactional filesystem mutation tracking.
//!
//! Lets a tool-driven caller perform an unbounded sequence of file and
//! directory mutations, then commit them permanently or roll every one of
//! them back to the exact pre-transaction state.
//!
//! ## Phases
//!
//! 1. **Start**: [`TransactionManager::start`] opens a fresh [`Journal`]
//! 2. **Track**: tool operations report through the hooks around each
//!    mutation; pre-existing artifacts get snapshots in the [`BackupStore`]
//! 3. **Commit**: snapshots are discarded, mutations stay
//! 4. **Rollback**: the journal is replayed in reverse, snapshots restore
//!    the original content

pub mod backup;
pub mod journal;
pub mod manager;

pub use backup::BackupStore;
pub use journal::{DeletedItem, Journal, ModifiedFile};
pub use manager::TransactionManager;
