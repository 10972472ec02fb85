//! File and directory tool operations.
//!
//! The mutating tools take a [`TransactionManager`](crate::txn::TransactionManager)
//! and report through its tracking hooks before and after touching the
//! filesystem; read-only tools never interact with the journal. Every tool
//! returns `Result<String>`: a human-readable success message, or an error
//! the caller renders as text.

pub mod directory;
pub mod file;
pub mod find;
