pub mod apply;

use crate::cli::Command;
use crate::error::Result;
use crate::tools::{directory, file, find};
use crate::txn::TransactionManager;

/// Executes a parsed CLI command and prints the tool's textual result.
///
/// Direct subcommands run their tool without an active transaction, so the
/// journal stays out of the way; `apply` wraps a whole script in one.
pub fn execute(command: Command) -> Result<()> {
    let mut txn = TransactionManager::new();

    match command {
        Command::Read { path } => {
            // Content verbatim; no trailing newline of our own.
            print!("{}", file::read_file(&path)?);
        }
        Command::Write { path, content } => {
            println!("{}", file::write_file(&mut txn, &path, &content)?);
        }
        Command::Append { path, content } => {
            println!("{}", file::append_file(&mut txn, &path, &content)?);
        }
        Command::Delete { path } => {
            println!("{}", file::delete_file(&mut txn, &path)?);
        }
        Command::Mkdir { path, parents } => {
            let message = if parents {
                directory::create_directories(&mut txn, &path)?
            } else {
                directory::create_directory(&mut txn, &path)?
            };
            println!("{message}");
        }
        Command::Rmdir { path, recursive } => {
            println!("{}", directory::delete_directory(&mut txn, &path, recursive)?);
        }
        Command::Ls { path, files, dirs } => {
            let listing = if files {
                directory::list_files(&path)?
            } else if dirs {
                directory::list_directories(&path)?
            } else {
                directory::list_directory(&path)?
            };
            println!("{listing}");
        }
        Command::Find {
            dir,
            name,
            ext,
            contains,
        } => {
            if let Some(text) = contains {
                println!("{}", find::search_contents(&dir, &text, ext.as_deref())?);
            } else if let Some(ext) = ext {
                println!("{}", find::find_by_extension(&dir, &ext)?);
            } else if let Some(pattern) = name {
                println!("{}", find::find_by_name(&dir, &pattern)?);
            }
        }
        Command::Apply { script, keep } => {
            apply::execute(&script, keep)?;
        }
    }

    Ok(())
}
