//! Transactional script execution.
//!
//! `apply` reads a line-based script and runs every operation inside one
//! transaction: either the whole script lands, or the first failing
//! operation rolls everything already applied back.
//!
//! One operation per line, `#` starts a comment:
//!
//! ```text
//! mkdirs src/generated
//! write  src/generated/mod.rs pub mod api;\n
//! append CHANGELOG.md regenerated bindings\n
//! delete src/stale.rs
//! rmdir  src/empty
//! rmtree build
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::error::{Result, TransactError};
use crate::tools::{directory, file};
use crate::txn::TransactionManager;

#[derive(Debug)]
enum Op {
    Write { path: PathBuf, content: String },
    Append { path: PathBuf, content: String },
    Delete { path: PathBuf },
    Mkdir { path: PathBuf },
    Mkdirs { path: PathBuf },
    Rmdir { path: PathBuf },
    Rmtree { path: PathBuf },
}

pub fn execute(script: &Path, keep: bool) -> Result<()> {
    let source = fs::read_to_string(script)?;
    let ops = parse(&source)?;

    if ops.is_empty() {
        println!("{}", "Script contains no operations".yellow());
        return Ok(());
    }

    let root = std::env::current_dir()?;
    let mut txn = TransactionManager::new();
    txn.start();

    let mut failure = None;
    for (index, op) in ops.iter().enumerate() {
        match run_op(&mut txn, op) {
            Ok(message) => println!("{message}"),
            Err(e) => {
                failure = Some((index, e));
                break;
            }
        }
    }

    match failure {
        None => {
            txn.print_summary(&root);
            txn.commit();
            println!(
                "{} Applied {} operation{}",
                "✓".green().bold(),
                ops.len(),
                if ops.len() == 1 { "" } else { "s" }
            );
            Ok(())
        }
        Some((index, e)) => {
            eprintln!(
                "{} operation {} failed: {}",
                "Error:".red().bold(),
                index + 1,
                e
            );
            if keep {
                txn.print_summary(&root);
                txn.commit();
                eprintln!("{}", "Kept the operations that succeeded (--keep)".yellow());
            } else {
                eprintln!("{}", "Rolling back...".yellow().bold());
                txn.rollback();
                eprintln!("{}", "✓ Rollback complete".green());
            }
            Err(e)
        }
    }
}

fn run_op(txn: &mut TransactionManager, op: &Op) -> Result<String> {
    match op {
        Op::Write { path, content } => file::write_file(txn, path, content),
        Op::Append { path, content } => file::append_file(txn, path, content),
        Op::Delete { path } => file::delete_file(txn, path),
        Op::Mkdir { path } => directory::create_directory(txn, path),
        Op::Mkdirs { path } => directory::create_directories(txn, path),
        Op::Rmdir { path } => directory::delete_directory(txn, path, false),
        Op::Rmtree { path } => directory::delete_directory(txn, path, true),
    }
}

fn parse(source: &str) -> Result<Vec<Op>> {
    let mut ops = Vec::new();

    for (number, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let script_err = |reason: String| TransactError::Script {
            line: number + 1,
            reason,
        };

        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();
        if rest.is_empty() {
            return Err(script_err("missing path".to_string()));
        }

        let op = match verb {
            "write" | "append" => {
                let (path, content) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let path = PathBuf::from(path);
                let content = content.trim_start().to_string();
                if verb == "write" {
                    Op::Write { path, content }
                } else {
                    Op::Append { path, content }
                }
            }
            "delete" => Op::Delete {
                path: PathBuf::from(rest),
            },
            "mkdir" => Op::Mkdir {
                path: PathBuf::from(rest),
            },
            "mkdirs" => Op::Mkdirs {
                path: PathBuf::from(rest),
            },
            "rmdir" => Op::Rmdir {
                path: PathBuf::from(rest),
            },
            "rmtree" => Op::Rmtree {
                path: PathBuf::from(rest),
            },
            other => return Err(script_err(format!("unknown operation '{other}'"))),
        };
        ops.push(op);
    }

    Ok(ops)
}
