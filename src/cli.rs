use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fs-transact", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the contents of a file
    Read { path: PathBuf },

    /// Write content to a file, creating missing parent directories
    ///
    /// Literal \n, \t, \r, \" and \\ sequences in CONTENT are expanded.
    Write { path: PathBuf, content: String },

    /// Append content to a file, creating it if missing
    Append { path: PathBuf, content: String },

    /// Delete a file
    Delete { path: PathBuf },

    /// Create a directory
    Mkdir {
        path: PathBuf,

        /// Create missing parent directories as well
        #[arg(long, short = 'p')]
        parents: bool,
    },

    /// Delete a directory
    Rmdir {
        path: PathBuf,

        /// Delete the directory's contents as well
        #[arg(long, short = 'r')]
        recursive: bool,
    },

    /// List the contents of a directory
    Ls {
        path: PathBuf,

        /// Show only files
        #[arg(long, conflicts_with = "dirs")]
        files: bool,

        /// Show only subdirectories
        #[arg(long)]
        dirs: bool,
    },

    /// Find files under a directory
    #[command(group = ArgGroup::new("matcher").required(true).multiple(true)
        .args(["name", "ext", "contains"]))]
    Find {
        dir: PathBuf,

        /// Match file names containing this pattern (case-insensitive)
        #[arg(long)]
        name: Option<String>,

        /// Match files with this extension
        #[arg(long)]
        ext: Option<String>,

        /// Match files whose contents contain this text
        #[arg(long)]
        contains: Option<String>,
    },

    /// Run a script of operations inside a single transaction
    ///
    /// One operation per line: write, append, delete, mkdir, mkdirs,
    /// rmdir, rmtree. Blank lines and lines starting with # are skipped.
    /// On the first failing operation everything already applied is rolled
    /// back.
    Apply {
        script: PathBuf,

        /// Commit the operations that succeeded instead of rolling back
        #[arg(long)]
        keep: bool,
    },
}
