#![doc = include_str!("../README.md")]

pub mod cli;
pub mod command;
pub mod error;
pub mod tools;
pub mod txn;

pub use error::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<()> {
    use clap::Parser;

    let cli = cli::Cli::parse();
    command::execute(cli.command)
}
