//! Binary entry point for `fs-transact`.

use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = fs_transact::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
