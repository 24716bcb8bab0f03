// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

mod artifacts;
mod cmd;
mod export;
mod ingest;
mod schema;

use clap::Parser;
use cmd::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cmd::run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
