// fluxbitc-cli/src/main.rs
//
// Entry point for the fluxbitc binary: parse arguments, set up logging,
// run the encode and exit with its code.

use clap::Parser;
use fluxbitc_cli::logging::init_logging;
use fluxbitc_cli::{Cli, run_encode, terminal};
use std::process;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match run_encode(&cli) {
        Ok(code) => code,
        Err(e) => {
            terminal::print_fatal(&e.to_string());
            1
        }
    };
    process::exit(code);
}
