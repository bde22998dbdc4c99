// ~/privshield/src/main.rs

mod logging;
mod paths;
mod config;
mod error;
mod system;
mod setting;
mod catalog;
mod selection;
mod runner;
mod report;
mod scripts;
mod cli;

use clap::Parser;

use crate::cli::{run_cli, Cli};

fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    info!("privshield {} starting", env!("CARGO_PKG_VERSION"));

    let cfg = config::load_config();
    logging::set_enabled(cfg.debug_log || cli.verbose);

    let code = match run_cli(cli) {
        Ok(()) => {
            info!("privshield exiting");
            0
        }
        Err(e) => {
            error!("CLI error: {e}");
            eprintln!("error: {e}");
            1
        }
    };

    // exit() skips destructors; drain the log queue first.
    logging::shutdown();
    std::process::exit(code);
}
