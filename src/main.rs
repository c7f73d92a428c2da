//! pherf-installer - deploys pherf into an HDP Phoenix installation
//!
//! Copies the pherf module and its configs from a Phoenix checkout, builds and
//! installs the pherf jars, cleans dead Ambari symlinks, swaps in freshly
//! built thin-client and query server jars and restarts the query server.

use clap::Parser;

mod cli;
mod commands;
mod common;
mod config;
mod error;
mod installer;
mod logging;
mod process;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::install::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
