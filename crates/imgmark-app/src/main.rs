//! imgmark entry point.

use clap::Parser;
use imgmark_app::Cli;

fn main() {
    env_logger::init();
    log::info!("Starting imgmark");

    if let Err(err) = imgmark_app::run(Cli::parse()) {
        log::error!("{err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
