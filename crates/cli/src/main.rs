use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use playfair_subset_cli::cli::Cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    Cli::parse().run()
}
