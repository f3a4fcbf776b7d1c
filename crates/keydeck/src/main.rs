mod app;
mod cli;
mod commands;
mod config;
mod display;
mod effects;
mod input;
mod logging;
mod navigator;
mod parser;
mod render;
mod theme;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.quiet, cli.no_color) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}
