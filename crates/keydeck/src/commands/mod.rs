pub mod completion;
pub mod config;

use colored::Colorize;

pub fn print_version() {
    println!(
        "{} {}",
        env!("CARGO_PKG_NAME").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION").dimmed());
}
