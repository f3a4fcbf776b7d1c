use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keydeck")]
#[command(author, version, about)]
#[command(long_about = "A keynote-style slideshow presenter.\n\n\
    Slides come from a markdown file; the presenter adds a progress bar,\n\
    speaker notes and decorative particle effects.\n\n\
    Examples:\n  \
    keydeck talk.md                     Present fullscreen\n  \
    keydeck talk.md --windowed          Present in a window\n  \
    keydeck talk.md --auto-advance 30   Advance every 30 seconds\n  \
    keydeck config init                 Create a config file")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Markdown file to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub present: PresentArgs,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress everything but errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct PresentArgs {
    /// Launch in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long)]
    pub slide: Option<usize>,

    /// Advance to the next slide every SECS seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    pub auto_advance: Option<u64>,

    /// Turn off particles, orbs and slide animations
    #[arg(long)]
    pub no_effects: bool,

    /// Hide the progress bar, counter and navigation buttons
    #[arg(long)]
    pub no_chrome: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.auto_advance, defaults.effects)
        key: String,

        /// Value to set
        value: String,
    },

    /// Create or update the configuration interactively
    Init,
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::print_version();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::app::run(file, self.present)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
