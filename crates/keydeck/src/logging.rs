use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes log records to stderr with a coloured level tag.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "error".red().bold(),
            Level::Warn => "warn".yellow().bold(),
            Level::Info => "info".green(),
            Level::Debug => "debug".blue(),
            Level::Trace => "trace".dimmed(),
        };
        if record.level() >= Level::Debug {
            eprintln!(
                "{tag} {} {}",
                record.target().dimmed(),
                record.args()
            );
        } else {
            eprintln!("{tag} {}", record.args());
        }
    }

    fn flush(&self) {}
}

/// `-q` keeps errors only; each `-v` opens one more level above the default `warn`.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(verbose: u8, quiet: bool, no_color: bool) -> anyhow::Result<()> {
    if no_color {
        colored::control::set_override(false);
    }
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;
    log::set_max_level(level_for(verbose, quiet));
    Ok(())
}
