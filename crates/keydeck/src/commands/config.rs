use anyhow::Result;
use colored::Colorize;
use inquire::{Confirm, CustomType, Select};

use crate::cli::ConfigCommands;
use crate::config::{Config, DefaultsConfig, KEYS};

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
        ConfigCommands::Init => init(),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default()?;
    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    println!(
        "  {:<24} {}",
        "defaults.theme",
        config.theme().unwrap_or("dark")
    );
    println!(
        "  {:<24} {}",
        "defaults.start_slide",
        config.start_slide().unwrap_or(1)
    );
    println!(
        "  {:<24} {}",
        "defaults.auto_advance",
        match config.auto_advance() {
            Some(0) | None => "off".to_string(),
            Some(secs) => format!("{secs}s"),
        }
    );
    println!(
        "  {:<24} {}",
        "defaults.effects",
        config.effects_enabled()
    );
    let particles = config.particle_options();
    println!(
        "  {:<24} {} every {}s, {}s flight",
        "particles",
        particles.count,
        particles.spawn_rate,
        particles.duration
    );
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default()?;
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Saved".green().bold());
    log::info!("wrote {}", path.display());
    Ok(())
}

fn init() -> Result<()> {
    let mut config = Config::load_or_default()?;
    let current = config.defaults.clone().unwrap_or_default();

    let themes = vec!["dark", "light"];
    let start = themes
        .iter()
        .position(|t| Some(*t) == current.theme.as_deref())
        .unwrap_or(0);
    let theme = Select::new("Theme:", themes).with_starting_cursor(start).prompt()?;

    let auto_advance = CustomType::<u64>::new("Auto-advance interval in seconds (0 = off):")
        .with_default(current.auto_advance.unwrap_or(0))
        .prompt()?;

    let effects = Confirm::new("Show particle effects?")
        .with_default(current.effects.unwrap_or(true))
        .prompt()?;

    config.defaults = Some(DefaultsConfig {
        theme: Some(theme.to_string()),
        auto_advance: Some(auto_advance),
        effects: Some(effects),
        ..current
    });
    let path = config.save()?;
    println!("{} {}", "Saved".green().bold(), path.display());
    println!(
        "{}",
        format!("Change single values later with `keydeck config set <key> <value>` ({}).", KEYS.join(", ")).dimmed()
    );
    Ok(())
}
