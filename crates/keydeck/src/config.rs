use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::effects::particles::ParticleOptions;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "keydeck";

pub const MAX_PARTICLES: usize = 500;

pub const KEYS: &[&str] = &[
    "defaults.theme",
    "defaults.start_slide",
    "defaults.auto_advance",
    "defaults.effects",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particles: Option<ParticleOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// 1-indexed slide to open on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,

    /// Auto-advance interval in seconds; 0 disables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_advance: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<bool>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `keydeck config init` to create one.")
            } else {
                anyhow::anyhow!("Failed to read config {}: {e}", path.display())
            }
        })?;
        Self::from_yaml(&contents)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))
    }

    /// Load the user's config file through [`Config::load_from`]; a missing file yields the defaults.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# keydeck configuration\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn theme(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.theme.as_deref())
    }

    pub fn start_slide(&self) -> Option<usize> {
        self.defaults.as_ref().and_then(|d| d.start_slide)
    }

    pub fn auto_advance(&self) -> Option<u64> {
        self.defaults.as_ref().and_then(|d| d.auto_advance)
    }

    pub fn effects_enabled(&self) -> bool {
        self.defaults.as_ref().and_then(|d| d.effects).unwrap_or(true)
    }

    /// Particle settings, with `count` capped at [`MAX_PARTICLES`].
    pub fn particle_options(&self) -> ParticleOptions {
        let mut options = self.particles.clone().unwrap_or_default();
        if options.count > MAX_PARTICLES {
            log::warn!(
                "particles.count {} is too high, using {MAX_PARTICLES}",
                options.count
            );
            options.count = MAX_PARTICLES;
        }
        options
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                defaults.theme = Some(value.to_string());
            }
            "defaults.start_slide" => {
                let slide: usize = value
                    .parse()
                    .ok()
                    .filter(|&n| n >= 1)
                    .ok_or_else(|| {
                        anyhow::anyhow!("Invalid start_slide: {value}. Must be a slide number (1 or more).")
                    })?;
                defaults.start_slide = Some(slide);
            }
            "defaults.auto_advance" => {
                let secs: u64 = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid auto_advance: {value}. Must be seconds (0 disables).")
                })?;
                defaults.auto_advance = Some(secs);
            }
            "defaults.effects" => {
                let on = match value {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => anyhow::bail!("Invalid effects: {value}. Must be 'true' or 'false'."),
                };
                defaults.effects = Some(on);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }
}
