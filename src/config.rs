use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_GRID: usize = u16::MAX as usize;

pub fn default_config_path() -> Option<PathBuf> {
    // ~\Users\you\.bloch\config.toml on Windows; ~/.bloch/config.toml elsewhere
    dirs_next::home_dir().map(|h| h.join(".bloch").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub ascii: AsciiSettings,
    pub window: WindowSettings,
    pub sampler: SamplerSettings,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AsciiSettings {
    pub width: usize,
    pub height: usize,
    pub delay_ms: u64,
}

impl Default for AsciiSettings {
    fn default() -> Self {
        Self { width: 61, height: 29, delay_ms: 50 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
    pub interval_ms: u64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self { width: 720.0, height: 720.0, interval_ms: 100 }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerSettings {
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        let settings = Self::from_toml(&text)
            .with_context(|| format!("Parse config {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.ascii.width == 0 || self.ascii.height == 0 {
            bail!("ascii grid must be at least 1x1 (got {}x{})", self.ascii.width, self.ascii.height);
        }
        // terminal cursor coordinates are u16
        if self.ascii.width > MAX_GRID || self.ascii.height > MAX_GRID {
            bail!(
                "ascii grid must be at most {MAX_GRID}x{MAX_GRID} (got {}x{})",
                self.ascii.width,
                self.ascii.height
            );
        }
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            bail!("window size must be positive (got {}x{})", self.window.width, self.window.height);
        }
        Ok(())
    }
}
