use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// User overlay location, relative to `$HOME`.
const USER_CONFIG: &str = ".config/rawsh/config.toml";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Printed before every line and on redraw after a completion.
    pub prompt: String,
    /// Ring the bell when completion cannot extend the line.
    pub bell: bool,
    /// Reject unterminated quotes instead of absorbing the rest of the line.
    pub strict_quotes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: "$ ".into(),
            bell: true,
            strict_quotes: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LoggingConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    #[serde(default)]
    pub level: String,
    /// Log file; `~` is expanded. Empty disables logging.
    #[serde(default)]
    pub file: String,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    logging: LoggingOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    prompt: Option<String>,
    bell: Option<bool>,
    strict_quotes: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct LoggingOverlay {
    level: Option<String>,
    file: Option<String>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge the overlay from `path`, or from ~/.config/rawsh/config.toml
    ///    when no path is given (if it exists)
    ///
    /// Keys present in the overlay override the defaults; omitted keys keep them.
    pub fn load(path: Option<&Path>) -> Self {
        let mut config = Self::default_config();
        let path = path.map(Path::to_path_buf).or_else(user_config_path);
        if let Some(overlay) = path.as_deref().and_then(Self::load_overlay) {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to read and parse an overlay file.
    fn load_overlay(path: &Path) -> Option<ConfigOverlay> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("rawsh: config parse error in {}: {e}", path.display());
                None
            }
        }
    }

    /// Apply an overlay on top of this config.
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        if let Some(v) = s.prompt {
            self.settings.prompt = v;
        }
        if let Some(v) = s.bell {
            self.settings.bell = v;
        }
        if let Some(v) = s.strict_quotes {
            self.settings.strict_quotes = v;
        }

        let l = overlay.logging;
        if let Some(v) = l.level {
            self.logging.level = v;
        }
        if let Some(v) = l.file {
            self.logging.file = v;
        }
    }

    /// Render the merged configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

fn user_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(Path::new(&home).join(USER_CONFIG))
}
