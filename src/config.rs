//! Persistent application settings.
//!
//! Settings live in a single JSON file in the user's home directory. Loading
//! merges the stored values over built-in defaults key by key, so a partial
//! or outdated file self-heals and a missing or corrupt file simply yields
//! the defaults. Saving always rewrites the full record.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AutoTyperError, Result};

/// File name of the settings record, resolved against the home directory.
pub const SETTINGS_FILE: &str = ".autotyper.json";

/// All editable setting keys, in display order.
pub const SETTING_KEYS: &[&str] = &[
    "start_delay",
    "delay",
    "font",
    "font_size",
    "text_color",
    "bg_color",
    "always_on_top",
];

/// The persisted settings record.
///
/// Every field carries a serde default, so any subset of keys in the stored
/// file deserializes into a complete record. Unknown keys are ignored. The
/// store itself enforces no ranges; range and format restrictions belong to
/// the editing surface (see [`Settings::set`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds to wait before typing begins.
    #[serde(default = "default_start_delay")]
    pub start_delay: f64,
    /// Seconds to pause between keystrokes.
    #[serde(default = "default_delay")]
    pub delay: f64,
    /// Font family for the interactive surface.
    #[serde(default = "default_font")]
    pub font: String,
    /// Font size in points.
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    /// Text color as a `#rrggbb` string.
    #[serde(default = "default_text_color")]
    pub text_color: String,
    /// Background color as a `#rrggbb` string.
    #[serde(default = "default_bg_color")]
    pub bg_color: String,
    /// Keep the interactive surface above other windows.
    #[serde(default)]
    pub always_on_top: bool,
}

fn default_start_delay() -> f64 {
    3.0
}

fn default_delay() -> f64 {
    0.0
}

fn default_font() -> String {
    "Segoe UI".to_string()
}

fn default_font_size() -> u32 {
    12
}

fn default_text_color() -> String {
    "#000000".to_string()
}

fn default_bg_color() -> String {
    "#ffffff".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_delay: default_start_delay(),
            delay: default_delay(),
            font: default_font(),
            font_size: default_font_size(),
            text_color: default_text_color(),
            bg_color: default_bg_color(),
            always_on_top: false,
        }
    }
}

impl Settings {
    /// Location of the settings file under the user's home directory.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SETTINGS_FILE)
    }

    /// Load settings from the default location.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load settings from `path`, falling back to defaults.
    ///
    /// A missing, unreadable, or malformed file is treated as absent: the
    /// defaults are returned and the problem is only visible as a WARN log
    /// line. Startup must never fail on a bad settings file.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("could not read settings file {}: {err}", path.display());
                }
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    "ignoring malformed settings file {}: {err}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    /// Serialize the full record to `path`, overwriting prior content.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .map_err(|err| AutoTyperError::settings_save(path.display().to_string(), err.to_string()))
    }

    /// Initial delay as a [`Duration`].
    pub fn start_delay_duration(&self) -> Duration {
        Duration::from_secs_f64(self.start_delay.max(0.0))
    }

    /// Per-keystroke delay as a [`Duration`].
    pub fn char_delay_duration(&self) -> Duration {
        Duration::from_secs_f64(self.delay.max(0.0))
    }

    /// Set one field from its string representation.
    ///
    /// This is the editing surface: values are parsed, range-checked, and
    /// rounded the way the settings dialog restricted them. Direct field
    /// access stays unrestricted.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "start_delay" => {
                let secs = parse_f64(key, value)?;
                if !(1.0..=5.0).contains(&secs) {
                    return Err(AutoTyperError::invalid_setting(
                        key,
                        "must be between 1.0 and 5.0 seconds",
                    ));
                }
                self.start_delay = round_to(secs, 1);
            }
            "delay" => {
                let secs = parse_f64(key, value)?;
                if !(0.0..=0.1).contains(&secs) {
                    return Err(AutoTyperError::invalid_setting(
                        key,
                        "must be between 0.0 and 0.1 seconds",
                    ));
                }
                self.delay = round_to(secs, 3);
            }
            "font" => {
                if value.trim().is_empty() {
                    return Err(AutoTyperError::invalid_setting(key, "font name is empty"));
                }
                self.font = value.trim().to_string();
            }
            "font_size" => {
                let size: u32 = value.parse().map_err(|_| {
                    AutoTyperError::invalid_setting(key, format!("'{value}' is not an integer"))
                })?;
                if !(8..=32).contains(&size) {
                    return Err(AutoTyperError::invalid_setting(
                        key,
                        "must be between 8 and 32 points",
                    ));
                }
                self.font_size = size;
            }
            "text_color" => {
                validate_hex_color(key, value)?;
                self.text_color = value.to_lowercase();
            }
            "bg_color" => {
                validate_hex_color(key, value)?;
                self.bg_color = value.to_lowercase();
            }
            "always_on_top" => {
                self.always_on_top = value.parse().map_err(|_| {
                    AutoTyperError::invalid_setting(key, format!("'{value}' is not true or false"))
                })?;
            }
            _ => return Err(AutoTyperError::unknown_setting(key)),
        }
        Ok(())
    }

    /// Current value of one field as a string.
    pub fn get(&self, key: &str) -> Result<String> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
            .ok_or_else(|| AutoTyperError::unknown_setting(key))
    }

    /// All key/value pairs in display order (matches [`SETTING_KEYS`]).
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_delay", format!("{:.1}", self.start_delay)),
            ("delay", format!("{:.3}", self.delay)),
            ("font", self.font.clone()),
            ("font_size", self.font_size.to_string()),
            ("text_color", self.text_color.clone()),
            ("bg_color", self.bg_color.clone()),
            ("always_on_top", self.always_on_top.to_string()),
        ]
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| AutoTyperError::invalid_setting(key, format!("'{value}' is not a number")))
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn validate_hex_color(key: &str, value: &str) -> Result<()> {
    let digits = value.strip_prefix('#').ok_or_else(|| {
        AutoTyperError::invalid_setting(key, format!("'{value}' does not start with '#'"))
    })?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AutoTyperError::invalid_setting(
            key,
            format!("'{value}' is not a #rrggbb color"),
        ));
    }
    Ok(())
}
