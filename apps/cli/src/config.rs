use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use client_core::{
    chat::{DEFAULT_MIN_CONFIDENCE, DEFAULT_REPLY_DELAY},
    sorting::DEFAULT_ROUND_SIZE,
    ChatOptions,
};
use toml::Table;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_path: Option<PathBuf>,
    pub reply_delay_ms: u64,
    pub round_size: usize,
    pub min_confidence: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: None,
            reply_delay_ms: DEFAULT_REPLY_DELAY.as_millis() as u64,
            round_size: DEFAULT_ROUND_SIZE,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl Settings {
    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            reply_delay: Duration::from_millis(self.reply_delay_ms),
            min_confidence: self.min_confidence,
        }
    }
}

const FILE_KEYS: [&str; 4] = ["data_path", "reply_delay_ms", "round_size", "min_confidence"];

pub fn load_settings(config_path: &Path) -> Settings {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

/// Defaults, then the config file (if it exists), then environment overrides.
pub fn load_settings_with(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        match raw.parse::<Table>() {
            Ok(table) => apply_file_settings(&mut settings, &table, config_path),
            Err(err) => warn!(
                path = %config_path.display(),
                error = %err,
                "ignoring unreadable config file"
            ),
        }
    }

    if let Some(v) = env("GREENKAKI_DATA") {
        settings.data_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env("APP__DATA_PATH") {
        settings.data_path = Some(PathBuf::from(v));
    }

    if let Some(v) = env("APP__REPLY_DELAY_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.reply_delay_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__REPLY_DELAY_MS"),
        }
    }

    if let Some(v) = env("APP__ROUND_SIZE") {
        match v.parse::<usize>() {
            Ok(parsed) if parsed > 0 => settings.round_size = parsed,
            _ => warn!(value = %v, "ignoring invalid APP__ROUND_SIZE"),
        }
    }

    if let Some(v) = env("APP__MIN_CONFIDENCE") {
        match v.parse::<f32>() {
            Ok(parsed) if (0.0..=1.0).contains(&parsed) => settings.min_confidence = parsed,
            _ => warn!(value = %v, "ignoring invalid APP__MIN_CONFIDENCE"),
        }
    }

    settings
}

/// Each key is taken on its own; a bad or unknown key is warned about and skipped.
fn apply_file_settings(settings: &mut Settings, table: &Table, config_path: &Path) {
    for key in table.keys().filter(|key| !FILE_KEYS.contains(&key.as_str())) {
        warn!(path = %config_path.display(), key = %key, "ignoring unknown config key");
    }

    if let Some(value) = table.get("data_path") {
        match value.as_str() {
            Some(path) if !path.trim().is_empty() => {
                settings.data_path = Some(resolve_relative_to(config_path, PathBuf::from(path)))
            }
            _ => warn!(value = %value, "ignoring invalid data_path in config file"),
        }
    }

    if let Some(value) = table.get("reply_delay_ms") {
        match value.as_integer().and_then(|v| u64::try_from(v).ok()) {
            Some(v) => settings.reply_delay_ms = v,
            None => warn!(value = %value, "ignoring invalid reply_delay_ms in config file"),
        }
    }

    if let Some(value) = table.get("round_size") {
        match value.as_integer().and_then(|v| usize::try_from(v).ok()) {
            Some(v) if v > 0 => settings.round_size = v,
            _ => warn!(value = %value, "ignoring invalid round_size in config file"),
        }
    }

    if let Some(value) = table.get("min_confidence") {
        let parsed = value
            .as_float()
            .or_else(|| value.as_integer().map(|v| v as f64))
            .map(|v| v as f32);
        match parsed {
            Some(v) if (0.0..=1.0).contains(&v) => settings.min_confidence = v,
            _ => warn!(value = %value, "ignoring invalid min_confidence in config file"),
        }
    }
}

/// Relative data paths in the config file are taken relative to the file itself.
fn resolve_relative_to(config_path: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(path),
        _ => path,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
