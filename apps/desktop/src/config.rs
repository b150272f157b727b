use std::{fs, io, path::Path, time::Duration};

use client_core::{ControllerConfig, TitlePolicy};
use serde::Deserialize;
use storage::DEFAULT_DATABASE_URL;

pub const DEFAULT_CONFIG_PATH: &str = "noir.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub reply_delay_ms: u64,
    pub preferences_url: String,
    pub log_filter: String,
    pub title_policy: TitlePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
            preferences_url: DEFAULT_DATABASE_URL.into(),
            log_filter: "warn".into(),
            title_policy: TitlePolicy::default(),
        }
    }
}

impl Settings {
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            reply_delay: Duration::from_millis(self.reply_delay_ms),
            title_policy: self.title_policy.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    reply_delay_ms: Option<u64>,
    preferences_url: Option<String>,
    log_filter: Option<String>,
    title: FileTitleSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileTitleSettings {
    prefixes: Option<Vec<String>>,
    max_length: Option<usize>,
}

/// Defaults, then the TOML file, then environment variables.
///
/// Problems are returned as warnings because logging is configured from the result.
pub fn load_settings(config_path: &Path) -> (Settings, Vec<String>) {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();
    if let Err(warning) = apply_file(&mut settings, config_path) {
        warnings.push(warning);
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());
    (settings, warnings)
}

fn apply_file(settings: &mut Settings, config_path: &Path) -> Result<(), String> {
    let raw = match fs::read_to_string(config_path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(format!(
                "could not read config '{}': {err}",
                config_path.display()
            ));
        }
    };

    let file_cfg = toml::from_str::<FileSettings>(&raw).map_err(|err| {
        format!(
            "ignoring malformed config '{}': {err}",
            config_path.display()
        )
    })?;
    apply_file_settings(settings, file_cfg);
    Ok(())
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.reply_delay_ms {
        settings.reply_delay_ms = v;
    }
    if let Some(v) = file_cfg.preferences_url {
        settings.preferences_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.title.prefixes {
        settings.title_policy.prefixes = v.into_iter().map(|p| p.to_lowercase()).collect();
    }
    if let Some(v) = file_cfg.title.max_length {
        if v > 0 {
            settings.title_policy.max_title_length = v;
        }
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    for name in ["NOIR_REPLY_DELAY_MS", "APP__REPLY_DELAY_MS"] {
        if let Some(parsed) = var(name).and_then(|v| v.trim().parse::<u64>().ok()) {
            settings.reply_delay_ms = parsed;
        }
    }

    for name in ["NOIR_PREFERENCES_URL", "APP__PREFERENCES_URL"] {
        if let Some(v) = var(name).filter(|v| !v.trim().is_empty()) {
            settings.preferences_url = v;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
