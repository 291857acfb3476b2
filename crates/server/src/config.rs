use std::fs;

use serde::Deserialize;
use tracing::warn;

const CONFIG_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub session_idle_ttl_seconds: u64,
    pub max_sessions: usize,
    pub sweep_interval_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            session_idle_ttl_seconds: 30 * 60,
            max_sessions: 10_000,
            sweep_interval_seconds: 60,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    session_idle_ttl_seconds: Option<u64>,
    max_sessions: Option<usize>,
    sweep_interval_seconds: Option<u64>,
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(CONFIG_FILE).ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `server.toml`, then environment variables.
pub(crate) fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.bind_addr {
                    settings.server_bind = v;
                }
                if let Some(v) = file_cfg.session_idle_ttl_seconds {
                    settings.session_idle_ttl_seconds = v;
                }
                if let Some(v) = file_cfg.max_sessions {
                    settings.max_sessions = v;
                }
                if let Some(v) = file_cfg.sweep_interval_seconds {
                    settings.sweep_interval_seconds = v;
                }
            }
            Err(error) => warn!(%error, file = CONFIG_FILE, "ignoring unreadable config file"),
        }
    }

    if let Some(v) = env("SCRAMBLE_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = parse_env(&env, "APP__SESSION_IDLE_TTL_SECONDS") {
        settings.session_idle_ttl_seconds = v;
    }
    if let Some(v) = parse_env(&env, "APP__MAX_SESSIONS") {
        settings.max_sessions = v;
    }
    if let Some(v) = parse_env(&env, "APP__SWEEP_INTERVAL_SECONDS") {
        settings.sweep_interval_seconds = v;
    }

    settings
}

fn parse_env<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, value = %raw, "ignoring non-numeric setting");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
