use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;

pub const SETTINGS_FILE: &str = "cropcast.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout_secs: Option<u64>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: None,
            log_filter: "warn".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Applies flat `key = "value"` entries from a settings file body.
    /// Unparseable files are ignored.
    pub fn apply_file(&mut self, raw: &str) {
        let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
            tracing::warn!("ignoring unparseable settings file");
            return;
        };

        if let Some(v) = file_cfg.get("api_url").and_then(toml::Value::as_str) {
            self.api_url = v.to_string();
        }
        match file_cfg.get("request_timeout_secs") {
            Some(toml::Value::Integer(secs)) => {
                self.request_timeout_secs = u64::try_from(*secs).ok();
            }
            Some(toml::Value::String(secs)) => {
                if let Ok(parsed) = secs.parse::<u64>() {
                    self.request_timeout_secs = Some(parsed);
                }
            }
            _ => {}
        }
        if let Some(v) = file_cfg.get("log_filter").and_then(toml::Value::as_str) {
            self.log_filter = v.to_string();
        }
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env_source(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("PREDICTION_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = lookup("APP__API_URL") {
            self.api_url = v;
        }

        if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
            if let Ok(parsed) = v.parse::<u64>() {
                self.request_timeout_secs = Some(parsed);
            }
        }

        if let Some(v) = lookup("APP__LOG_FILTER") {
            self.log_filter = v;
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        settings.apply_file(&raw);
    }
    settings.apply_env_source(|key| std::env::var(key).ok());

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_point_at_local_service() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, "http://127.0.0.1:8000");
        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        settings.apply_file(
            r#"
            api_url = "https://predict.example.test"
            request_timeout_secs = 15
            log_filter = "debug"
            "#,
        );
        assert_eq!(settings.api_url, "https://predict.example.test");
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn garbage_file_is_ignored() {
        let mut settings = Settings::default();
        settings.apply_file("this is = = not toml");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn app_prefixed_env_wins_over_plain_env() {
        let mut settings = Settings::default();
        settings.apply_env_source(env_of(&[
            ("PREDICTION_API_URL", "http://plain.test"),
            ("APP__API_URL", "http://prefixed.test"),
            ("APP__REQUEST_TIMEOUT_SECS", "nope"),
        ]));
        assert_eq!(settings.api_url, "http://prefixed.test");
        assert_eq!(settings.request_timeout_secs, None);
    }

    #[test]
    fn zero_timeout_means_transport_default() {
        let settings = Settings {
            request_timeout_secs: Some(0),
            ..Settings::default()
        };
        assert_eq!(settings.request_timeout(), None);
    }
}
