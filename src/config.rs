//! Backend connection settings.
//!
//! Settings are resolved from three layers, lowest priority first:
//!
//! 1. compiled defaults ([`BackendConfig::default`]),
//! 2. an optional JSON file,
//! 3. `TASKPILOT_*` environment variables.
//!
//! The URL and API key have no usable default and must come from the file or
//! the environment.

use crate::files;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edge function that turns a task title into subtask suggestions.
pub const DEFAULT_SUGGESTION_FUNCTION: &str = "generate-subtasks";

/// Storage bucket holding profile pictures.
pub const DEFAULT_PICTURE_BUCKET: &str = "profile-pictures";

/// Environment variable overriding [`BackendConfig::url`].
pub const ENV_URL: &str = "TASKPILOT_URL";
/// Environment variable overriding [`BackendConfig::api_key`].
pub const ENV_API_KEY: &str = "TASKPILOT_API_KEY";
/// Environment variable overriding [`BackendConfig::access_token`].
pub const ENV_ACCESS_TOKEN: &str = "TASKPILOT_ACCESS_TOKEN";
/// Environment variable overriding [`BackendConfig::suggestion_function`].
pub const ENV_SUGGESTION_FUNCTION: &str = "TASKPILOT_SUGGESTION_FUNCTION";
/// Environment variable overriding [`BackendConfig::picture_bucket`].
pub const ENV_PICTURE_BUCKET: &str = "TASKPILOT_PICTURE_BUCKET";

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that failed to load.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`BackendConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: String,
        /// Underlying decode error.
        source: serde_json::Error,
    },

    /// A required setting is absent after all layers were applied.
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
}

/// Resolved connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the hosted backend, e.g. `https://project.example.co`.
    pub url: String,
    /// Public API key sent with every request.
    pub api_key: String,
    /// Session access token of the signed-in user.
    pub access_token: Option<String>,
    /// Edge function generating subtask suggestions.
    pub suggestion_function: String,
    /// Storage bucket for profile pictures.
    pub picture_bucket: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            access_token: None,
            suggestion_function: DEFAULT_SUGGESTION_FUNCTION.to_owned(),
            picture_bucket: DEFAULT_PICTURE_BUCKET.to_owned(),
        }
    }
}

impl BackendConfig {
    /// Loads configuration from an optional file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or a
    /// required setting is missing.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or a
    /// required setting is missing.
    pub fn load_with_env(
        path: Option<&Utf8Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let base = match path {
            Some(file) => Self::from_file(file)?,
            None => Self::default(),
        };
        let resolved = base.with_env_overrides(lookup);
        resolved.validate()?;
        Ok(resolved)
    }

    fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let bytes = files::read_bytes(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Applies `TASKPILOT_*` overrides; blank values are ignored.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(url) = read(ENV_URL) {
            self.url = url;
        }
        if let Some(api_key) = read(ENV_API_KEY) {
            self.api_key = api_key;
        }
        if let Some(token) = read(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
        if let Some(function) = read(ENV_SUGGESTION_FUNCTION) {
            self.suggestion_function = function;
        }
        if let Some(bucket) = read(ENV_PICTURE_BUCKET) {
            self.picture_bucket = bucket;
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Missing("url"));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("api_key"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn environment_supplies_required_settings() {
        let config = BackendConfig::load_with_env(
            None,
            env(&[(ENV_URL, "https://demo.example.co"), (ENV_API_KEY, "anon")]),
        )
        .expect("config should resolve");

        assert_eq!(config.url, "https://demo.example.co");
        assert_eq!(config.api_key, "anon");
        assert_eq!(config.access_token, None);
        assert_eq!(config.suggestion_function, DEFAULT_SUGGESTION_FUNCTION);
        assert_eq!(config.picture_bucket, DEFAULT_PICTURE_BUCKET);
    }

    #[test]
    fn missing_url_is_rejected() {
        let result = BackendConfig::load_with_env(None, env(&[(ENV_API_KEY, "anon")]));
        assert!(matches!(result, Err(ConfigError::Missing("url"))));
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let config = BackendConfig {
            url: "https://file.example.co".to_owned(),
            api_key: "file-key".to_owned(),
            ..BackendConfig::default()
        }
        .with_env_overrides(env(&[(ENV_URL, "   "), (ENV_ACCESS_TOKEN, "")]));

        assert_eq!(config.url, "https://file.example.co");
        assert_eq!(config.access_token, None);
    }

    #[test]
    fn file_values_are_overridden_by_environment() {
        let dir = std::env::temp_dir().join(format!("taskpilot-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let file = dir.join("config.json");
        std::fs::write(
            &file,
            r#"{"url":"https://file.example.co","api_key":"file-key","picture_bucket":"avatars"}"#,
        )
        .expect("write config file");
        let path = camino::Utf8PathBuf::from_path_buf(file).expect("utf-8 temp path");

        let config = BackendConfig::load_with_env(
            Some(&path),
            env(&[(ENV_API_KEY, "env-key"), (ENV_ACCESS_TOKEN, "token")]),
        )
        .expect("config should resolve");

        assert_eq!(config.url, "https://file.example.co");
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.access_token.as_deref(), Some("token"));
        assert_eq!(config.picture_bucket, "avatars");
        assert_eq!(config.suggestion_function, DEFAULT_SUGGESTION_FUNCTION);

        std::fs::remove_dir_all(&dir).expect("remove temp dir");
    }
}
