use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::BriefError;

/// Where brief content comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Mock,
    Http,
}

/// Configuration stored in ~/.morningbrief/config.json
///
/// Every field has a default, so a missing file or `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_url: Option<String>,
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,
    #[serde(default = "default_feedback_delay_ms")]
    pub feedback_delay_ms: u64,
    /// Key-value store file. Defaults to ~/.morningbrief/store.json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

fn default_mock_delay_ms() -> u64 {
    2000
}

fn default_feedback_delay_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            brief_url: None,
            feedback_url: None,
            mock_delay_ms: default_mock_delay_ms(),
            feedback_delay_ms: default_feedback_delay_ms(),
            store_path: None,
        }
    }
}

impl Config {
    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    /// Parsed brief endpoint. Required when the provider is `http`.
    pub fn brief_endpoint(&self) -> Result<Option<url::Url>, BriefError> {
        let endpoint = parse_url("briefUrl", self.brief_url.as_deref())?;
        if self.provider == ProviderKind::Http && endpoint.is_none() {
            return Err(BriefError::Config(
                "briefUrl is required when provider is \"http\"".to_string(),
            ));
        }
        Ok(endpoint)
    }

    pub fn feedback_endpoint(&self) -> Result<Option<url::Url>, BriefError> {
        parse_url("feedbackUrl", self.feedback_url.as_deref())
    }

    pub fn validate(&self) -> Result<(), BriefError> {
        self.brief_endpoint()?;
        self.feedback_endpoint()?;
        Ok(())
    }

    pub fn resolved_store_path(&self) -> Result<PathBuf, BriefError> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(state_dir()?.join("store.json")),
        }
    }
}

fn parse_url(field: &str, value: Option<&str>) -> Result<Option<url::Url>, BriefError> {
    match value {
        None => Ok(None),
        Some(raw) => url::Url::parse(raw)
            .map(Some)
            .map_err(|e| BriefError::Config(format!("Invalid {} '{}': {}", field, raw, e))),
    }
}

/// The state directory (~/.morningbrief)
pub fn state_dir() -> Result<PathBuf, BriefError> {
    let home = dirs::home_dir()
        .ok_or_else(|| BriefError::Config("Could not find home directory".to_string()))?;
    Ok(home.join(".morningbrief"))
}

/// Get the canonical config file path (~/.morningbrief/config.json)
pub fn config_path() -> Result<PathBuf, BriefError> {
    Ok(state_dir()?.join("config.json"))
}

/// Load configuration from ~/.morningbrief/config.json
pub fn load_config() -> Result<Config, BriefError> {
    load_config_from(&config_path()?)
}

/// Load configuration from a file. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<Config, BriefError> {
    if !path.exists() {
        log::debug!("No config at {}; using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| BriefError::Config(format!("Failed to read config: {}", e)))?;
    let config: Config = serde_json::from_str(&content)
        .map_err(|e| BriefError::Config(format!("Failed to parse config: {}", e)))?;

    config.validate()?;
    Ok(config)
}

/// Write the config as pretty JSON, creating the parent directory if needed.
pub fn save_config_to(path: &Path, config: &Config) -> Result<(), BriefError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| BriefError::Config(format!("Failed to create config dir: {}", e)))?;
        }
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| BriefError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, content)
        .map_err(|e| BriefError::Config(format!("Failed to write config: {}", e)))?;
    Ok(())
}

pub fn save_config(config: &Config) -> Result<(), BriefError> {
    save_config_to(&config_path()?, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config_from(&temp.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.mock_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "mockDelayMs": 10 }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.provider, ProviderKind::Mock);
        assert_eq!(config.mock_delay_ms, 10);
        assert_eq!(config.feedback_delay_ms, 1000);
    }

    #[test]
    fn test_http_provider_requires_url() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "provider": "http" }"#).unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, BriefError::Config(_)));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = Config {
            feedback_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unparsable_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(load_config_from(&path), Err(BriefError::Config(_))));
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.json");
        let config = Config {
            provider: ProviderKind::Http,
            brief_url: Some("https://example.com/brief".to_string()),
            store_path: Some(temp.path().join("store.json")),
            ..Default::default()
        };

        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }
}
