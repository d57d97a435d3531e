//! Browser configuration

use crate::error::{CromError, CromResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder replaced by the percent-encoded query in [`BrowserConfig::search_url`].
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// User agent string sent with every request
    pub user_agent: String,

    /// Cookie header sent with every request
    pub cookie: String,

    /// Search URL template, `{query}` is replaced with the encoded input
    pub search_url: String,

    /// Maximum number of redirects the transport follows
    pub max_redirects: usize,

    /// Title of the host window
    pub window_title: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            cookie: "cookieconsent_status=allow".to_string(),
            search_url: format!("https://duckduckgo.com/lite/?q={}", QUERY_PLACEHOLDER),
            max_redirects: 10,
            window_title: "CromRPS".to_string(),
        }
    }
}

impl BrowserConfig {
    /// Default location of the configuration file
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cromrps")
            .join("config.json")
    }

    /// Load configuration from a JSON file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> CromResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            CromError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> CromResult<()> {
        if !self.search_url.contains(QUERY_PLACEHOLDER) {
            return Err(CromError::config(format!(
                "search_url must contain {}",
                QUERY_PLACEHOLDER
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BrowserConfig::default();
        assert_eq!(config.user_agent, "Mozilla/5.0");
        assert_eq!(config.cookie, "cookieconsent_status=allow");
        assert!(config.search_url.contains(QUERY_PLACEHOLDER));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = BrowserConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, BrowserConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "window_title": "Mine" }}"#).unwrap();

        let config = BrowserConfig::load(file.path()).unwrap();
        assert_eq!(config.window_title, "Mine");
        assert_eq!(config.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = BrowserConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, CromError::Config(_)));
    }

    #[test]
    fn test_search_url_without_placeholder_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "search_url": "https://example.com/" }}"#).unwrap();

        assert!(BrowserConfig::load(file.path()).is_err());
    }
}
