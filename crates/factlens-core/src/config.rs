//! Configuration loading.
//!
//! Reads an optional TOML file, then applies environment overrides:
//! `GOOGLE_FACT_CHECK_API_KEY`, `FACTLENS_CLASSIFIER_URL` and `ENVIRONMENT`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use factlens_network::GoogleFactCheckConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Whether internal error detail may be shown to the user.
    pub fn shows_error_detail(self) -> bool {
        self == Environment::Development
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub environment: Environment,
    pub fact_check: FactCheckSection,
    pub classifier: ClassifierSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactCheckSection {
    pub api_key: String,
    pub base_url: String,
    pub language_code: String,
    pub timeout_secs: u64,
    pub max_claims: usize,
    pub query_chars: usize,
}

impl Default for FactCheckSection {
    fn default() -> Self {
        let defaults = GoogleFactCheckConfig::default();
        Self {
            api_key: defaults.api_key,
            base_url: defaults.base_url,
            language_code: defaults.language_code,
            timeout_secs: defaults.timeout.as_secs(),
            max_claims: defaults.max_claims,
            query_chars: defaults.query_chars,
        }
    }
}

impl FactCheckSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn client_config(&self) -> GoogleFactCheckConfig {
        GoogleFactCheckConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            language_code: self.language_code.clone(),
            timeout: self.timeout(),
            max_claims: self.max_claims,
            query_chars: self.query_chars,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierSection {
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClassifierSection {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 30,
        }
    }
}

impl ClassifierSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies environment overrides; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = non_blank("GOOGLE_FACT_CHECK_API_KEY") {
            self.fact_check.api_key = api_key.trim().to_string();
        }
        if let Some(endpoint) = non_blank("FACTLENS_CLASSIFIER_URL") {
            self.classifier.endpoint = Some(endpoint.trim().to_string());
        }
        if let Some(environment) = non_blank("ENVIRONMENT") {
            match Environment::parse(&environment) {
                Some(parsed) => self.environment = parsed,
                None => tracing::warn!(
                    value = %environment,
                    "ignoring unrecognised ENVIRONMENT value"
                ),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fact_check.timeout_secs == 0 {
            return Err(ConfigError::Invalid("fact_check.timeout_secs must be positive".into()));
        }
        if self.fact_check.query_chars == 0 {
            return Err(ConfigError::Invalid("fact_check.query_chars must be positive".into()));
        }
        if self.classifier.timeout_secs == 0 {
            return Err(ConfigError::Invalid("classifier.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
