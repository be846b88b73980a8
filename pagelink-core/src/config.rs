use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::navigator::DEFAULT_PAGE_SIZE;

/// Environment variable overriding the configured page size.
pub const PAGE_SIZE_ENV: &str = "PAGINATION_PAGE_SIZE";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O or YAML parsing error occurred while loading config.
    Load(String),
    /// A value could not be converted to the expected type.
    TypeMismatch { key: String, expected: &'static str },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Defaults applied to every wrapped request.
///
/// Read from the `pagination` section of a YAML document:
///
/// ```yaml
/// pagination:
///   page_size: 30
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when a request has no valid `page_size`.
    pub page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    pagination: Option<PaginationConfig>,
}

impl PaginationConfig {
    pub fn new(page_size: u64) -> Self {
        Self { page_size }.normalized()
    }

    /// Replace a zero page size with [`DEFAULT_PAGE_SIZE`].
    pub fn normalized(self) -> Self {
        if self.page_size == 0 {
            Self::default()
        } else {
            self
        }
    }

    /// Parse the `pagination` section of a YAML string. A missing section
    /// keeps the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Load(e.to_string()))?;
        if value.is_null() {
            return Ok(Self::default());
        }
        let document: ConfigDocument =
            serde_yaml::from_value(value).map_err(|e| ConfigError::Load(e.to_string()))?;
        Ok(document.pagination.unwrap_or_default())
    }

    /// Load from a YAML file. A missing file keeps the defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no pagination config file, using defaults");
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Load(e.to_string()))?;
        Self::from_yaml_str(&content)
    }

    /// Overlay `PAGINATION_PAGE_SIZE` from the environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        match std::env::var(PAGE_SIZE_ENV) {
            Ok(raw) => {
                let page_size = raw.trim().parse::<u64>().map_err(|_| ConfigError::TypeMismatch {
                    key: PAGE_SIZE_ENV.to_string(),
                    expected: "non-negative integer",
                })?;
                Ok(Self { page_size })
            }
            Err(_) => Ok(self),
        }
    }

    /// Resolution order: defaults, then the YAML file, then the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_yaml_file(path.as_ref())?
            .with_env_overrides()?
            .normalized();
        tracing::debug!(page_size = config.page_size, "pagination config loaded");
        Ok(config)
    }
}
