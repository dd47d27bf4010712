//! Configuration loading for labscore.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.labscore/config.toml` (user)
//! 3. `/etc/labscore/config.toml` (system)
//! 4. Built-in defaults when no file exists
//!
//! The model identity can then be overridden from the environment
//! (`MODEL_NAME`, `MODEL_VERSION`). Identity is cosmetic; it does not change
//! scoring behaviour.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{DEFAULT_FEATURE_PREFIX, FeatureSchema, ParameterSource};
use crate::types::LabInfo;
use crate::{Result, ScoreError};

/// Environment variable overriding the model name.
pub const MODEL_NAME_ENV: &str = "MODEL_NAME";

/// Environment variable overriding the model version.
pub const MODEL_VERSION_ENV: &str = "MODEL_VERSION";

/// Service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub lab: LabInfo,
}

/// Model identity, feature schema and parameter source.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model name (default: contoso-sample-model).
    #[serde(default = "default_name")]
    pub name: String,
    /// Model version (default: 1.0.0).
    #[serde(default = "default_version")]
    pub version: String,
    /// Number of input features (default: 10).
    #[serde(default = "default_features")]
    pub features: usize,
    /// Feature name prefix (default: "feature_").
    #[serde(default = "default_feature_prefix")]
    pub feature_prefix: String,
    /// Ordered class labels.
    #[serde(default = "default_classes")]
    pub classes: Vec<String>,
    #[serde(default)]
    pub parameters: ParameterSource,
    #[serde(default = "default_description")]
    pub description: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            features: default_features(),
            feature_prefix: default_feature_prefix(),
            classes: default_classes(),
            parameters: ParameterSource::default(),
            description: default_description(),
        }
    }
}

fn default_name() -> String {
    "contoso-sample-model".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_features() -> usize {
    10
}

fn default_feature_prefix() -> String {
    DEFAULT_FEATURE_PREFIX.to_string()
}

fn default_classes() -> Vec<String> {
    ["class_a", "class_b", "class_c", "class_d", "class_e"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_description() -> String {
    "Sample model for Contoso Lab Artifactory integration testing".to_string()
}

impl ModelConfig {
    /// Feature schema derived from `features` and `feature_prefix`.
    pub fn schema(&self) -> FeatureSchema {
        FeatureSchema::new(self.features, self.feature_prefix.clone())
    }

    /// Set the model identity.
    pub fn identity(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    /// Set the feature count.
    pub fn features(mut self, count: usize) -> Self {
        self.features = count;
        self
    }

    /// Set the class labels.
    pub fn classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the parameter source.
    pub fn parameters(mut self, source: ParameterSource) -> Self {
        self.parameters = source;
        self
    }
}

impl Config {
    /// Load configuration from the standard locations, then apply
    /// environment overrides.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; must exist)
    /// 2. `~/.labscore/config.toml`
    /// 3. `/etc/labscore/config.toml`
    /// 4. Defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path)?,
            None => Config::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ScoreError::Configuration(format!("Failed to parse config: {e}")))
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScoreError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            ScoreError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path. `None` means fall back to defaults.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(ScoreError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".labscore").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/labscore/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Override the model identity from a variable lookup (normally the
    /// process environment). Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(name) = non_empty(MODEL_NAME_ENV) {
            self.model.name = name;
        }
        if let Some(version) = non_empty(MODEL_VERSION_ENV) {
            self.model.version = version;
        }
    }
}
