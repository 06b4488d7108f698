//! Configuration loading for the `sentimentsync` command.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.sentimentsync/config.toml` (user)
//! 3. `/etc/sentimentsync/config.toml` (system)
//!
//! With no file present the defaults apply.
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.sentimentsync/secrets.toml` (user, must be 0600)
//! 2. `/etc/sentimentsync/secrets.toml` (system, must be 0600)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{EmptyUnionPolicy, SimilarityOptions};
use crate::engine::{SentimentSync, SentimentSyncBuilder};
use crate::scoring::{GeminiConfig, Lexicon, gemini};
use crate::types::Method;
use crate::{Result, SentimentSyncError};

/// Environment variable consulted when no Gemini key is in the secrets file.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Command configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub methods: MethodsConfig,
    #[serde(default)]
    pub gemini: GeminiSection,
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Method selection.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodsConfig {
    /// Methods used when none are given on the command line
    /// (default: VADER and TextBlob).
    #[serde(default = "default_methods")]
    pub default: Vec<Method>,
}

impl Default for MethodsConfig {
    fn default() -> Self {
        Self {
            default: default_methods(),
        }
    }
}

fn default_methods() -> Vec<Method> {
    vec![Method::Vader, Method::TextBlob]
}

/// Gemini connection settings (the key lives in [`Secrets`]).
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSection {
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 60).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            base_url: default_gemini_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_gemini_model() -> String {
    gemini::DEFAULT_MODEL.to_string()
}

fn default_gemini_url() -> String {
    gemini::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Lexicon files; the built-in seed lexicons are used when unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub vader: Option<PathBuf>,
    #[serde(default)]
    pub textblob: Option<PathBuf>,
}

/// Analyzer settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub empty_union: EmptyUnionPolicy,
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub gemini: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist; the implicit locations are optional.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SentimentSyncError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            SentimentSyncError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(SentimentSyncError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".sentimentsync").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        let system_config = PathBuf::from("/etc/sentimentsync/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    pub fn similarity(&self) -> SimilarityOptions {
        SimilarityOptions {
            empty_union: self.analysis.empty_union,
        }
    }

    /// Engine builder with every method configured.
    ///
    /// Gemini is always registered; without a key it fails setup when
    /// requested and is dropped from that run.
    pub fn engine_builder(&self, secrets: &Secrets) -> Result<SentimentSyncBuilder> {
        let vader = match &self.lexicon.vader {
            Some(path) => Lexicon::load(path)?,
            None => Lexicon::vader_seed(),
        };
        let textblob = match &self.lexicon.textblob {
            Some(path) => Lexicon::load(path)?,
            None => Lexicon::textblob_seed(),
        };
        let gemini = GeminiConfig {
            api_key: secrets.gemini_api_key(),
            model: self.gemini.model.clone(),
            base_url: self.gemini.base_url.clone(),
            timeout_secs: self.gemini.timeout_secs,
        };

        Ok(SentimentSync::builder()
            .vader(vader)
            .textblob(textblob)
            .gemini(gemini)
            .similarity(self.similarity()))
    }
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Returns empty secrets if no file exists (the key may come from the
    /// environment).
    pub fn load() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".sentimentsync").join("secrets.toml");
            if user_secrets.exists() {
                return Self::load_from_file(&user_secrets);
            }
        }

        let system_secrets = PathBuf::from("/etc/sentimentsync/secrets.toml");
        if system_secrets.exists() {
            return Self::load_from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Load one secrets file after checking its permissions.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            SentimentSyncError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            SentimentSyncError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            SentimentSyncError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            return Err(SentimentSyncError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// Gemini key from the secrets file, falling back to `GEMINI_API_KEY`.
    pub fn gemini_api_key(&self) -> Option<String> {
        self.gemini
            .as_ref()
            .map(|s| s.api_key.clone())
            .or_else(|| std::env::var(GEMINI_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}
