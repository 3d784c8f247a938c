//! Run configuration
//!
//! Read once at startup and threaded explicitly into the pipeline. Nothing
//! downstream looks at the environment.

use crate::ai::gemini::DEFAULT_GEMINI_MODEL;
use crate::ai::http_client::DEFAULT_TIMEOUT;
use crate::ai::perplexity::DEFAULT_PERPLEXITY_MODEL;
use crate::ai::CredentialManager;
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Which generative backend drives the primary path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    Perplexity,
    /// No network provider; local fallbacks only
    Local,
}

/// Unknown names select the local pipeline
impl FromStr for ProviderKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "gemini" => Self::Gemini,
            "perplexity" => Self::Perplexity,
            _ => Self::Local,
        })
    }
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Perplexity => "perplexity",
            Self::Local => "local",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => DEFAULT_GEMINI_MODEL,
            Self::Perplexity => DEFAULT_PERPLEXITY_MODEL,
            Self::Local => "",
        }
    }
}

/// `1`, `true`, `yes`, `on` (any case, surrounding whitespace ignored)
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Process-wide settings for one run
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub model: String,
    /// Disable every fallback when the primary provider fails
    pub strict: bool,
    pub request_timeout: Duration,
    pub input_dir: PathBuf,
    /// Defaults to `input_dir`
    pub output_dir: Option<PathBuf>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            strict: false,
            request_timeout: DEFAULT_TIMEOUT,
            input_dir: PathBuf::from("."),
            output_dir: None,
        }
    }
}

impl AgentConfig {
    /// Directory artifacts are written to
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => self.input_dir.clone(),
        }
    }

    /// Resolve the API key for the provider from the environment
    pub fn with_env_credentials(mut self) -> Self {
        self.api_key = CredentialManager::get_api_key(self.provider);
        self
    }
}

/// Load `.env` from the current directory, falling back to the parent
pub fn load_dotenv() {
    if dotenvy::dotenv().is_err() {
        let _ = dotenvy::from_path("../.env");
    }
}
