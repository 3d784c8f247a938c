pub mod credentials;
pub mod gemini;
pub mod http_client;
pub mod perplexity;
pub mod prompts;
pub mod protocol;
pub mod provider;

pub use credentials::CredentialManager;
pub use provider::{CompletionBackend, GenerativeProvider, PromptedProvider};

use crate::config::{AgentConfig, ProviderKind};
use crate::error::ProviderError;
use gemini::GeminiBackend;
use perplexity::PerplexityBackend;

/// Build the primary provider for a run
///
/// `Ok(None)` means the local pipeline was selected. A selected network
/// provider without credentials fails with `MissingCredentials`.
pub fn get_provider(config: &AgentConfig) -> Result<Option<Box<dyn GenerativeProvider>>, ProviderError> {
    let provider: Box<dyn GenerativeProvider> = match config.provider {
        ProviderKind::Local => return Ok(None),
        ProviderKind::Gemini => Box::new(PromptedProvider::new(GeminiBackend::new(
            config.api_key.clone(),
            &config.model,
            config.request_timeout,
        )?)),
        ProviderKind::Perplexity => Box::new(PromptedProvider::new(PerplexityBackend::new(
            config.api_key.clone(),
            &config.model,
            config.request_timeout,
        )?)),
    };

    tracing::info!(
        "[Provider] Using {} with model {}",
        provider.name(),
        config.model
    );
    Ok(Some(provider))
}
