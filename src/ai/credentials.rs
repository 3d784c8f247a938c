use crate::config::ProviderKind;

/// Credential lookup for provider API keys
///
/// Keys come from the process environment (after `.env` has been loaded at
/// startup). An empty or whitespace-only value counts as absent.
pub struct CredentialManager;

impl CredentialManager {
    /// Environment variable holding the key for a provider
    pub fn env_var(provider: ProviderKind) -> Option<&'static str> {
        match provider {
            ProviderKind::Gemini => Some("GEMINI_API_KEY"),
            ProviderKind::Perplexity => Some("PERPLEXITY_API_KEY"),
            ProviderKind::Local => None,
        }
    }

    /// Get an API key for a provider
    pub fn get_api_key(provider: ProviderKind) -> Option<String> {
        let var = Self::env_var(provider)?;
        Self::clean(std::env::var(var).ok())
    }

    /// Normalise a raw key value: trimmed, `None` when blank
    pub fn clean(raw: Option<String>) -> Option<String> {
        raw.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_keys_are_absent() {
        assert_eq!(CredentialManager::clean(None), None);
        assert_eq!(CredentialManager::clean(Some("   ".to_string())), None);
        assert_eq!(
            CredentialManager::clean(Some(" abc \n".to_string())),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_local_has_no_key() {
        assert_eq!(CredentialManager::env_var(ProviderKind::Local), None);
        assert_eq!(CredentialManager::get_api_key(ProviderKind::Local), None);
    }
}
