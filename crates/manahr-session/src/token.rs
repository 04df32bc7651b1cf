//! Seam to the external session provider that owns tokens

use parking_lot::RwLock;
use tracing::debug;

use crate::models::AuthTokens;

/// The session provider as seen from this crate
///
/// Implementations hold access and refresh tokens; the identity store only
/// hands tokens over on login and asks for them to be purged on logout.
pub trait TokenProvider: Send + Sync {
    /// Take ownership of freshly issued tokens
    fn store_tokens(&self, tokens: AuthTokens);

    /// Current access token, if any
    fn access_token(&self) -> Option<String>;

    /// Purge every locally cached token
    fn clear_tokens(&self);
}

/// Token provider keeping tokens in process memory
#[derive(Debug, Default)]
pub struct InMemoryTokenProvider {
    tokens: RwLock<Option<AuthTokens>>,
}

impl InMemoryTokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current refresh token, if any
    pub fn refresh_token(&self) -> Option<String> {
        self.tokens.read().as_ref().map(|t| t.refresh_token.clone())
    }

    /// `Authorization` header value for the current access token
    pub fn bearer_header(&self) -> Option<String> {
        self.access_token().map(|token| format!("Bearer {}", token))
    }
}

impl TokenProvider for InMemoryTokenProvider {
    fn store_tokens(&self, tokens: AuthTokens) {
        *self.tokens.write() = Some(tokens);
        debug!("Tokens stored");
    }

    fn access_token(&self) -> Option<String> {
        self.tokens.read().as_ref().map(|t| t.access_token.clone())
    }

    fn clear_tokens(&self) {
        *self.tokens.write() = None;
        debug!("Tokens cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_clear() {
        let provider = InMemoryTokenProvider::new();
        assert!(provider.access_token().is_none());

        provider.store_tokens(AuthTokens::new("at", "rt"));
        assert_eq!(provider.access_token().as_deref(), Some("at"));
        assert_eq!(provider.refresh_token().as_deref(), Some("rt"));
        assert_eq!(provider.bearer_header().as_deref(), Some("Bearer at"));

        provider.clear_tokens();
        assert!(provider.access_token().is_none());
        assert!(provider.bearer_header().is_none());
    }
}
