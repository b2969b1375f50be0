use std::sync::Arc;

/// Source of the bearer token attached to API requests.
///
/// The token is read on every request; there is no refresh or expiry
/// handling.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

impl<T: TokenProvider + ?Sized> TokenProvider for Arc<T> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

/// Fixed token, typically from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|token| !token.trim().is_empty()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_static_token_is_none() {
        assert_eq!(StaticToken::new(Some("  ".to_string())).token(), None);
        assert_eq!(
            StaticToken::new(Some("abc".to_string())).token().as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn shared_provider_reads_through_arc() {
        let provider: Arc<dyn TokenProvider> = Arc::new(StaticToken::new(Some("jwt".to_string())));
        let cloned = provider.clone();
        assert_eq!(cloned.token().as_deref(), Some("jwt"));
    }
}
