//! Bearer credentials for outbound requests

/// Environment variable holding the session token unless configured otherwise
pub const DEFAULT_TOKEN_KEY: &str = "FORM_BUILDER_TOKEN";

/// Source of the bearer token attached to every request.
///
/// Read on every call; implementations must not cache.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Token stored in the process session under a fixed key
#[derive(Debug, Clone)]
pub struct SessionCredentials {
    key: String,
}

impl SessionCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for SessionCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_KEY)
    }
}

impl CredentialProvider for SessionCredentials {
    fn bearer_token(&self) -> Option<String> {
        std::env::var(&self.key).ok().filter(|t| !t.is_empty())
    }
}
