//! Credential types

use std::fmt;

/// Identity and secret pair used to derive an [`Authenticator`].
///
/// Never persisted. The secret is redacted from `Debug` output.
///
/// [`Authenticator`]: super::Authenticator
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Identity, e.g. `user@example.com/token`
    pub identity: String,
    /// Secret token
    pub secret: String,
}

impl Credential {
    /// Create a new credential
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }

    /// Credential for API token auth: the identity is `{email}/token`
    pub fn api_token(email: &str, token: impl Into<String>) -> Self {
        Self::new(format!("{email}/token"), token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("identity", &self.identity)
            .field("secret", &"***")
            .finish()
    }
}
