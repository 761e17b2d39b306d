//! Authenticator implementation
//!
//! Builds the `Authorization` header for HTTP basic auth and applies it to
//! outgoing requests.

use super::types::Credential;
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;
use std::fmt;

/// Scheme used when none is given
pub const DEFAULT_SCHEME: &str = "Basic";

/// Immutable authorization header derived from a credential.
///
/// The header value is a pure function of the inputs: deriving twice from
/// the same identity and secret yields equal authenticators.
#[derive(Clone, PartialEq, Eq)]
pub struct Authenticator {
    /// Auth scheme, e.g. "Basic"
    scheme: String,
    /// base64(identity:secret)
    token: String,
}

impl Authenticator {
    /// Derive a `Basic` authenticator from an identity and a secret
    pub fn derive(identity: &str, secret: &str) -> Result<Self> {
        Self::derive_with_scheme(identity, secret, DEFAULT_SCHEME)
    }

    /// Derive an authenticator from a [`Credential`]
    pub fn from_credential(credential: &Credential) -> Result<Self> {
        Self::derive(&credential.identity, &credential.secret)
    }

    /// Derive an authenticator using a custom scheme
    pub fn derive_with_scheme(identity: &str, secret: &str, scheme: &str) -> Result<Self> {
        if identity.is_empty() {
            return Err(Error::invalid_credential("identity must not be empty"));
        }
        if secret.is_empty() {
            return Err(Error::invalid_credential("secret must not be empty"));
        }
        if scheme.is_empty() || !scheme.bytes().all(is_token_char) {
            return Err(Error::invalid_credential(format!(
                "'{scheme}' is not a valid authorization scheme"
            )));
        }

        Ok(Self::encode(identity, secret, scheme))
    }

    /// Encode a `Basic` header without validating the credential.
    ///
    /// Used where construction must not fail on credential contents; an
    /// unusable credential is then rejected by the server.
    pub fn basic_unchecked(credential: &Credential) -> Self {
        Self::encode(&credential.identity, &credential.secret, DEFAULT_SCHEME)
    }

    fn encode(identity: &str, secret: &str, scheme: &str) -> Self {
        Self {
            scheme: scheme.to_string(),
            token: STANDARD.encode(format!("{identity}:{secret}").as_bytes()),
        }
    }

    /// The auth scheme
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The encoded token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Full header value: `"<scheme> <token>"`
    pub fn header_value(&self) -> String {
        format!("{} {}", self.scheme, self.token)
    }

    /// Apply the authorization header to a request builder
    pub fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let mut value = HeaderValue::from_str(&self.header_value())
            .map_err(|e| Error::invalid_credential(format!("unusable header value: {e}")))?;
        value.set_sensitive(true);
        Ok(req.header(AUTHORIZATION, value))
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("scheme", &self.scheme)
            .field("token", &"***")
            .finish()
    }
}

/// RFC 7230 `tchar`
fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
