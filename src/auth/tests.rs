//! Tests for the auth module

use super::*;
use crate::error::Error;
use base64::Engine;
use test_case::test_case;

fn decode_token(auth: &Authenticator) -> String {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(auth.token())
        .unwrap();
    String::from_utf8(decoded).unwrap()
}

#[test]
fn test_basic_header_value() {
    let auth = Authenticator::derive("user", "pass").unwrap();
    assert_eq!(auth.scheme(), "Basic");
    assert_eq!(auth.header_value(), "Basic dXNlcjpwYXNz");
    assert_eq!(decode_token(&auth), "user:pass");
}

#[test]
fn test_api_token_identity_encoding() {
    let cred = Credential::api_token("ops@acme.com", "tok3n");
    let auth = Authenticator::from_credential(&cred).unwrap();
    assert_eq!(decode_token(&auth), "ops@acme.com/token:tok3n");
}

#[test]
fn test_derive_is_deterministic() {
    let first = Authenticator::derive("ops@acme.com/token", "s3cr3t").unwrap();
    let second = Authenticator::derive("ops@acme.com/token", "s3cr3t").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.header_value(), second.header_value());
}

#[test]
fn test_non_ascii_input_is_utf8_encoded() {
    let auth = Authenticator::derive("josé", "contraseña").unwrap();
    assert_eq!(decode_token(&auth), "josé:contraseña");
}

#[test]
fn test_custom_scheme() {
    let auth = Authenticator::derive_with_scheme("user", "pass", "Token").unwrap();
    assert!(auth.header_value().starts_with("Token "));
}

#[test_case("", "secret" ; "empty identity")]
#[test_case("user", "" ; "empty secret")]
#[test_case("", "" ; "both empty")]
fn test_empty_inputs_rejected(identity: &str, secret: &str) {
    let err = Authenticator::derive(identity, secret).unwrap_err();
    assert!(matches!(err, Error::InvalidCredential { .. }));
}

#[test]
fn test_whitespace_inputs_are_encoded_verbatim() {
    let auth = Authenticator::derive("   ", " ").unwrap();
    assert_eq!(decode_token(&auth), "   : ");
}

#[test]
fn test_basic_unchecked_matches_derive() {
    let credential = Credential::api_token("ops@acme.com", "secret");
    assert_eq!(
        Authenticator::basic_unchecked(&credential),
        Authenticator::from_credential(&credential).unwrap()
    );

    let empty = Credential::api_token("ops@acme.com", "");
    let auth = Authenticator::basic_unchecked(&empty);
    assert_eq!(decode_token(&auth), "ops@acme.com/token:");
}

#[test_case("" ; "empty scheme")]
#[test_case("Ba sic" ; "scheme with space")]
#[test_case("Bäsic" ; "non ascii scheme")]
fn test_invalid_scheme_rejected(scheme: &str) {
    let err = Authenticator::derive_with_scheme("user", "pass", scheme).unwrap_err();
    assert!(matches!(err, Error::InvalidCredential { .. }));
}

#[test]
fn test_apply_sets_authorization_header() {
    let auth = Authenticator::derive("user", "pass").unwrap();

    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api")).unwrap();

    let built = req.build().unwrap();
    let header = built.headers().get("Authorization").unwrap();
    assert!(header.is_sensitive());
    assert_eq!(header.to_str().unwrap(), "Basic dXNlcjpwYXNz");
}

#[test]
fn test_debug_redacts_token() {
    let auth = Authenticator::derive("user", "pass").unwrap();
    let debug = format!("{auth:?}");
    assert!(!debug.contains("dXNlcjpwYXNz"));
    assert!(debug.contains("Basic"));
}
