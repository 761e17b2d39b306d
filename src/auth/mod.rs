//! Authentication module
//!
//! Derives the `Authorization` header sent with every request from a
//! [`Credential`]. The derived [`Authenticator`] is an immutable value and
//! can be shared between streams behind an `Arc`.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, DEFAULT_SCHEME};
pub use types::Credential;

#[cfg(test)]
mod tests;
