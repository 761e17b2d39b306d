//! HTTP client module
//!
//! Thin wrapper over reqwest that applies authentication, default headers
//! and optional client-side pacing, and classifies failures.
//!
//! # Features
//!
//! - **Authentication**: every request carries the shared authenticator's header
//! - **Rate Limiting**: token bucket pacing using governor
//! - **Error Classification**: network errors, 429 and 5xx are transient; other 4xx are permanent
//!
//! The client never retries. Retry and backoff belong to whoever drives the
//! streams.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
