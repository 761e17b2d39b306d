//! Shared stream parameters

use crate::config::{parse_start_date, SourceConfig, DEFAULT_PAGE_SIZE};
use crate::error::Result;
use crate::http::HttpClient;
use crate::template::TemplateContext;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;

/// Immutable parameters shared by every stream of one sync.
///
/// Cloning is cheap: the HTTP client (and the authenticator it carries) is
/// behind an `Arc` and is never mutated after construction.
#[derive(Debug, Clone)]
pub struct StreamDescriptor {
    subdomain: String,
    start_date: String,
    page_size: u32,
    client: Arc<HttpClient>,
}

impl StreamDescriptor {
    /// Create a descriptor around an already configured client
    pub fn new(
        subdomain: impl Into<String>,
        start_date: impl Into<String>,
        client: Arc<HttpClient>,
    ) -> Self {
        Self {
            subdomain: subdomain.into(),
            start_date: start_date.into(),
            page_size: DEFAULT_PAGE_SIZE,
            client,
        }
    }

    /// Create a descriptor from a parsed source config
    pub fn from_config(config: &SourceConfig, client: Arc<HttpClient>) -> Self {
        Self::new(&config.subdomain, &config.start_date, client).with_page_size(config.page_size)
    }

    /// Set the number of records requested per page
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Tenant identifier
    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    /// Start date as configured, unparsed
    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    /// Strictly parsed start date
    pub fn parsed_start_date(&self) -> Result<DateTime<Utc>> {
        parse_start_date(&self.start_date)
    }

    /// Records requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Shared HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Template context exposing the non-secret parameters as `config.*`
    pub fn template_context(&self) -> TemplateContext {
        TemplateContext::with_config(json!({
            "subdomain": self.subdomain,
            "start_date": self.start_date,
            "page_size": self.page_size,
        }))
    }
}
