//! Zendesk Sunshine source
//!
//! Builds the shared authenticator and HTTP client from configuration and
//! exposes the connection check and the ordered list of streams.

use crate::auth::Authenticator;
use crate::config::{connection_specification, SourceConfig};
use crate::connector::{Catalog, CatalogStream, CheckResult, Connector, ConnectorSpec};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::streams::{build_streams, Limits, ResourceStream, StreamDescriptor};
use crate::template::{self, TemplateContext};
use crate::types::SyncMode;
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

const DOCUMENTATION_URL: &str =
    "https://developer.zendesk.com/api-reference/custom-data/introduction/";

/// Source for the Sunshine custom objects API
#[derive(Debug, Clone, Copy, Default)]
pub struct SunshineSource;

impl SunshineSource {
    pub fn new() -> Self {
        Self
    }

    /// Check that the configuration can be used to read data.
    ///
    /// Parses `start_date` strictly, derives the authenticator and reads the
    /// first record of the limits stream. Never fails: every problem is
    /// reported through the returned [`CheckResult`].
    pub async fn check_connection(&self, config: &Value) -> CheckResult {
        match self.probe(config).await {
            Ok(()) => {
                info!("Connection check succeeded");
                CheckResult::success()
            }
            Err(e) => {
                warn!("Connection check failed: {e}");
                CheckResult::failure(e.to_string())
            }
        }
    }

    async fn probe(&self, config: &Value) -> Result<()> {
        let config = SourceConfig::from_value(config)?;
        config.parsed_start_date()?;

        let authenticator = Authenticator::from_credential(&config.credential())?;
        let probe = Limits::new(build_descriptor(&config, authenticator)?);
        let probe: &dyn ResourceStream = &probe;
        let mut records = probe.read_records(SyncMode::FullRefresh, None, None);

        match records.next().await {
            Some(Ok(_)) => Ok(()),
            Some(Err(e)) => Err(e),
            None => Err(Error::Other(format!(
                "Probe stream '{}' returned no records",
                probe.name()
            ))),
        }
    }

    /// Every active stream, in registry order.
    ///
    /// Only the presence of the required keys is checked; no request is
    /// made, and a malformed `start_date` or an empty token is accepted here.
    pub fn streams(&self, config: &Value) -> Result<Vec<Box<dyn ResourceStream>>> {
        let config = SourceConfig::from_value(config)?;
        let authenticator = Authenticator::basic_unchecked(&config.credential());
        let descriptor = build_descriptor(&config, authenticator)?;
        Ok(build_streams(&descriptor))
    }
}

/// Build the client shared by every stream
fn build_descriptor(
    config: &SourceConfig,
    authenticator: Authenticator,
) -> Result<StreamDescriptor> {
    let context = TemplateContext::with_config(json!({ "subdomain": config.subdomain }));
    let base_url = template::render(config.base_url_template(), &context)?;
    debug!(%base_url, "Building HTTP client");

    let mut http = HttpClientConfig::builder().base_url(base_url);
    if let Some(rps) = config.requests_per_second {
        http = http.rate_limit(RateLimiterConfig::per_second(rps));
    }

    let client = HttpClient::with_auth(http.build(), Arc::new(authenticator))?;
    Ok(StreamDescriptor::from_config(config, Arc::new(client)))
}

fn catalog_stream(stream: &dyn ResourceStream) -> CatalogStream {
    let supported_sync_modes = if stream.supports_incremental() {
        vec![SyncMode::FullRefresh, SyncMode::Incremental]
    } else {
        vec![SyncMode::FullRefresh]
    };

    CatalogStream {
        name: stream.name().to_string(),
        json_schema: json!({ "type": "object", "additionalProperties": true }),
        supported_sync_modes,
        source_defined_cursor: stream.cursor_field().is_some(),
        default_cursor_field: stream.cursor_field().map(|f| vec![f.to_string()]),
        source_defined_primary_key: Some(vec![vec![stream.primary_key().to_string()]]),
    }
}

#[async_trait]
impl Connector for SunshineSource {
    fn spec(&self) -> ConnectorSpec {
        ConnectorSpec {
            documentation_url: DOCUMENTATION_URL.to_string(),
            connection_specification: connection_specification(),
            supported_sync_modes: vec![SyncMode::FullRefresh, SyncMode::Incremental],
        }
    }

    async fn check(&self, config: &Value) -> Result<CheckResult> {
        Ok(self.check_connection(config).await)
    }

    async fn discover(&self, config: &Value) -> Result<Catalog> {
        let streams = self
            .streams(config)?
            .iter()
            .map(|s| catalog_stream(s.as_ref()))
            .collect();
        Ok(Catalog { streams })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> Value {
        json!({
            "email": "ops@acme.com",
            "api_token": "secret",
            "subdomain": "acme",
            "start_date": "2021-01-01T00:00:00Z",
            "base_url": server.uri(),
        })
    }

    fn test_authenticator() -> Authenticator {
        Authenticator::derive("ops@acme.com/token", "secret").unwrap()
    }

    async fn mount_limits(server: &MockServer, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path("/limits"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_check_connection_succeeds() {
        let server = MockServer::start().await;
        let expected = Authenticator::derive("ops@acme.com/token", "secret")
            .unwrap()
            .header_value();

        Mock::given(method("GET"))
            .and(path("/limits"))
            .and(header("authorization", expected.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"key": "records", "limit": 1000, "count": 2}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = SunshineSource::new()
            .check_connection(&config_for(&server))
            .await;
        assert_eq!(result, CheckResult::success());
    }

    #[tokio::test]
    async fn test_check_connection_rejects_malformed_start_date() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config["start_date"] = json!("not-a-date");

        let result = SunshineSource::new().check_connection(&config).await;
        assert!(!result.success);
        assert!(result.message.unwrap().contains("start_date"));
    }

    #[tokio::test]
    async fn test_check_connection_reports_unauthorized() {
        let server = MockServer::start().await;
        mount_limits(&server, 401, json!({"error": "Couldn't authenticate you"})).await;

        let result = SunshineSource::new()
            .check_connection(&config_for(&server))
            .await;
        assert!(!result.success);
        assert!(result.message.unwrap().contains("401"));
    }

    #[tokio::test]
    async fn test_check_connection_empty_probe_fails() {
        let server = MockServer::start().await;
        mount_limits(&server, 200, json!({"data": []})).await;

        let result = SunshineSource::new()
            .check_connection(&config_for(&server))
            .await;
        assert!(!result.success);
        assert!(result.message.unwrap().contains("no records"));
    }

    #[test_case("email" ; "missing email")]
    #[test_case("api_token" ; "missing token")]
    #[tokio::test]
    async fn test_check_connection_missing_key(key: &str) {
        let server = MockServer::start().await;
        let mut config = config_for(&server);
        config.as_object_mut().unwrap().remove(key);

        let result = SunshineSource::new().check_connection(&config).await;
        assert!(!result.success);
        assert!(result.message.unwrap().contains(key));
    }

    #[tokio::test]
    async fn test_check_connection_empty_token() {
        let server = MockServer::start().await;
        let mut config = config_for(&server);
        config["api_token"] = json!("");

        let result = SunshineSource::new().check_connection(&config).await;
        assert!(!result.success);
        assert!(result.message.unwrap().starts_with("Invalid credential"));
    }

    #[test]
    fn test_streams_tolerates_malformed_start_date() {
        let config = json!({
            "email": "ops@acme.com",
            "api_token": "secret",
            "subdomain": "acme",
            "start_date": "not-a-date",
        });

        let streams = SunshineSource::new().streams(&config).unwrap();
        assert_eq!(streams.len(), 6);
    }

    #[test]
    fn test_streams_requires_keys() {
        let config = json!({"email": "ops@acme.com", "api_token": "secret"});
        let Err(err) = SunshineSource::new().streams(&config) else {
            panic!("Expected missing keys to be rejected");
        };
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_streams_tolerates_empty_token() {
        let config = json!({
            "email": "ops@acme.com",
            "api_token": "",
            "subdomain": "acme",
            "start_date": "2021-01-01",
        });

        let streams = SunshineSource::new().streams(&config).unwrap();
        assert_eq!(streams.len(), 6);
    }

    #[test]
    fn test_default_base_url_uses_subdomain() {
        let config = SourceConfig::from_value(&json!({
            "email": "ops@acme.com",
            "api_token": "secret",
            "subdomain": "acme",
            "start_date": "2021-01-01",
        }))
        .unwrap();

        let descriptor = build_descriptor(&config, test_authenticator()).unwrap();
        assert_eq!(
            descriptor.client().base_url(),
            Some("https://acme.zendesk.com/api/sunshine")
        );
        assert!(!descriptor.client().has_rate_limiter());
    }

    #[test]
    fn test_requests_per_second_enables_rate_limit() {
        let config = SourceConfig::from_value(&json!({
            "email": "ops@acme.com",
            "api_token": "secret",
            "subdomain": "acme",
            "start_date": "2021-01-01",
            "requests_per_second": 2,
        }))
        .unwrap();

        let descriptor = build_descriptor(&config, test_authenticator()).unwrap();
        assert!(descriptor.client().has_rate_limiter());
    }

    #[tokio::test]
    async fn test_discover_catalog() {
        let config = json!({
            "email": "ops@acme.com",
            "api_token": "secret",
            "subdomain": "acme",
            "start_date": "2021-01-01",
        });

        let catalog = SunshineSource::new().discover(&config).await.unwrap();
        assert_eq!(catalog.streams.len(), 6);

        let records = catalog.get("object_records").unwrap();
        assert_eq!(
            records.supported_sync_modes,
            vec![SyncMode::FullRefresh, SyncMode::Incremental]
        );
        assert_eq!(records.default_cursor_field, Some(vec!["updated_at".to_string()]));

        let limits = catalog.get("limits").unwrap();
        assert_eq!(limits.supported_sync_modes, vec![SyncMode::FullRefresh]);
        assert!(!limits.source_defined_cursor);
        assert!(catalog.get("jobs").is_none());
    }

    #[test]
    fn test_spec() {
        let spec = SunshineSource::new().spec();
        assert!(spec.connection_specification["properties"]
            .get("api_token")
            .is_some());
        assert_eq!(spec.supported_sync_modes.len(), 2);
    }
}
