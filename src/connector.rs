//! Connector trait and protocol types
//!
//! Defines the core Connector trait and the values it returns: the
//! connector specification, connection check results and the stream
//! catalog.

use crate::error::Result;
use crate::types::SyncMode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Connector Spec
// ============================================================================

/// Connector specification returned by spec()
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorSpec {
    /// Where the upstream API is documented
    pub documentation_url: String,

    /// JSON schema of the configuration object
    pub connection_specification: Value,

    /// Sync modes the connector can run
    pub supported_sync_modes: Vec<SyncMode>,
}

// ============================================================================
// Check Result
// ============================================================================

/// Result of a connection check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// Protocol status string
    pub fn status(&self) -> &'static str {
        if self.success {
            "SUCCEEDED"
        } else {
            "FAILED"
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// A stream as advertised by discover()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStream {
    /// Stream name
    pub name: String,

    /// JSON schema of a record
    pub json_schema: Value,

    /// Sync modes the stream supports
    pub supported_sync_modes: Vec<SyncMode>,

    /// Whether the cursor field is fixed by the source
    pub source_defined_cursor: bool,

    /// Cursor field path, if the stream has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_cursor_field: Option<Vec<String>>,

    /// Primary key paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_defined_primary_key: Option<Vec<Vec<String>>>,
}

/// All streams a source exposes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub streams: Vec<CatalogStream>,
}

impl Catalog {
    /// Find a stream by name
    pub fn get(&self, name: &str) -> Option<&CatalogStream> {
        self.streams.iter().find(|s| s.name == name)
    }
}

// ============================================================================
// Connector Trait
// ============================================================================

/// Core trait that all connectors implement
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the connector specification
    fn spec(&self) -> ConnectorSpec;

    /// Tests if credentials and configuration are valid
    async fn check(&self, config: &Value) -> Result<CheckResult>;

    /// Lists available streams from the source
    async fn discover(&self, config: &Value) -> Result<Catalog>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_success() {
        let result = CheckResult::success();
        assert!(result.success);
        assert!(result.message.is_none());
        assert_eq!(result.status(), "SUCCEEDED");
    }

    #[test]
    fn test_check_result_failure() {
        let result = CheckResult::failure("Connection failed");
        assert!(!result.success);
        assert_eq!(result.message, Some("Connection failed".to_string()));
        assert_eq!(result.status(), "FAILED");
    }

    #[test]
    fn test_catalog_lookup_and_serialization() {
        let catalog = Catalog {
            streams: vec![CatalogStream {
                name: "limits".to_string(),
                json_schema: serde_json::json!({"type": "object"}),
                supported_sync_modes: vec![SyncMode::FullRefresh],
                source_defined_cursor: false,
                default_cursor_field: None,
                source_defined_primary_key: Some(vec![vec!["key".to_string()]]),
            }],
        };

        assert!(catalog.get("limits").is_some());
        assert!(catalog.get("jobs").is_none());

        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["streams"][0]["supported_sync_modes"][0], "full_refresh");
        assert!(json["streams"][0].get("default_cursor_field").is_none());
    }
}
