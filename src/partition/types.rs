//! Partition types and traits
//!
//! Defines the core partition abstractions.

use crate::error::Result;
use serde_json::{Map, Value};

/// A single partition value
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionValue {
    /// Unique identifier for this partition
    pub id: String,
    /// Values to inject into templates/queries
    pub values: Map<String, Value>,
}

impl PartitionValue {
    /// Create a new partition value
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: Map::new(),
        }
    }

    /// Add a string value
    #[must_use]
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Get a string value by key
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Values as a JSON object, for template rendering
    pub fn to_json(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

/// Trait for partition routers
pub trait PartitionRouter: Send + Sync {
    /// Generate partition values
    fn partitions(&self) -> Result<Vec<PartitionValue>>;

    /// Get the partition field name (for template interpolation)
    fn partition_field(&self) -> &str;
}
