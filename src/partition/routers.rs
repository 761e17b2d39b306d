//! Partition router implementations

use super::types::{PartitionRouter, PartitionValue};
use crate::error::Result;
use crate::types::extract_path;
use serde_json::Value;
use std::collections::HashSet;

/// Parent stream-based partition router
///
/// Creates partitions from records in a parent stream.
#[derive(Debug, Clone)]
pub struct ParentRouter {
    /// Records from parent stream
    parent_records: Vec<Value>,
    /// Key to extract from parent records
    parent_key: String,
    /// Field name for partition
    partition_field: String,
}

impl ParentRouter {
    /// Create a new parent router
    pub fn new(
        parent_records: Vec<Value>,
        parent_key: impl Into<String>,
        partition_field: impl Into<String>,
    ) -> Self {
        Self {
            parent_records,
            parent_key: parent_key.into(),
            partition_field: partition_field.into(),
        }
    }

    /// Extract value from a record using the parent key
    fn extract_key(&self, record: &Value) -> Option<String> {
        match extract_path(record, &self.parent_key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl PartitionRouter for ParentRouter {
    /// One partition per distinct key, in first-seen order. Records without
    /// the key are ignored.
    fn partitions(&self) -> Result<Vec<PartitionValue>> {
        let mut partitions = Vec::new();
        let mut seen = HashSet::new();

        for record in &self.parent_records {
            if let Some(key_value) = self.extract_key(record) {
                if seen.insert(key_value.clone()) {
                    partitions.push(
                        PartitionValue::new(&key_value)
                            .with_string(self.partition_field.clone(), &key_value),
                    );
                }
            }
        }

        Ok(partitions)
    }

    fn partition_field(&self) -> &str {
        &self.partition_field
    }
}
