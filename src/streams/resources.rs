//! Concrete resource streams

use super::descriptor::StreamDescriptor;
use super::types::{json_kind, ParentSpec, ResourceStream};
use crate::error::{Error, Result};
use crate::pagination::{NoPaginator, Paginator};
use crate::partition::PartitionValue;
use crate::types::{extract_path, Record};
use serde_json::Value;

/// Partition variable shared by all per-type streams
const TYPE_FIELD: &str = "type";

// ============================================================================
// Object types
// ============================================================================

/// Custom object type definitions
#[derive(Debug, Clone)]
pub struct ObjectTypes {
    descriptor: StreamDescriptor,
}

impl ObjectTypes {
    pub fn new(descriptor: StreamDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ResourceStream for ObjectTypes {
    fn name(&self) -> &'static str {
        "object_types"
    }

    fn descriptor(&self) -> &StreamDescriptor {
        &self.descriptor
    }

    fn path_template(&self) -> &'static str {
        "objects/types"
    }

    fn primary_key(&self) -> &'static str {
        "key"
    }
}

/// Object records, listed per object type
#[derive(Debug, Clone)]
pub struct ObjectRecords {
    descriptor: StreamDescriptor,
}

impl ObjectRecords {
    pub fn new(descriptor: StreamDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ResourceStream for ObjectRecords {
    fn name(&self) -> &'static str {
        "object_records"
    }

    fn descriptor(&self) -> &StreamDescriptor {
        &self.descriptor
    }

    fn path_template(&self) -> &'static str {
        "objects/records"
    }

    fn primary_key(&self) -> &'static str {
        "id"
    }

    fn cursor_field(&self) -> Option<&'static str> {
        Some("updated_at")
    }

    fn parent(&self) -> Option<ParentSpec> {
        Some(ParentSpec {
            stream: Box::new(ObjectTypes::new(self.descriptor.clone())),
            parent_key: "key",
            partition_field: TYPE_FIELD,
        })
    }

    fn request_params(&self) -> &'static [(&'static str, &'static str)] {
        &[("type", "{{ partition.type }}")]
    }
}

// ============================================================================
// Relationships
// ============================================================================

/// Relationship type definitions
#[derive(Debug, Clone)]
pub struct RelationshipTypes {
    descriptor: StreamDescriptor,
}

impl RelationshipTypes {
    pub fn new(descriptor: StreamDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ResourceStream for RelationshipTypes {
    fn name(&self) -> &'static str {
        "relationship_types"
    }

    fn descriptor(&self) -> &StreamDescriptor {
        &self.descriptor
    }

    fn path_template(&self) -> &'static str {
        "relationships/types"
    }

    fn primary_key(&self) -> &'static str {
        "key"
    }
}

/// Relationship records, listed per relationship type
#[derive(Debug, Clone)]
pub struct RelationshipRecords {
    descriptor: StreamDescriptor,
}

impl RelationshipRecords {
    pub fn new(descriptor: StreamDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ResourceStream for RelationshipRecords {
    fn name(&self) -> &'static str {
        "relationship_records"
    }

    fn descriptor(&self) -> &StreamDescriptor {
        &self.descriptor
    }

    fn path_template(&self) -> &'static str {
        "relationships/records"
    }

    fn primary_key(&self) -> &'static str {
        "id"
    }

    // Relationship records are immutable once created
    fn cursor_field(&self) -> Option<&'static str> {
        Some("created_at")
    }

    fn parent(&self) -> Option<ParentSpec> {
        Some(ParentSpec {
            stream: Box::new(RelationshipTypes::new(self.descriptor.clone())),
            parent_key: "key",
            partition_field: TYPE_FIELD,
        })
    }

    fn request_params(&self) -> &'static [(&'static str, &'static str)] {
        &[("type", "{{ partition.type }}")]
    }
}

// ============================================================================
// Policies
// ============================================================================

/// Permission policy of each object type.
///
/// The endpoint returns a single object instead of a list; it is emitted as
/// one record tagged with the object type it belongs to.
#[derive(Debug, Clone)]
pub struct ObjectTypePolicies {
    descriptor: StreamDescriptor,
}

impl ObjectTypePolicies {
    pub fn new(descriptor: StreamDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ResourceStream for ObjectTypePolicies {
    fn name(&self) -> &'static str {
        "object_type_policies"
    }

    fn descriptor(&self) -> &StreamDescriptor {
        &self.descriptor
    }

    fn path_template(&self) -> &'static str {
        "objects/types/{{ partition.type }}/permissions"
    }

    fn primary_key(&self) -> &'static str {
        "object_type"
    }

    fn parent(&self) -> Option<ParentSpec> {
        Some(ParentSpec {
            stream: Box::new(ObjectTypes::new(self.descriptor.clone())),
            parent_key: "key",
            partition_field: TYPE_FIELD,
        })
    }

    fn paginator(&self) -> Box<dyn Paginator> {
        Box::new(NoPaginator)
    }

    fn parse_page(&self, body: &Value, partition: Option<&PartitionValue>) -> Result<Vec<Record>> {
        let object_type = partition.and_then(|p| p.get_string(TYPE_FIELD));

        match extract_path(body, "data") {
            Some(Value::Object(policy)) => {
                let mut record = policy.clone();
                if let Some(object_type) = object_type {
                    record.insert(
                        "object_type".to_string(),
                        Value::String(object_type.to_string()),
                    );
                }
                Ok(vec![Value::Object(record)])
            }
            Some(Value::Null) => Ok(Vec::new()),
            Some(other) => Err(Error::decode(format!(
                "Expected policy 'data' to be an object, got {}",
                json_kind(other)
            ))),
            None => Err(Error::decode("Response has no 'data' field")),
        }
    }
}

// ============================================================================
// Limits
// ============================================================================

/// Account limits. Cheap to fetch, used as the connection probe.
#[derive(Debug, Clone)]
pub struct Limits {
    descriptor: StreamDescriptor,
}

impl Limits {
    pub fn new(descriptor: StreamDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ResourceStream for Limits {
    fn name(&self) -> &'static str {
        "limits"
    }

    fn descriptor(&self) -> &StreamDescriptor {
        &self.descriptor
    }

    fn path_template(&self) -> &'static str {
        "limits"
    }

    fn primary_key(&self) -> &'static str {
        "key"
    }

    fn paginator(&self) -> Box<dyn Paginator> {
        Box::new(NoPaginator)
    }
}
