//! Stream trait and related types

use super::descriptor::StreamDescriptor;
use crate::error::{Error, Result};
use crate::pagination::{LinksCursorPaginator, Paginator};
use crate::partition::PartitionValue;
use crate::types::{extract_path, Record};
use serde_json::Value;

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "per_page";

/// A parent resource whose records partition a child stream
pub struct ParentSpec {
    /// Stream listing the parent records
    pub stream: Box<dyn ResourceStream>,
    /// Dot path of the key in each parent record
    pub parent_key: &'static str,
    /// Name the key is exposed under as `{{ partition.<name> }}`
    pub partition_field: &'static str,
}

impl std::fmt::Debug for ParentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParentSpec")
            .field("stream", &self.stream.name())
            .field("parent_key", &self.parent_key)
            .field("partition_field", &self.partition_field)
            .finish()
    }
}

/// Capability set of a single upstream resource.
///
/// Implementations only describe the resource; fetching, pagination and
/// filtering live in `read_records`, which is defined once for every
/// stream.
pub trait ResourceStream: Send + Sync {
    /// Stream name as exposed to the caller
    fn name(&self) -> &'static str;

    /// Shared parameters this stream was built with
    fn descriptor(&self) -> &StreamDescriptor;

    /// Resource path relative to the base URL, may reference `{{ partition.* }}`
    fn path_template(&self) -> &'static str;

    /// Field uniquely identifying a record
    fn primary_key(&self) -> &'static str;

    /// Timestamp field used for start-date filtering and incremental state
    fn cursor_field(&self) -> Option<&'static str> {
        None
    }

    /// Whether incremental reads are meaningful for this resource
    fn supports_incremental(&self) -> bool {
        self.cursor_field().is_some()
    }

    /// Parent resource that partitions this one
    fn parent(&self) -> Option<ParentSpec> {
        None
    }

    /// Extra query parameters as templates
    fn request_params(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Pagination strategy for this resource
    fn paginator(&self) -> Box<dyn Paginator> {
        Box::new(
            LinksCursorPaginator::default()
                .with_page_size(PAGE_SIZE_PARAM, self.descriptor().page_size()),
        )
    }

    /// Extract the records of one response body
    fn parse_page(&self, body: &Value, _partition: Option<&PartitionValue>) -> Result<Vec<Record>> {
        data_records(body)
    }
}

/// Records under the `data` key of a response envelope.
///
/// A `null` value is an empty page; a missing key or a non-array value is
/// a decode error.
pub(crate) fn data_records(body: &Value) -> Result<Vec<Record>> {
    match extract_path(body, "data") {
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(Value::Null) => Ok(Vec::new()),
        Some(other) => Err(Error::decode(format!(
            "Expected 'data' to be an array, got {}",
            json_kind(other)
        ))),
        None => Err(Error::decode("Response has no 'data' field")),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
