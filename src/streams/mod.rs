//! Resource streams
//!
//! One [`ResourceStream`] implementation per upstream resource, a registry
//! that lists them in a fixed order, and the paged reader that turns a
//! stream into a lazy sequence of records.
//!
//! # Overview
//!
//! - [`StreamDescriptor`] - shared, immutable per-sync parameters
//! - [`ResourceStream`] - capability set of a single resource
//! - [`RecordStream`] - the lazy record sequence returned by `read_records`
//! - [`STREAM_REGISTRY`] / [`EXCLUDED_STREAMS`] - active and disabled resources

mod descriptor;
mod reader;
mod registry;
mod resources;
mod types;

pub use descriptor::StreamDescriptor;
pub use reader::RecordStream;
pub use registry::{
    build_streams, excluded_stream, ExcludedStream, StreamFactory, EXCLUDED_STREAMS,
    STREAM_REGISTRY,
};
pub use resources::{
    Limits, ObjectRecords, ObjectTypePolicies, ObjectTypes, RelationshipRecords,
    RelationshipTypes,
};
pub use types::{ParentSpec, ResourceStream};
