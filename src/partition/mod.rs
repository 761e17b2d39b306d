//! Partition routing module
//!
//! Some resources are only listable per parent: object records per object
//! type, relationship records per relationship type, policies per object
//! type. A [`ParentRouter`] turns the parent's records into one
//! [`PartitionValue`] per distinct key, and each partition is paginated
//! on its own.

mod routers;
mod types;

pub use routers::ParentRouter;
pub use types::{PartitionRouter, PartitionValue};
