// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Sunshine Source
//!
//! A Rust-native source connector for the Zendesk Sunshine custom objects
//! API. It authenticates with an API token, pages through the list
//! endpoints and hands records out as lazy async streams.
//!
//! ## Streams
//!
//! | Stream                 | Partitioned by     | Cursor       |
//! |------------------------|--------------------|--------------|
//! | `object_types`         |                    |              |
//! | `object_records`       | object type        | `updated_at` |
//! | `relationship_types`   |                    |              |
//! | `relationship_records` | relationship type  | `created_at` |
//! | `object_type_policies` | object type        |              |
//! | `limits`               |                    |              |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use sunshine_source::{SunshineSource, SyncMode};
//!
//! #[tokio::main]
//! async fn main() -> sunshine_source::Result<()> {
//!     let config = serde_json::json!({
//!         "email": "ops@acme.com",
//!         "api_token": "...",
//!         "subdomain": "acme",
//!         "start_date": "2021-01-01T00:00:00Z"
//!     });
//!
//!     let source = SunshineSource::new();
//!     let status = source.check_connection(&config).await;
//!     assert!(status.success);
//!
//!     for stream in source.streams(&config)? {
//!         let mut records = stream.read_records(SyncMode::FullRefresh, None, None);
//!         while let Some(record) = records.try_next().await? {
//!             println!("{}: {record}", stream.name());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        SunshineSource                        │
//! │   check_connection() → CheckResult   streams() → [Stream]    │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌────────────┬────────────────┴─────┬──────────────┬──────────┐
//! │    Auth    │        HTTP          │  Pagination  │ Partition│
//! ├────────────┼──────────────────────┼──────────────┼──────────┤
//! │ Basic      │ GET, classification  │ links.next   │ Parent   │
//! │ API token  │ Rate limit           │ None         │          │
//! └────────────┴──────────────────────┴──────────────┴──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Source configuration
pub mod config;

/// Basic authentication
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Partition routing
pub mod partition;

/// Template interpolation
pub mod template;

/// Per-stream cursor state
pub mod state;

/// Resource streams and the paged record reader
pub mod streams;

/// Sync engine
pub mod engine;

/// Connector trait and protocol types
pub mod connector;

/// The Sunshine source
pub mod source;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use connector::{CheckResult, Connector};
pub use source::SunshineSource;
pub use streams::{RecordStream, ResourceStream};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
