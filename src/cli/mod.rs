//! CLI module
//!
//! Command-line interface for running the source.
//!
//! # Commands
//!
//! - `spec` - Show the configuration schema
//! - `check` - Test connection to the API
//! - `discover` - List available streams with their sync modes
//! - `streams` - List stream names (lightweight)
//! - `read` - Extract data from streams

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
