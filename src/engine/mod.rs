//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Drives streams to completion and tracks state
//! - `SyncConfig` - Configuration for sync operations
//! - Message types for output (Record, State, Log)

mod types;

pub use types::{Message, SyncConfig, SyncStats};

use crate::error::Result;
use crate::state::State;
use crate::streams::ResourceStream;
use crate::types::{extract_path, SyncMode};
use futures::TryStreamExt;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{info, warn};

/// Sync engine for orchestrating data extraction
#[derive(Debug, Default)]
pub struct SyncEngine {
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync a single stream, handing every message to `emit`.
    ///
    /// In incremental mode the stream's cursor in `state` is moved to the
    /// latest cursor value seen and a `State` message is emitted once the
    /// stream has been read completely. Returns the number of records
    /// emitted.
    pub async fn sync_stream<F>(
        &mut self,
        stream: &dyn ResourceStream,
        sync_mode: SyncMode,
        state: &mut State,
        emit: &mut F,
    ) -> Result<usize>
    where
        F: FnMut(Message),
    {
        let start = Instant::now();
        let name = stream.name();

        let sync_mode = if sync_mode == SyncMode::Incremental && !stream.supports_incremental() {
            warn!(stream = name, "Incremental not supported, using full refresh");
            SyncMode::FullRefresh
        } else {
            sync_mode
        };

        emit(Message::info(format!(
            "Starting {} sync for stream: {name}",
            sync_mode.as_str()
        )));

        let mut high_water = state.get_stream(name).cloned().unwrap_or_default();
        let cursor_field = stream.cursor_field();
        let mut count = 0;
        let mut truncated = false;

        let mut records = stream.read_records(sync_mode, None, state.get_stream(name));
        loop {
            let record = match records.try_next().await {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(e) => {
                    self.stats.add_error();
                    return Err(e);
                }
            };

            if sync_mode == SyncMode::Incremental {
                if let Some(Value::String(value)) =
                    cursor_field.and_then(|field| extract_path(&record, field))
                {
                    high_water.advance(value);
                }
            }

            emit(Message::record(name, record));
            count += 1;
            self.stats.add_record();

            if self.config.max_records > 0 && count >= self.config.max_records {
                truncated = true;
                break;
            }
        }
        drop(records);

        // A truncated read has not seen every record, so its cursor is not safe to keep
        if sync_mode == SyncMode::Incremental && !truncated {
            if let Some(cursor) = high_water.cursor {
                state.set_cursor(name, cursor.clone());
                emit(Message::state(name, json!({ "cursor": cursor })));
            }
        }

        self.stats.add_stream();
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(stream = name, records = count, "Stream synced");
        emit(Message::info(format!(
            "Completed sync for {name}: {count} records"
        )));

        Ok(count)
    }

    /// Sync several streams in order.
    ///
    /// A failing stream is reported as an error log; with `fail_fast` the
    /// error is also returned and the remaining streams are skipped.
    pub async fn sync_streams<F>(
        &mut self,
        streams: &[Box<dyn ResourceStream>],
        sync_mode: SyncMode,
        state: &mut State,
        emit: &mut F,
    ) -> Result<()>
    where
        F: FnMut(Message),
    {
        let start = Instant::now();

        for stream in streams {
            if let Err(e) = self
                .sync_stream(stream.as_ref(), sync_mode, state, emit)
                .await
            {
                emit(Message::error(format!(
                    "Error syncing stream {}: {e}",
                    stream.name()
                )));
                if self.config.fail_fast {
                    return Err(e);
                }
            }
        }

        self.stats.set_duration(start.elapsed().as_millis() as u64);
        Ok(())
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = SyncStats::default();
    }
}
