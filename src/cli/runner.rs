//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::connector::{CheckResult, Connector};
use crate::engine::{Message, SyncConfig, SyncEngine};
use crate::error::{Error, Result, ResultExt};
use crate::source::SunshineSource;
use crate::state::State;
use crate::streams::{excluded_stream, ResourceStream, EXCLUDED_STREAMS, STREAM_REGISTRY};
use crate::types::SyncMode;
use serde_json::{json, Value};
use std::fs;
use std::time::Instant;

/// CLI runner
pub struct Runner {
    cli: Cli,
    source: SunshineSource,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            source: SunshineSource::new(),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => self.spec(),
            Commands::Check => self.check().await,
            Commands::Discover => self.discover().await,
            Commands::Streams => self.streams(),
            Commands::Read {
                streams,
                sync_mode,
                max_records,
            } => {
                self.read(streams.as_deref(), *sync_mode, *max_records)
                    .await
            }
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<Value> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return serde_json::from_str::<Value>(json_str).context("Invalid config JSON");
        }

        if let Some(path) = &self.cli.config {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            return serde_json::from_str::<Value>(&content)
                .with_context(|| format!("Invalid config JSON in {}", path.display()));
        }

        Err(Error::config(
            "No configuration provided (use --config or --config-json)",
        ))
    }

    /// Load state
    fn load_state(&self) -> Result<State> {
        // Inline state takes precedence
        if let Some(state_json) = &self.cli.state_json {
            return State::from_json(state_json);
        }

        if let Some(path) = &self.cli.state {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read state file {}", path.display()))?;
            return State::from_json(&content);
        }

        Ok(State::new())
    }

    /// Show spec
    fn spec(&self) -> Result<()> {
        let spec = serde_json::to_value(self.source.spec())?;
        self.output_message(&json!({
            "type": "SPEC",
            "spec": spec
        }));
        Ok(())
    }

    /// Check connection
    async fn check(&self) -> Result<()> {
        let result = match self.load_config() {
            Ok(config) => self.source.check_connection(&config).await,
            Err(e) => CheckResult::failure(e.to_string()),
        };

        self.output_message(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": {
                "status": result.status(),
                "message": result.message
            }
        }));

        Ok(())
    }

    /// Discover streams
    async fn discover(&self) -> Result<()> {
        let config = self.load_config()?;
        let catalog = self.source.discover(&config).await?;

        self.output_message(&json!({
            "type": "CATALOG",
            "catalog": serde_json::to_value(&catalog)?
        }));

        Ok(())
    }

    /// List available streams (lightweight, no config needed)
    fn streams(&self) -> Result<()> {
        let active: Vec<&str> = STREAM_REGISTRY.iter().map(|(name, _)| *name).collect();
        let excluded: Vec<Value> = EXCLUDED_STREAMS
            .iter()
            .map(|s| json!({ "name": s.name, "reason": s.reason }))
            .collect();

        self.output_message(&json!({
            "type": "STREAMS",
            "streams": active,
            "excluded": excluded
        }));

        Ok(())
    }

    /// Read data
    async fn read(
        &self,
        streams: Option<&str>,
        sync_mode: SyncMode,
        max_records: Option<usize>,
    ) -> Result<()> {
        let sync_start = Instant::now();
        let config = self.load_config()?;
        let mut state = self.load_state()?;

        let selected = select_streams(self.source.streams(&config)?, streams)?;

        let mut sync_config = SyncConfig::new().with_fail_fast(false);
        if let Some(max) = max_records {
            sync_config = sync_config.with_max_records(max);
        }
        let mut engine = SyncEngine::new().with_config(sync_config);

        engine
            .sync_streams(&selected, sync_mode, &mut state, &mut |msg: Message| {
                self.output_message(&msg.to_json());
            })
            .await?;

        // Always emit final state to stdout so caller can capture it
        self.output_message(&json!({
            "type": "STATE",
            "state": serde_json::to_value(&state)?
        }));

        let stats = engine.stats();
        let status = if stats.errors == 0 {
            "SUCCEEDED"
        } else if stats.streams_synced == 0 {
            "FAILED"
        } else {
            "PARTIAL"
        };

        self.output_message(&json!({
            "type": "SYNC_SUMMARY",
            "summary": {
                "status": status,
                "sync_mode": sync_mode.as_str(),
                "total_records": stats.records_synced,
                "successful_streams": stats.streams_synced,
                "failed_streams": stats.errors,
                "duration_ms": sync_start.elapsed().as_millis() as u64
            }
        }));

        if stats.errors > 0 {
            return Err(Error::Other(format!(
                "{} of {} streams failed",
                stats.errors,
                selected.len()
            )));
        }
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Keep the streams named in a comma-separated filter, in registry order
fn select_streams(
    all: Vec<Box<dyn ResourceStream>>,
    filter: Option<&str>,
) -> Result<Vec<Box<dyn ResourceStream>>> {
    let Some(filter) = filter else {
        return Ok(all);
    };

    let wanted: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if wanted.is_empty() {
        return Ok(all);
    }

    for name in &wanted {
        if all.iter().any(|s| s.name() == *name) {
            continue;
        }
        return Err(match excluded_stream(name) {
            Some(excluded) => Error::config(format!(
                "Stream '{name}' is not available: {}",
                excluded.reason
            )),
            None => Error::StreamNotFound {
                stream: (*name).to_string(),
            },
        });
    }

    Ok(all
        .into_iter()
        .filter(|s| wanted.contains(&s.name()))
        .collect())
}
