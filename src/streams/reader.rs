//! Paged record reader
//!
//! `read_records` turns a [`ResourceStream`] into a lazy record sequence:
//!
//! 1. Resolve partitions (read the parent stream, if any)
//! 2. For each partition, fetch pages until the paginator reports done
//! 3. Flatten pages into records and apply the start-date filter
//!
//! Every call starts over from the first page. Nothing is fetched until
//! the returned stream is polled, and dropping it stops further requests.

use super::types::{ParentSpec, ResourceStream};
use crate::config::parse_timestamp;
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::pagination::{Page, PaginationState, Paginator};
use crate::partition::{ParentRouter, PartitionRouter, PartitionValue};
use crate::state::StreamState;
use crate::template;
use crate::types::{extract_path, Record, SyncMode};
use chrono::{DateTime, Utc};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use serde_json::Value;
use std::collections::VecDeque;
use std::pin::Pin;
use tracing::{debug, info, warn};

/// Lazy, finite sequence of records borrowed from its stream
pub type RecordStream<'a> = Pin<Box<dyn Stream<Item = Result<Record>> + Send + 'a>>;

impl<'s> dyn ResourceStream + 's {
    /// Read the stream's records.
    ///
    /// `cursor_field` overrides the stream's own cursor field for
    /// start-date filtering. `state` is only consulted in incremental mode.
    pub fn read_records(
        &self,
        sync_mode: SyncMode,
        cursor_field: Option<&str>,
        state: Option<&StreamState>,
    ) -> RecordStream<'_> {
        let filter = match StartDateFilter::build(self, sync_mode, cursor_field, state) {
            Ok(filter) => filter,
            Err(e) => return Box::pin(stream::once(async move { Err(e) })),
        };

        info!(
            stream = self.name(),
            sync_mode = sync_mode.as_str(),
            "Reading records"
        );

        let reader = Reader {
            stream: self,
            paginator: self.paginator(),
            step: Step::Resolve,
        };

        let pages = stream::try_unfold(reader, |mut reader| async move {
            let page = reader.next_page().await?;
            Ok::<_, Error>(page.map(|records| (records, reader)))
        });

        pages
            .map_ok(|records| stream::iter(records.into_iter().map(Ok::<Record, Error>)))
            .try_flatten()
            .try_filter(move |record| futures::future::ready(filter.keep(record)))
            .boxed()
    }
}

// ============================================================================
// Start-date filter
// ============================================================================

/// Client-side lower bound on a record's cursor timestamp
struct StartDateFilter {
    bound: Option<(String, DateTime<Utc>)>,
}

impl StartDateFilter {
    fn build(
        stream: &dyn ResourceStream,
        sync_mode: SyncMode,
        cursor_field: Option<&str>,
        state: Option<&StreamState>,
    ) -> Result<Self> {
        let Some(field) = cursor_field.or(stream.cursor_field()) else {
            return Ok(Self { bound: None });
        };

        let mut lower = stream.descriptor().parsed_start_date()?;

        if sync_mode == SyncMode::Incremental {
            if !stream.supports_incremental() {
                warn!(
                    stream = stream.name(),
                    "Stream does not support incremental reads, reading from start date"
                );
            } else if let Some(cursor) = state.and_then(|s| s.cursor.as_deref()) {
                match parse_timestamp(cursor) {
                    Some(ts) => lower = lower.max(ts),
                    None => warn!(
                        stream = stream.name(),
                        cursor, "Ignoring unparseable state cursor"
                    ),
                }
            }
        }

        debug!(stream = stream.name(), field, lower_bound = %lower, "Filtering records");
        Ok(Self {
            bound: Some((field.to_string(), lower)),
        })
    }

    /// Records without a parseable cursor value are kept
    fn keep(&self, record: &Record) -> bool {
        let Some((field, lower)) = &self.bound else {
            return true;
        };
        match extract_path(record, field)
            .and_then(Value::as_str)
            .and_then(parse_timestamp)
        {
            Some(ts) => ts >= *lower,
            None => true,
        }
    }
}

// ============================================================================
// Page reader
// ============================================================================

struct Reader<'a> {
    stream: &'a dyn ResourceStream,
    paginator: Box<dyn Paginator>,
    step: Step,
}

enum Step {
    /// Partitions not yet known
    Resolve,
    /// Paging through one slice
    Fetch(Slice),
    Done,
}

/// One partition (or the whole resource) and its pagination progress
struct Slice {
    partition: Option<PartitionValue>,
    pending: VecDeque<PartitionValue>,
    pagination: PaginationState,
}

impl Slice {
    fn whole() -> Self {
        Self {
            partition: None,
            pending: VecDeque::new(),
            pagination: PaginationState::new(),
        }
    }

    /// Slice for the next pending partition, if any
    fn from_pending(mut pending: VecDeque<PartitionValue>) -> Option<Self> {
        let partition = pending.pop_front()?;
        Some(Self {
            partition: Some(partition),
            pending,
            pagination: PaginationState::new(),
        })
    }
}

impl Reader<'_> {
    /// Fetch the next page; `None` once every slice is exhausted
    async fn next_page(&mut self) -> Result<Option<Vec<Record>>> {
        loop {
            // An error leaves the reader in `Done`
            match std::mem::replace(&mut self.step, Step::Done) {
                Step::Done => return Ok(None),
                Step::Resolve => {
                    let slice = match self.stream.parent() {
                        Some(parent) => Slice::from_pending(self.resolve(parent).await?.into()),
                        None => Some(Slice::whole()),
                    };
                    if let Some(slice) = slice {
                        self.step = Step::Fetch(slice);
                    }
                }
                Step::Fetch(slice) if slice.pagination.done => {
                    debug!(
                        stream = self.stream.name(),
                        partition = slice.partition.as_ref().map(|p| p.id.as_str()),
                        pages = slice.pagination.pages_fetched,
                        records = slice.pagination.total_fetched,
                        "Slice exhausted"
                    );
                    if let Some(next) = Slice::from_pending(slice.pending) {
                        self.step = Step::Fetch(next);
                    }
                }
                Step::Fetch(mut slice) => {
                    let records = self.fetch_page(&mut slice).await?;
                    self.step = Step::Fetch(slice);
                    return Ok(Some(records));
                }
            }
        }
    }

    /// Read the parent stream to completion and derive partitions
    async fn resolve(&self, parent: ParentSpec) -> Result<Vec<PartitionValue>> {
        let parent_records: Vec<Record> = parent
            .stream
            .read_records(SyncMode::FullRefresh, None, None)
            .try_collect()
            .await?;

        let router = ParentRouter::new(parent_records, parent.parent_key, parent.partition_field);
        let partitions = router.partitions()?;
        debug!(
            stream = self.stream.name(),
            parent = parent.stream.name(),
            partitions = partitions.len(),
            "Resolved partitions"
        );
        Ok(partitions)
    }

    async fn fetch_page(&self, slice: &mut Slice) -> Result<Vec<Record>> {
        let mut context = self.stream.descriptor().template_context();
        if let Some(partition) = &slice.partition {
            context.set_partition(partition.to_json());
        }

        let path = template::render(self.stream.path_template(), &context)?;

        let mut request = RequestConfig::new();
        for (key, value) in self.stream.request_params() {
            request = request.query(*key, template::render(value, &context)?);
        }
        for (key, value) in self.paginator.request_params(&slice.pagination) {
            request = request.query(key, value);
        }

        let client = self.stream.descriptor().client();
        let body: Value = match client.get_json_with_config(&path, request).await {
            Ok(body) => body,
            // A follow-up page that no longer exists means the listing ended
            Err(Error::PermanentFetch { status: 404, url, .. })
                if !slice.pagination.is_first_page() =>
            {
                debug!(stream = self.stream.name(), %url, "Next page not found, stopping");
                slice.pagination.mark_done();
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let records = self.stream.parse_page(&body, slice.partition.as_ref())?;
        let next_cursor = self.paginator.next_cursor(&body)?;
        let page = Page::new(records, next_cursor);
        self.paginator.process_page(&page, &mut slice.pagination);

        debug!(
            stream = self.stream.name(),
            page = slice.pagination.pages_fetched,
            records = page.records.len(),
            "Fetched page"
        );
        Ok(page.records)
    }
}
