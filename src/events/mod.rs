//! Outbound notifications to a hosting page
//!
//! Events are one-way and fire-and-forget: a sink never reports failure to
//! the caller, there is no acknowledgement and no retry. A sink that cannot
//! deliver logs the problem and drops the event.

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::core::constants::filters;
use crate::core::error::Result;
use crate::pipeline::{FilterCriteria, Selection};

/// Filter state as reported to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPayload {
    pub start_date: String,
    pub end_date: String,
    pub topic: String,
}

impl FilterPayload {
    /// Describe `criteria`, reading the topic from `topic_field`.
    /// Unbounded dates are reported as empty strings.
    pub fn from_criteria(criteria: &FilterCriteria, topic_field: &str) -> Self {
        let format_bound = |date: Option<NaiveDate>| {
            date.map(|d| d.format(filters::DATE_FORMAT).to_string())
                .unwrap_or_default()
        };

        Self {
            start_date: format_bound(criteria.start_date()),
            end_date: format_bound(criteria.end_date()),
            topic: criteria
                .selection(topic_field)
                .map(Selection::as_str)
                .unwrap_or(filters::ALL)
                .to_string(),
        }
    }
}

/// The closed set of notifications the dashboard sends.
///
/// Serialized as `{"type": "<eventType>", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum OutboundEvent {
    FilterChanged(FilterPayload),
    CreateCollection { filters: FilterPayload },
    ExportRequest { format: String },
    ShareRequest { url: String },
}

impl OutboundEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            OutboundEvent::FilterChanged(_) => "filterChanged",
            OutboundEvent::CreateCollection { .. } => "createCollection",
            OutboundEvent::ExportRequest { .. } => "exportRequest",
            OutboundEvent::ShareRequest { .. } => "shareRequest",
        }
    }
}

/// Destination for outbound events
pub trait EventSink {
    /// Deliver at most once. Must not panic or report failure.
    fn emit(&mut self, event: &OutboundEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, event: &OutboundEvent) {
        debug!("Dropping {} event (no listener)", event.event_type());
    }
}

/// Writes one JSON document per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_event(&mut self, event: &OutboundEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, event: &OutboundEvent) {
        match self.write_event(event) {
            Ok(()) => debug!("Emitted {} event", event.event_type()),
            Err(e) => warn!("Dropped {} event: {e}", event.event_type()),
        }
    }
}

/// Keeps every event in memory, for hosts that poll and for tests
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<OutboundEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[OutboundEvent] {
        &self.events
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &OutboundEvent) {
        self.events.push(event.clone());
    }
}

/// Event target naming standard output
pub const STDOUT_TARGET: &str = "-";

/// Open a JSON-lines sink: `-` is stdout, anything else a file appended to.
pub fn open_sink(target: &str) -> Result<Box<dyn EventSink>> {
    if target == STDOUT_TARGET {
        return Ok(Box::new(JsonLinesSink::new(io::stdout())));
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(Path::new(target))?;
    Ok(Box::new(JsonLinesSink::new(file)))
}
