//! Telemetry replay against a tick-driven block host
//!
//! Each notification line is delivered to the extension, then the scheduler
//! runs its ticks: every tick evaluates the change hat block for each watched
//! field and, when it fires, reads the value through the reporter block.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::io::BufRead;
use vehicle_data::blocks::{OP_GET_VEHICLE_DATA, OP_WHEN_VEHICLE_DATA_CHANGED};
use vehicle_data::{BlockOutput, FieldValue, VehicleDataExtension, VehicleField, VehicleSnapshot};

/// A hat block firing observed during replay
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEdge {
    /// Scheduler tick the hat fired on (1-based)
    pub tick: u64,
    /// Telemetry line that preceded the tick (1-based)
    pub line: usize,
    pub field: VehicleField,
    /// Value reported right after the hat fired
    pub value: Option<FieldValue>,
}

/// Summary of a finished replay
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub watched: Vec<VehicleField>,
    pub notifications: usize,
    pub skipped_lines: usize,
    pub ticks: u64,
    pub edges: Vec<ChangeEdge>,
    pub final_snapshot: VehicleSnapshot,
    /// Fields with a change no hat block consumed
    pub pending: Vec<VehicleField>,
}

impl ReplayOutcome {
    /// Number of edges reported for `field`
    pub fn change_count(&self, field: VehicleField) -> usize {
        self.edges.iter().filter(|edge| edge.field == field).count()
    }
}

/// Drives an extension the way a block host scheduler would
pub struct Replayer {
    extension: VehicleDataExtension,
    watched: Vec<VehicleField>,
    ticks_per_update: usize,
    tick: u64,
    line: usize,
    notifications: usize,
    skipped_lines: usize,
    edges: Vec<ChangeEdge>,
}

impl Replayer {
    pub fn new(
        extension: VehicleDataExtension,
        watched: Vec<VehicleField>,
        ticks_per_update: usize,
    ) -> Self {
        Self {
            extension,
            watched,
            ticks_per_update,
            tick: 0,
            line: 0,
            notifications: 0,
            skipped_lines: 0,
            edges: Vec::new(),
        }
    }

    /// Deliver one notification line, then run the scheduler
    ///
    /// Blank lines and `#` comments are skipped silently; lines that are not
    /// valid JSON are logged and skipped.
    pub fn feed_line(&mut self, line: &str) {
        self.line += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(notification) => {
                log::debug!("Line {}: delivering notification", self.line);
                self.extension.handle_notification(&notification);
                self.notifications += 1;
                self.run_ticks();
            }
            Err(e) => {
                log::warn!("Line {}: skipping unparseable notification: {}", self.line, e);
                self.skipped_lines += 1;
            }
        }
    }

    fn run_ticks(&mut self) {
        let watched = std::mem::take(&mut self.watched);
        for _ in 0..self.ticks_per_update {
            self.tick += 1;
            for &field in &watched {
                self.poll(field);
            }
        }
        self.watched = watched;
    }

    fn poll(&mut self, field: VehicleField) {
        let args = json!({ "VEHICLE_DATA": field.as_str() });

        let fired = matches!(
            self.extension.invoke(OP_WHEN_VEHICLE_DATA_CHANGED, &args),
            Ok(BlockOutput::Trigger(true))
        );
        if !fired {
            return;
        }

        let value = match self.extension.invoke(OP_GET_VEHICLE_DATA, &args) {
            Ok(BlockOutput::Value(value)) => Some(value),
            _ => None,
        };
        log::info!(
            "tick {}: {} changed to {}",
            self.tick,
            field,
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        );

        self.edges.push(ChangeEdge {
            tick: self.tick,
            line: self.line,
            field,
            value,
        });
    }

    /// Replay every line from `reader`
    pub fn replay<R: BufRead>(mut self, reader: R) -> Result<ReplayOutcome> {
        for line in reader.lines() {
            let line = line.with_context(|| format!("Failed to read line {}", self.line + 1))?;
            self.feed_line(&line);
        }
        Ok(self.finish())
    }

    pub fn finish(self) -> ReplayOutcome {
        ReplayOutcome {
            pending: self.extension.pending_changes(),
            final_snapshot: self.extension.current_snapshot().clone(),
            watched: self.watched,
            notifications: self.notifications,
            skipped_lines: self.skipped_lines,
            ticks: self.tick,
            edges: self.edges,
        }
    }
}
