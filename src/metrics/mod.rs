//! Navigation activity counters.
//!
//! The router feeds these as it runs; whoever owns the shared handle decides
//! when to snapshot and where the snapshot goes (usually a log event).

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::logging::{LogEvent, LogFields, LogLevel};

/// Saturating counters for a navigation session.
#[derive(Debug, Default, Clone)]
pub struct NavMetrics {
    pushes: u64,
    presents: u64,
    pops: u64,
    dismissals: u64,
    gesture_completions: u64,
    skipped_ops: u64,
    max_depth: u64,
}

impl NavMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_push(&mut self) {
        self.pushes = self.pushes.saturating_add(1);
    }

    pub fn record_present(&mut self) {
        self.presents = self.presents.saturating_add(1);
    }

    /// `removed` is the number of records the pop took with it, so a
    /// pop-to-root weighs as much as the pops it replaced.
    pub fn record_pop(&mut self, removed: usize) {
        self.pops = self.pops.saturating_add(removed as u64);
    }

    pub fn record_dismissal(&mut self) {
        self.dismissals = self.dismissals.saturating_add(1);
    }

    pub fn record_gesture_completion(&mut self) {
        self.gesture_completions = self.gesture_completions.saturating_add(1);
    }

    pub fn record_skipped(&mut self) {
        self.skipped_ops = self.skipped_ops.saturating_add(1);
    }

    pub fn observe_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth as u64);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            pushes: self.pushes,
            presents: self.presents,
            pops: self.pops,
            dismissals: self.dismissals,
            gesture_completions: self.gesture_completions,
            skipped_ops: self.skipped_ops,
            max_depth: self.max_depth,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub pushes: u64,
    pub presents: u64,
    pub pops: u64,
    pub dismissals: u64,
    pub gesture_completions: u64,
    pub skipped_ops: u64,
    pub max_depth: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => LogFields::new(),
        }
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "router_metrics", self.as_fields())
    }
}
