//! Router lifecycle audit utilities (RSB MODULE_SPEC compliant).
//!
//! Lightweight instrumentation hooks so callers can observe every navigation
//! transition the wireframe performs. Records capture a stage identifier plus
//! structured metadata so downstream code can log, buffer, or visualize a
//! session without contorting the router itself.

use std::time::SystemTime;

use serde_json::Value;

/// Distinct checkpoints emitted by [`crate::router::Wireframe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAuditStage {
    /// A new wireframe instance was constructed.
    RouterConstructed,
    /// The whole visible history was replaced by a fresh root container.
    RootReplaced,
    /// A screen was pushed (plain or push-modal) onto the active container.
    ScreenPushed,
    /// A modal context was opened over the current one.
    ModalPresented,
    /// One or more screens were popped off the active container.
    ScreenPopped,
    /// The innermost modal context was dismissed.
    ModalDismissed,
    /// An interactive gesture completed and the record was updated.
    GestureCompleted,
    /// An operation found nothing to act on and degraded to a no-op.
    OperationSkipped,
}

/// Structured audit entry.
#[derive(Debug, Clone)]
pub struct NavAuditEvent {
    pub timestamp: SystemTime,
    pub stage: NavAuditStage,
    pub details: Vec<(String, Value)>,
}

impl NavAuditEvent {
    fn new(stage: NavAuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
        }
    }
}

/// Builder helper to append detail fields ergonomically.
pub struct NavAuditEventBuilder {
    event: NavAuditEvent,
}

impl NavAuditEventBuilder {
    pub fn new(stage: NavAuditStage) -> Self {
        Self {
            event: NavAuditEvent::new(stage),
        }
    }

    pub fn detail(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.event.details.push((key.into(), value));
        self
    }

    pub fn finish(self) -> NavAuditEvent {
        self.event
    }
}

/// Trait implemented by any audit sink.
pub trait NavAudit: Send + Sync {
    fn record(&self, event: NavAuditEvent);
}

/// Default no-op implementation used when auditing is disabled.
#[derive(Debug, Default)]
pub struct NullNavAudit;

impl NavAudit for NullNavAudit {
    fn record(&self, _event: NavAuditEvent) {}
}
