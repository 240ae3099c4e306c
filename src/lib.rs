//! Experimental pilot implementation of the Wireframe navigation MVP.
//!
//! The crate keeps an ordered record of every currently-visible screen and
//! how it got there (root, push, push-modal, presented modal) so VIPER-style
//! routers can decide pops, dismissals, and gesture completions without
//! consulting the UI toolkit's own view hierarchy. The modules follow the
//! RSB `MODULE_SPEC` pattern so we can eventually promote the code into a
//! production crate without major surgery.

pub mod error;
pub mod handle;
pub mod logging;
pub mod metrics;
pub mod router;
pub mod stack;

pub use error::{Result, RouterError};
pub use handle::{ContainerHandle, HandleAllocator, NavHandle, ScreenHandle};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{MetricSnapshot, NavMetrics};
pub use router::audit::{
    NavAudit, NavAuditEvent, NavAuditEventBuilder, NavAuditStage, NullNavAudit,
};
pub use router::{ContainerFactory, RouterConfig, ScreenToolkit, Wireframe};
pub use stack::{NavRecord, NavStack, TransitionKind};
