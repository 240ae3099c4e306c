//! Error module orchestrator following the RSB module specification.

mod types;

pub use types::{Result, RouterError};
