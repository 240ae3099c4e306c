//! Navigation stack tracker following the RSB module specification.
//!
//! Routers and presenters import the tracker types from here while the
//! implementation details live in the private `core` module.

mod core;

pub use self::core::{NavRecord, NavStack, TransitionKind};
