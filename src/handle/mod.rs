//! Opaque screen and container identities (RSB MODULE_SPEC compliant).
//!
//! The tracker records *which* screen did something, never the screen itself.
//! Toolkit adapters mint handles through [`HandleAllocator`] and keep the
//! mapping back to their own view objects private.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Identity of a leaf screen. Cheap to copy, compared by value only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ScreenHandle(u64);

impl ScreenHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScreenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

/// Identity of a navigation container: the entity capable of push/pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContainerHandle(u64);

impl ContainerHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// Either side of the container/leaf split. Keeping the distinction in the
/// type system means no code path ever inspects a handle at runtime to learn
/// what it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavHandle {
    Container(ContainerHandle),
    Screen(ScreenHandle),
}

impl NavHandle {
    pub fn as_container(self) -> Option<ContainerHandle> {
        match self {
            Self::Container(container) => Some(container),
            Self::Screen(_) => None,
        }
    }

    pub fn as_screen(self) -> Option<ScreenHandle> {
        match self {
            Self::Screen(screen) => Some(screen),
            Self::Container(_) => None,
        }
    }
}

impl From<ContainerHandle> for NavHandle {
    fn from(container: ContainerHandle) -> Self {
        Self::Container(container)
    }
}

impl From<ScreenHandle> for NavHandle {
    fn from(screen: ScreenHandle) -> Self {
        Self::Screen(screen)
    }
}

impl fmt::Display for NavHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container(container) => container.fmt(f),
            Self::Screen(screen) => screen.fmt(f),
        }
    }
}

/// Mints process-unique handles for toolkit adapters. A single allocator is
/// expected per application session; containers and screens draw from the
/// same counter so their raw values never collide either.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next: AtomicU64,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> ScreenHandle {
        ScreenHandle(self.bump())
    }

    pub fn container(&self) -> ContainerHandle {
        ContainerHandle(self.bump())
    }

    fn bump(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
