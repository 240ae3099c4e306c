use thiserror::Error;

/// Unified result type for the wireframe MVP crate.
pub type Result<T> = std::result::Result<T, RouterError>;

/// Errors surfaced at the collaborator seam. The stack tracker itself is
/// total over every reachable state and never fails; only the container
/// factory and the screen toolkit can.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("container factory failed: {0}")]
    ContainerFactory(String),
    #[error("toolkit rejected `{op}`: {reason}")]
    Toolkit { op: &'static str, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
