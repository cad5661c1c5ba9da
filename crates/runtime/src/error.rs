use battle_core::DirectorError;

/// Errors surfaced by the runtime surface.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The worker task is gone; commands can no longer be delivered.
    #[error("battle worker is no longer running")]
    WorkerGone,

    #[error("failed to load content: {0}")]
    Content(String),

    #[error(transparent)]
    Director(#[from] DirectorError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
