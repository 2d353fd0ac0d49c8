use tg_core::CoreError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors surfaced to the frame-loop driver.
///
/// Systems degrade silently inside a tick; these cover caller contract
/// violations and configuration loading only.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The time step was negative, NaN or infinite.
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f32),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// An entity-store operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A custom system reported a failure.
    #[error("system error: {0}")]
    SystemError(String),
}
