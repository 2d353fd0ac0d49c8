use crate::entity::EntityId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating a world or validating components.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested entity ID does not exist in the world.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// A component holds values that break its invariants.
    #[error("invalid {component} component: {reason}")]
    InvalidComponent {
        /// The component type that failed validation.
        component: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

impl CoreError {
    pub(crate) fn invalid(component: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidComponent {
            component,
            reason: reason.into(),
        }
    }
}
