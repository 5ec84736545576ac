/// Domain-level failure taxonomy shared by every layer.
///
/// Messages are already localized by the caller (see [`crate::i18n`]).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{message}: {key}")]
    NotFound { message: String, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
