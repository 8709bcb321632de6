//! Domain-level error type.

/// Errors produced by pure domain logic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A submission precondition failed (missing image, empty prompt,
    /// unparseable budget). Raised before any network call is made.
    #[error("Validation error: {0}")]
    Validation(String),
}
