//! Error types with source location tracking.
//!
//! Every fallible operation below the command-dispatch layer returns a
//! [`SpannedError`] (or a collection of the richer `Diagnostic` type defined
//! in `cdeclish-check`, which wraps one of these). Keeping the base type
//! minimal lets every crate in the workspace depend on it without pulling in
//! the checker.

use crate::span::Span;
use std::fmt;

/// An error annotated with its source location.
#[derive(Debug, Clone)]
pub struct SpannedError {
    /// Human-readable error description.
    pub message: String,
    /// Location in source where the error occurred.
    pub span: Span,
}

impl SpannedError {
    /// Creates an error with the given message and source location.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for SpannedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for SpannedError {}

/// Alias for `std::result::Result<T, SpannedError>`.
pub type Result<T> = std::result::Result<T, SpannedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanned_error_display() {
        let err = SpannedError::new("test error", Span::new(5, 10));
        let display = format!("{}", err);
        assert!(display.contains("test error"));
        assert!(display.contains("5..10"));
    }
}
