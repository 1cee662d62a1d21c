//! Error types for U-Shipping.

use thiserror::Error;

/// Result type alias for U-Shipping operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building packages or running a packer.
///
/// Running out of iteration budget, cancellation and packages that are too
/// big for the container are reported through the result types, not here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed dimension input.
    #[error("Invalid package format: {0}")]
    Format(String),

    /// Two packages without a common side were merged.
    #[error("{left} has no fitting sides to {right}")]
    IncompatibleGeometry {
        /// Rendered left-hand package.
        left: String,
        /// Rendered right-hand package.
        right: String,
    },

    /// Invalid container provided.
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::Format("expected three components".into());
        assert_eq!(
            err.to_string(),
            "Invalid package format: expected three components"
        );

        let err = Error::IncompatibleGeometry {
            left: "300x200x100".into(),
            right: "70x60x50".into(),
        };
        assert_eq!(err.to_string(), "300x200x100 has no fitting sides to 70x60x50");
    }
}
