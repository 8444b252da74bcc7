//! Error types for addend partition generation.
//!
//! Generation itself cannot fail: out-of-range `(sum, count)` pairs simply
//! produce no partitions. The only errors are argument validation at the
//! call boundary and use of a generator after it has been disposed.

use thiserror::Error;

/// Errors that can occur when requesting partitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddendsError {
    /// An argument is outside the supported range.
    ///
    /// Raised when `count` exceeds the largest signed 32-bit value.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        name: &'static str,
        /// Description of why the argument was rejected
        reason: String,
    },

    /// The generator was used after being disposed.
    #[error("Cannot access a disposed object: {object}")]
    ObjectDisposed {
        /// Type name of the disposed object
        object: &'static str,
    },
}

impl AddendsError {
    /// Create an InvalidArgument error for the named argument.
    pub fn invalid_argument<S: Into<String>>(name: &'static str, reason: S) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Create an ObjectDisposed error for the named type.
    pub fn object_disposed(object: &'static str) -> Self {
        Self::ObjectDisposed { object }
    }

    /// Returns true if this error reports use after disposal.
    pub fn is_disposed(&self) -> bool {
        matches!(self, Self::ObjectDisposed { .. })
    }
}

/// Result type alias for partition operations.
pub type Result<T> = std::result::Result<T, AddendsError>;

/// Rejects part counts that do not fit a signed 32-bit integer.
pub(crate) fn check_count(count: usize) -> Result<()> {
    if count > i32::MAX as usize {
        return Err(AddendsError::invalid_argument(
            "count",
            format!(
                "{} cannot be greater than the signed 32 bit integer maximum ({})",
                count,
                i32::MAX
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AddendsError::invalid_argument("count", "too large");
        assert_eq!(err.to_string(), "Invalid argument `count`: too large");

        let err = AddendsError::object_disposed("PossibleAddends");
        assert_eq!(
            err.to_string(),
            "Cannot access a disposed object: PossibleAddends"
        );
        assert!(err.is_disposed());
    }

    #[test]
    fn test_check_count() {
        assert!(check_count(0).is_ok());
        assert!(check_count(i32::MAX as usize).is_ok());

        let err = check_count(i32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, AddendsError::InvalidArgument { name: "count", .. }));
    }
}
