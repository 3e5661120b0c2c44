//! Error types for the fluent-query crate.

use thiserror::Error;

/// Errors raised while assembling a pipeline.
///
/// Every error surfaces at the call that caused it. Executing a pipeline
/// with [`Pipeline::build`](crate::Pipeline::build) never fails.
#[derive(Debug, Error)]
pub enum QueryError {
    /// An operation argument is out of range or has the wrong type.
    #[error("invalid argument for {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

impl QueryError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        QueryError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for fluent-query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message() {
        let err =
            QueryError::invalid_argument("limit", "expected a non-negative integer, got number -1");
        assert_eq!(
            err.to_string(),
            "invalid argument for limit: expected a non-negative integer, got number -1"
        );
    }

    #[test]
    fn regex_error_converts() {
        let err: QueryError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, QueryError::InvalidRegex(_)));
        assert!(err.to_string().starts_with("invalid regex pattern"));
    }
}
