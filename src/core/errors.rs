//! Shared error types for the model construction pipeline

use thiserror::Error;

/// Main error type for archmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// A type name was referenced that the code graph does not contain
    #[error("Unknown type: '{name}' is not present in the code graph")]
    UnknownType { name: String },

    /// A type was driven through a builder without a classification verdict
    #[error("Missing verdict: no classification verdict for type '{name}'")]
    MissingVerdict { name: String },

    /// A classified verdict arrived without a kind label
    #[error("Missing kind: classified verdict for '{name}' carries no kind label")]
    MissingKind { name: String },

    /// An aggregate root candidate has no identity-eligible field.
    ///
    /// This is an invariant violation, not malformed input: the type was
    /// well-formed but semantically insufficient for its classified kind.
    #[error("Invariant violation: aggregate root '{type_name}' has no identity field")]
    MissingIdentity { type_name: String },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// Wrapped external errors
    #[error(transparent)]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Returns true for the invariant-violation class of failures
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::MissingIdentity { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_identity_names_the_capability() {
        let err = Error::MissingIdentity {
            type_name: "com.example.Order".to_string(),
        };
        assert!(err.to_string().contains("identity field"));
        assert!(err.to_string().contains("com.example.Order"));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_context_wraps_message() {
        let err: Result<()> = Err(Error::MissingVerdict {
            name: "com.example.Money".to_string(),
        });
        let wrapped = err.context("building model").unwrap_err();
        assert!(wrapped.to_string().starts_with("building model:"));
        assert!(!wrapped.is_invariant_violation());
    }
}
