//! Error types for requisite operations.
//!
//! This module defines [`RequisiteError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration mistakes (unknown predicate, wrong return type, bad
//!   arity) are errors and abort validation of the affected instance
//! - A field that is required but missing or blank is *not* an error; it
//!   is reported as a [`crate::condition::Outcome`]
//! - Errors raised by a predicate body are carried as `anyhow::Error` so
//!   the original chain is preserved

use std::path::PathBuf;
use thiserror::Error;

use crate::reflect::TypeRef;

/// Core error type for requisite operations.
#[derive(Debug, Error)]
pub enum RequisiteError {
    /// No method of a usable arity with this name exists on the scope.
    #[error("Condition method '{method}' not found on type '{scope}'")]
    MethodNotFound { method: String, scope: TypeRef },

    /// The predicate exists but does not return a boolean.
    #[error("Condition method '{method}' on '{scope}' must return bool, found {found}")]
    InvalidReturnType {
        method: String,
        scope: TypeRef,
        found: String,
    },

    /// The predicate raised an error while running.
    #[error(
        "Condition method '{method}' on '{scope}' failed{}: {source}",
        field_suffix(.field)
    )]
    InvocationFailed {
        method: String,
        scope: TypeRef,
        /// Display name of the field being checked, once known
        field: Option<String>,
        #[source]
        source: anyhow::Error,
    },

    /// The bound argument list does not fill the method's parameters.
    #[error("Condition method '{method}' expects {expected} argument(s), {supplied} supplied")]
    ArgumentCountMismatch {
        method: String,
        expected: usize,
        supplied: usize,
    },

    /// An instance method was invoked on a value that is not of its type.
    #[error("Condition method '{method}' is an instance method of '{scope}' but the instance is '{found}'")]
    ReceiverMismatch {
        method: String,
        scope: TypeRef,
        found: String,
    },

    /// Neither a declaring type nor an instance was available to resolve a scope.
    #[error("Cannot resolve a scope for condition method '{method}': no declaring type and no instance")]
    MissingScope { method: String },

    /// Declaration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a declaration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Declarations reference types or predicates that cannot be resolved.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(name) => format!(" while checking '{}'", name),
        None => String::new(),
    }
}

impl RequisiteError {
    /// Whether this error comes from a broken declaration rather than from
    /// a predicate failing at runtime or from IO.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RequisiteError::MethodNotFound { .. }
                | RequisiteError::InvalidReturnType { .. }
                | RequisiteError::ArgumentCountMismatch { .. }
                | RequisiteError::ReceiverMismatch { .. }
                | RequisiteError::MissingScope { .. }
                | RequisiteError::ConfigValidationError { .. }
        )
    }

    /// Attribute a predicate failure to the field being validated.
    ///
    /// Other errors, and failures already attributed, pass through.
    pub fn for_field(self, field_display_name: &str) -> Self {
        match self {
            RequisiteError::InvocationFailed {
                method,
                scope,
                field: None,
                source,
            } => RequisiteError::InvocationFailed {
                method,
                scope,
                field: Some(field_display_name.to_string()),
                source,
            },
            other => other,
        }
    }
}

/// Result type alias for requisite operations.
pub type Result<T> = std::result::Result<T, RequisiteError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn method_not_found_displays_method_and_scope() {
        let err = RequisiteError::MethodNotFound {
            method: "IsSurnameEmpty".into(),
            scope: TypeRef::named("Person"),
        };
        let msg = err.to_string();
        assert!(msg.contains("IsSurnameEmpty"));
        assert!(msg.contains("Person"));
    }

    #[test]
    fn invalid_return_type_displays_found_type() {
        let err = RequisiteError::InvalidReturnType {
            method: "Count".into(),
            scope: TypeRef::named("Person"),
            found: "int".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("must return bool"));
        assert!(msg.contains("int"));
    }

    #[test]
    fn invocation_failed_keeps_source() {
        let err = RequisiteError::InvocationFailed {
            method: "Check".into(),
            scope: TypeRef::named("Person"),
            field: None,
            source: anyhow::anyhow!("boom"),
        };
        assert!(err.to_string().contains("boom"));
        assert_eq!(err.source().unwrap().to_string(), "boom");
    }

    #[test]
    fn invocation_failed_names_field_once_attributed() {
        let err = RequisiteError::InvocationFailed {
            method: "Check".into(),
            scope: TypeRef::named("Person"),
            field: None,
            source: anyhow::anyhow!("boom"),
        }
        .for_field("Email")
        .for_field("Phone");
        assert_eq!(
            err.to_string(),
            "Condition method 'Check' on 'Person' failed while checking 'Email': boom"
        );
    }

    #[test]
    fn for_field_leaves_other_errors_alone() {
        let err = RequisiteError::MissingScope {
            method: "m".into(),
        }
        .for_field("Email");
        assert!(!err.to_string().contains("Email"));
    }

    #[test]
    fn argument_count_mismatch_displays_counts() {
        let err = RequisiteError::ArgumentCountMismatch {
            method: "Check".into(),
            expected: 3,
            supplied: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains('1'));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = RequisiteError::ConfigNotFound {
            path: PathBuf::from("/foo/rules.yml"),
        };
        assert!(err.to_string().contains("/foo/rules.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = RequisiteError::ConfigParseError {
            path: PathBuf::from("/rules.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/rules.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn configuration_errors_are_classified() {
        assert!(RequisiteError::MissingScope {
            method: "m".into()
        }
        .is_configuration_error());
        assert!(!RequisiteError::InvocationFailed {
            method: "m".into(),
            scope: TypeRef::Object,
            field: None,
            source: anyhow::anyhow!("x"),
        }
        .is_configuration_error());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: RequisiteError = io_err.into();
        assert!(matches!(err, RequisiteError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(RequisiteError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
