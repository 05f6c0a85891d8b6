// errors.rs
//! Compile-time resolution errors (E22xx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Fatal outcomes of compile-time type resolution.
///
/// Resolution misses are never errors; they fall back to the void sentinel or
/// a caller-supplied default. These variants mean code generation cannot
/// proceed and the driver must stop compilation.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ResolveError {
    #[error("could not find method `{method}` on `{receiver}` during compile-time resolution")]
    #[diagnostic(
        code(E2201),
        help("the method bound by the enclosing compile-time method loop must exist on the receiver type")
    )]
    MethodNotFound {
        method: String,
        receiver: String,
        file: String,
        #[label("no method `{method}` on this receiver")]
        span: SourceSpan,
    },

    #[error("`{expr}` has no field named `{field}`")]
    #[diagnostic(code(E2202))]
    FieldNotFound {
        expr: String,
        field: String,
        file: String,
        #[label("field `{field}` is not declared here")]
        span: SourceSpan,
    },
}

impl ResolveError {
    /// Source file the error was raised in.
    pub fn file(&self) -> &str {
        match self {
            ResolveError::MethodNotFound { file, .. } | ResolveError::FieldNotFound { file, .. } => {
                file
            }
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            ResolveError::MethodNotFound { span, .. } | ResolveError::FieldNotFound { span, .. } => {
                *span
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_not_found_message_and_code() {
        let err = ResolveError::MethodNotFound {
            method: "to_json".to_string(),
            receiver: "User".to_string(),
            file: "main.v".to_string(),
            span: (10, 4).into(),
        };
        assert_eq!(
            err.to_string(),
            "could not find method `to_json` on `User` during compile-time resolution"
        );
        assert_eq!(err.code().map(|c| c.to_string()), Some("E2201".to_string()));
        assert_eq!(err.file(), "main.v");
        assert_eq!(err.span().offset(), 10);
    }

    #[test]
    fn field_not_found_message() {
        let err = ResolveError::FieldNotFound {
            expr: "val".to_string(),
            field: "age".to_string(),
            file: "main.v".to_string(),
            span: (0, 3).into(),
        };
        assert_eq!(err.to_string(), "`val` has no field named `age`");
        assert_eq!(err.code().map(|c| c.to_string()), Some("E2202".to_string()));
    }
}
