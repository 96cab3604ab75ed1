//! # Error Types
//!
//! Every fallible operation in this crate returns [`AlgebraError`]. Errors are
//! fatal to the operation that raised them: there is no partial result and no
//! retry. Shape mismatches between operand arrays are *not* errors; the engine
//! truncates to the shortest operand instead.

use thiserror::Error;

use crate::algebra::Abstraction;
use crate::value::TypeTag;

/// Errors raised by the abstraction operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlgebraError {
    /// A multi-operand form received more operands than it supports.
    #[error("Unsupported arity for {operation}: got {got} operands, at most {max} supported")]
    UnsupportedArity {
        operation: &'static str,
        got: usize,
        max: usize,
    },

    /// A function was called with a parameter count it does not accept.
    #[error("Arity mismatch: {name} cannot be called with {got} arguments")]
    ArityMismatch { name: String, got: usize },

    /// A value could not be stored in (or read as) the requested representation.
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    /// Attempted to call something that is not a function.
    #[error("Not callable: {0}")]
    NotCallable(String),

    /// The capability table has no entry for this abstraction and representation.
    #[error("No {abstraction} capability registered for {tag}")]
    MissingCapability {
        abstraction: Abstraction,
        tag: TypeTag,
    },
}

impl AlgebraError {
    /// Shorthand for a [`AlgebraError::TypeMismatch`].
    pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        AlgebraError::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_unsupported_arity_message() {
        let err = AlgebraError::UnsupportedArity {
            operation: "fmap",
            got: 5,
            max: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("fmap"));
        assert!(msg.contains('5'));
        assert!(msg.contains('4'));
    }

    #[test]
    fn test_missing_capability_names_tag() {
        let err = AlgebraError::MissingCapability {
            abstraction: Abstraction::Foldable,
            tag: TypeTag::Array(ElementKind::Boolean),
        };
        assert_eq!(
            err.to_string(),
            "No foldable capability registered for boolean-array"
        );
    }
}
