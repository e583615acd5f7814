//! Error types for capstack.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`BuildError`] - Errors while assembling units and chains
//! - [`EffectError`] - Errors from a wrapper's own effect
//! - [`PayloadError`] - Errors while reading typed values out of a payload
//!
//! None of these cross the dispatch boundary: once a chain is invoked, every
//! failure is reported as an [`Outcome`](crate::Outcome).

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while constructing units or chains.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// No base unit was supplied to the chain builder.
    #[error("chain has no base unit")]
    InvalidBaseUnit,

    /// The factory has no constructor registered for this kind.
    #[error("no unit registered for kind: {0}")]
    UnknownKind(String),

    /// A unit configuration was rejected by its constructor.
    #[error("invalid unit configuration: {0}")]
    InvalidConfig(String),
}

/// Errors produced by a wrapper's own effect.
#[derive(Error, Debug)]
pub enum EffectError {
    /// The effect rejected the payload.
    #[error("effect rejected payload: {0}")]
    Rejected(String),

    /// A custom effect error.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors produced when reading typed values from a [`Payload`](crate::Payload).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The key is not present.
    #[error("missing payload key `{key}`")]
    Missing {
        /// The key that was looked up.
        key: String,
    },

    /// The key is present but holds a different kind of value.
    #[error("payload key `{key}` is not a {expected}")]
    TypeMismatch {
        /// The key that was looked up.
        key: String,
        /// Human readable name of the expected value kind.
        expected: &'static str,
    },

    /// A text value could not be parsed as a currency amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

// Convenience conversions
impl From<BoxError> for EffectError {
    fn from(err: BoxError) -> Self {
        EffectError::Custom(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_errors_become_custom_effect_errors() {
        let boxed: BoxError = "disk full".into();
        let err = EffectError::from(boxed);

        assert!(matches!(err, EffectError::Custom(_)));
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn build_errors_name_the_problem() {
        assert_eq!(
            BuildError::UnknownKind("fax".into()).to_string(),
            "no unit registered for kind: fax"
        );
        assert_eq!(BuildError::InvalidBaseUnit.to_string(), "chain has no base unit");
    }
}
