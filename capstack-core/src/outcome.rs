//! Invocation outcomes.

use std::fmt;

/// Classification of a failed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A nested capability reported failure. Propagated verbatim.
    InnerFailed,
    /// A wrapper's own effect failed.
    WrapperFailed,
    /// The chain could not be built because it had no base unit.
    InvalidBaseUnit,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::InnerFailed => "inner failed",
            FailureKind::WrapperFailed => "wrapper failed",
            FailureKind::InvalidBaseUnit => "invalid base unit",
        })
    }
}

/// A structured failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// What went wrong.
    pub kind: FailureKind,
    /// Name of the unit or effect that failed.
    pub origin: String,
    /// Human readable detail.
    pub message: String,
    /// Whether the wrapped capability had already run when this failure
    /// occurred. Always `true` for [`FailureKind::InnerFailed`].
    pub inner_ran: bool,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}: {}", self.kind, self.origin, self.message)
    }
}

/// The result value of an invocation.
///
/// There are no partial results: an outcome is either a success or exactly
/// one [`Failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The invocation completed.
    Success {
        /// Name of the capability that produced this outcome.
        origin: String,
        /// Human readable summary.
        message: String,
    },
    /// The invocation failed.
    Failure(Failure),
}

impl Outcome {
    /// A success outcome.
    pub fn success(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Outcome::Success {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// A failure reported by a unit (the innermost capability).
    pub fn inner_failed(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Outcome::Failure(Failure {
            kind: FailureKind::InnerFailed,
            origin: origin.into(),
            message: message.into(),
            inner_ran: true,
        })
    }

    /// A failure of a wrapper's own effect.
    pub fn wrapper_failed(
        origin: impl Into<String>,
        message: impl Into<String>,
        inner_ran: bool,
    ) -> Self {
        Outcome::Failure(Failure {
            kind: FailureKind::WrapperFailed,
            origin: origin.into(),
            message: message.into(),
            inner_ran,
        })
    }

    /// A construction-time failure surfaced at the dispatch boundary.
    pub fn invalid_base_unit(message: impl Into<String>) -> Self {
        Outcome::Failure(Failure {
            kind: FailureKind::InvalidBaseUnit,
            origin: "chain".to_string(),
            message: message.into(),
            inner_ran: false,
        })
    }

    /// Convert a unit's internal result into an outcome.
    ///
    /// `Err` becomes [`FailureKind::InnerFailed`].
    pub fn from_result<M, E>(origin: impl Into<String>, result: Result<M, E>) -> Self
    where
        M: Into<String>,
        E: fmt::Display,
    {
        match result {
            Ok(message) => Outcome::success(origin, message),
            Err(err) => Outcome::inner_failed(origin, err.to_string()),
        }
    }

    /// Whether the invocation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Whether the invocation failed.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The failure kind, or `None` on success.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure().map(|f| f.kind)
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    /// The summary (success) or detail (failure) message.
    pub fn message(&self) -> &str {
        match self {
            Outcome::Success { message, .. } => message,
            Outcome::Failure(failure) => &failure.message,
        }
    }

    /// Name of the component that produced this outcome.
    pub fn origin(&self) -> &str {
        match self {
            Outcome::Success { origin, .. } => origin,
            Outcome::Failure(failure) => &failure.origin,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success { origin, message } => write!(f, "ok from {origin}: {message}"),
            Outcome::Failure(failure) => write!(f, "{failure}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_result_classifies_errors_as_inner() {
        let ok: Result<&str, std::io::Error> = Ok("sent");
        assert_eq!(Outcome::from_result("email", ok), Outcome::success("email", "sent"));

        let err: Result<String, _> = Err(std::io::Error::other("offline"));
        let outcome = Outcome::from_result("email", err);
        assert_eq!(outcome.failure_kind(), Some(FailureKind::InnerFailed));
        assert_eq!(outcome.message(), "offline");
        assert_eq!(outcome.origin(), "email");
    }

    #[test]
    fn success_has_no_failure_kind() {
        let outcome = Outcome::success("unit", "done");
        assert!(outcome.is_success());
        assert_eq!(outcome.failure_kind(), None);
    }
}
