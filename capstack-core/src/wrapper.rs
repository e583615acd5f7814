//! # Wrapper Layer
//!
//! A [`Wrapper`] owns exactly one inner [`Capability`] and one [`Effect`].
//! Its [`WrapperKind`] fixes where the effect runs relative to the inner
//! call:
//!
//! - [`WrapperKind::Before`]: effect, then inner. The inner capability is
//!   invoked even when the effect failed; if it then succeeds the outcome
//!   is a wrapper failure with `inner_ran = true`.
//! - [`WrapperKind::After`]: inner, then effect, but only when inner
//!   succeeded. An effect failure is reported with `inner_ran = true`; the
//!   inner side effect is not undone.
//!
//! Failures coming out of the inner capability are returned unchanged.

use crate::{capability::Capability, effect::Effect, outcome::Outcome, payload::Payload};
use std::fmt;

/// Where a wrapper's effect runs relative to its inner capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperKind {
    /// Effect first, then the inner capability.
    Before,
    /// Inner capability first, then the effect on success.
    After,
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WrapperKind::Before => "before",
            WrapperKind::After => "after",
        })
    }
}

/// A capability that owns and delegates to exactly one inner capability.
///
/// The inner capability is fixed at construction; there is no way to swap
/// it afterwards.
pub struct Wrapper<C, E> {
    kind: WrapperKind,
    inner: C,
    effect: E,
}

impl<C, E> Wrapper<C, E> {
    /// Create a new `Wrapper` around `inner`.
    pub fn new(kind: WrapperKind, inner: C, effect: E) -> Self {
        Self {
            kind,
            inner,
            effect,
        }
    }

    /// The wrapper kind tag.
    pub fn kind(&self) -> WrapperKind {
        self.kind
    }

    /// The wrapped capability.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The wrapper's own effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }
}

impl<C, E> Capability for Wrapper<C, E>
where
    C: Capability,
    E: Effect,
{
    fn name(&self) -> &str {
        self.effect.name()
    }

    fn invoke(&self, payload: &Payload) -> Outcome {
        match self.kind {
            WrapperKind::Before => {
                let applied = self.effect.apply(payload);
                let outcome = self.inner.invoke(payload);
                match applied {
                    Err(err) if outcome.is_success() => {
                        Outcome::wrapper_failed(self.effect.name(), err.to_string(), true)
                    }
                    _ => outcome,
                }
            }
            WrapperKind::After => {
                let outcome = self.inner.invoke(payload);
                if outcome.is_failure() {
                    return outcome;
                }
                match self.effect.apply(payload) {
                    Ok(()) => outcome,
                    Err(err) => Outcome::wrapper_failed(self.effect.name(), err.to_string(), true),
                }
            }
        }
    }
}
