//! Panic containment.

use capstack_core::{Capability, Outcome, Payload};
use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
};

/// Converts a panic inside the wrapped capability into a failure outcome.
///
/// The outcome is classified [`InnerFailed`] and carries the panic message,
/// so wrappers around a faulty unit see an ordinary inner failure.
///
/// [`InnerFailed`]: capstack_core::FailureKind::InnerFailed
pub struct Guarded<C> {
    inner: C,
}

impl<C> Guarded<C> {
    /// Create a new `Guarded` layer.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Capability> Capability for Guarded<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn invoke(&self, payload: &Payload) -> Outcome {
        match catch_unwind(AssertUnwindSafe(|| self.inner.invoke(payload))) {
            Ok(outcome) => outcome,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                #[cfg(feature = "tracing")]
                {
                    tracing::error!(capability = self.inner.name(), %message, "capability panicked");
                }
                Outcome::inner_failed(self.inner.name(), format!("panicked: {message}"))
            }
        }
    }
}

pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
