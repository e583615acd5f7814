//! Tracing spans around capability invocation.

use capstack_core::{Capability, Outcome, Payload};

/// A capability wrapper that instruments invocation with a `tracing` span.
///
/// Without the `tracing` feature this is a plain pass-through.
pub struct Traced<C> {
    inner: C,
    label: &'static str,
}

impl<C> Traced<C> {
    /// Create a new `Traced` wrapper around a capability.
    pub const fn new(inner: C, label: &'static str) -> Self {
        Self { inner, label }
    }

    /// The span label.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<C: Capability> Capability for Traced<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    #[cfg(feature = "tracing")]
    fn invoke(&self, payload: &Payload) -> Outcome {
        let span = tracing::info_span!(
            "invoke",
            chain = %self.label,
            capability = self.inner.name()
        );
        let _entered = span.enter();
        let outcome = self.inner.invoke(payload);
        tracing::debug!(success = outcome.is_success(), "invocation finished");
        outcome
    }

    #[cfg(not(feature = "tracing"))]
    fn invoke(&self, payload: &Payload) -> Outcome {
        self.inner.invoke(payload)
    }
}
