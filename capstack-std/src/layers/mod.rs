//! Capability layers.
//!
//! Adapters that wrap any capability without adding a domain effect of
//! their own. See each submodule for what it adds.

pub mod guard;
pub mod logging;
pub mod traced;

pub use guard::Guarded;
pub use logging::LogEffect;
pub use traced::Traced;

use capstack_core::Capability;

/// Layer combinators available on every capability.
pub trait LayerExt: Capability + Sized {
    /// Contain panics raised by this capability.
    fn guarded(self) -> Guarded<Self> {
        Guarded::new(self)
    }

    /// Run this capability inside a tracing span named after `label`.
    fn traced(self, label: &'static str) -> Traced<Self> {
        Traced::new(self, label)
    }
}

impl<C: Capability> LayerExt for C {}
