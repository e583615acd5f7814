//! # Capability Layer
//!
//! The single-operation contract every unit, wrapper, and chain satisfies.
//!
//! A caller holding a `Capability` never needs to know whether it is a bare
//! unit or an N-deep chain of wrappers: `invoke` is the only entry point and
//! it always returns an [`Outcome`].

use crate::{
    effect::Effect,
    outcome::Outcome,
    payload::Payload,
    wrapper::{Wrapper, WrapperKind},
};

/// A uniform single-operation contract.
///
/// Implementations must not let internal faults escape: every error becomes a
/// failure [`Outcome`]. Units typically use [`Outcome::from_result`].
///
/// # Static vs Dynamic Composition
///
/// The provided [`before`](Capability::before) and
/// [`after`](Capability::after) combinators nest wrappers with full static
/// typing. For chains assembled from runtime data, box the base unit and use
/// the chain builder in `capstack-std`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Capability`",
    label = "missing `Capability` implementation",
    note = "Capabilities must implement `invoke(&self, &Payload) -> Outcome`."
)]
pub trait Capability: Send + Sync + 'static {
    /// Name used in outcomes and diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Perform the capability's action.
    fn invoke(&self, payload: &Payload) -> Outcome;

    /// Wraps this capability so that `effect` runs before it.
    fn before<E>(self, effect: E) -> Wrapper<Self, E>
    where
        Self: Sized,
        E: Effect,
    {
        Wrapper::new(WrapperKind::Before, self, effect)
    }

    /// Wraps this capability so that `effect` runs after it succeeds.
    fn after<E>(self, effect: E) -> Wrapper<Self, E>
    where
        Self: Sized,
        E: Effect,
    {
        Wrapper::new(WrapperKind::After, self, effect)
    }

    /// Boxes the capability.
    fn boxed(self) -> BoxCapability
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

/// An owned, type-erased capability.
pub type BoxCapability = Box<dyn Capability>;

impl<C: Capability + ?Sized> Capability for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn invoke(&self, payload: &Payload) -> Outcome {
        (**self).invoke(payload)
    }
}
