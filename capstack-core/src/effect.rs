//! Wrapper effects.
//!
//! An [`Effect`] is the side effect a wrapper adds around its inner
//! capability. Effects report failure through `Err`; the wrapper turns that
//! into a [`FailureKind::WrapperFailed`](crate::FailureKind) outcome.

use crate::{
    capability::Capability,
    error::{BoxError, EffectError},
    payload::Payload,
};

/// The side effect owned by a wrapper.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `Effect`",
    label = "missing `Effect` implementation",
    note = "Effects must implement `apply(&self, &Payload) -> Result<(), BoxError>`."
)]
pub trait Effect: Send + Sync + 'static {
    /// Name used in outcomes and diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Perform the effect.
    fn apply(&self, payload: &Payload) -> Result<(), BoxError>;
}

/// An owned, type-erased effect.
pub type BoxEffect = Box<dyn Effect>;

impl<E: Effect + ?Sized> Effect for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apply(&self, payload: &Payload) -> Result<(), BoxError> {
        (**self).apply(payload)
    }
}

/// An effect backed by a closure. Created with [`effect_fn`].
pub struct FnEffect<F> {
    name: String,
    f: F,
}

/// Lift a closure into a named [`Effect`].
///
/// # Example
///
/// ```rust,ignore
/// let audit = effect_fn("audit", |payload: &Payload| {
///     println!("{payload:?}");
///     Ok(())
/// });
/// ```
pub fn effect_fn<F>(name: impl Into<String>, f: F) -> FnEffect<F>
where
    F: Fn(&Payload) -> Result<(), BoxError> + Send + Sync + 'static,
{
    FnEffect {
        name: name.into(),
        f,
    }
}

impl<F> Effect for FnEffect<F>
where
    F: Fn(&Payload) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, payload: &Payload) -> Result<(), BoxError> {
        (self.f)(payload)
    }
}

/// Uses a whole capability as a wrapper effect.
///
/// A failure outcome from the unit becomes [`EffectError::Rejected`].
pub struct UnitEffect<C> {
    unit: C,
}

impl<C: Capability> UnitEffect<C> {
    /// Create a new `UnitEffect`.
    pub fn new(unit: C) -> Self {
        Self { unit }
    }
}

impl<C: Capability> Effect for UnitEffect<C> {
    fn name(&self) -> &str {
        self.unit.name()
    }

    fn apply(&self, payload: &Payload) -> Result<(), BoxError> {
        match self.unit.invoke(payload).failure() {
            None => Ok(()),
            Some(failure) => Err(Box::new(EffectError::Rejected(failure.message.clone()))),
        }
    }
}
