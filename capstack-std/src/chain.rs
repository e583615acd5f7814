//! Chain assembly.
//!
//! [`build`] nests wrapper specs around a base unit in the order given:
//!
//! ```text
//! capability_0 = base
//! capability_i = specs[i].wrap(capability_{i-1})
//! ```
//!
//! The first spec therefore ends up innermost and the last spec outermost.
//! For `After` wrappers this means effects are observed in spec order right
//! after the base unit; for `Before` wrappers the last spec's effect is
//! observed first.

use capstack_core::{
    BoxCapability, BoxEffect, BuildError, Capability, Effect, Outcome, Payload, UnitEffect,
    Wrapper, WrapperKind,
};

/// A recipe for one wrapper layer.
pub struct WrapperSpec {
    kind: WrapperKind,
    effect: BoxEffect,
}

impl WrapperSpec {
    /// Create a spec from a kind and an effect.
    pub fn new(kind: WrapperKind, effect: impl Effect) -> Self {
        Self {
            kind,
            effect: Box::new(effect),
        }
    }

    /// A spec whose effect runs before the inner capability.
    pub fn before(effect: impl Effect) -> Self {
        Self::new(WrapperKind::Before, effect)
    }

    /// A spec whose effect runs after the inner capability succeeds.
    pub fn after(effect: impl Effect) -> Self {
        Self::new(WrapperKind::After, effect)
    }

    /// Run a whole unit before the inner capability.
    pub fn before_unit(unit: impl Capability) -> Self {
        Self::before(UnitEffect::new(unit))
    }

    /// Run a whole unit after the inner capability succeeds.
    pub fn after_unit(unit: impl Capability) -> Self {
        Self::after(UnitEffect::new(unit))
    }

    /// The wrapper kind.
    pub fn kind(&self) -> WrapperKind {
        self.kind
    }

    /// Name of the effect this spec will install.
    pub fn name(&self) -> &str {
        self.effect.name()
    }

    /// Wrap `inner`, consuming the spec.
    pub fn wrap(self, inner: BoxCapability) -> BoxCapability {
        Box::new(Wrapper::new(self.kind, inner, self.effect))
    }
}

impl std::fmt::Debug for WrapperSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperSpec")
            .field("kind", &self.kind)
            .field("effect", &self.effect.name())
            .finish()
    }
}

/// A built capability chain.
///
/// Behaves exactly like its outermost layer; additionally remembers the
/// layer names for diagnostics.
pub struct Chain {
    capability: BoxCapability,
    layers: Vec<String>,
}

impl Chain {
    /// Number of wrappers around the base unit.
    pub fn depth(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    /// Layer names, outermost first. The last entry is the base unit.
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Unwrap into the boxed outermost capability.
    pub fn into_inner(self) -> BoxCapability {
        self.capability
    }
}

impl Capability for Chain {
    fn name(&self) -> &str {
        self.capability.name()
    }

    fn invoke(&self, payload: &Payload) -> Outcome {
        self.capability.invoke(payload)
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("layers", &self.layers)
            .finish()
    }
}

/// Nest `specs` around `base`, first spec innermost.
///
/// Zero specs yields a chain that behaves exactly like `base`.
pub fn build<C, I>(base: C, specs: I) -> Chain
where
    C: Capability,
    I: IntoIterator<Item = WrapperSpec>,
{
    let mut layers = vec![base.name().to_string()];
    let mut capability = base.boxed();
    for spec in specs {
        layers.push(format!("{} {}", spec.kind(), spec.name()));
        capability = spec.wrap(capability);
    }
    layers.reverse();

    #[cfg(feature = "tracing")]
    {
        tracing::debug!(?layers, "built capability chain");
    }

    Chain { capability, layers }
}

/// Fluent builder for chains.
///
/// Specs can only be appended, and each one wraps what was built before
/// it, so a chain can never refer back to itself.
///
/// # Example
///
/// ```rust,ignore
/// let chain = ChainBuilder::new()
///     .base(Notifier::email(sink.clone()))
///     .after_unit(Notifier::sms(sink.clone()))
///     .after_unit(Notifier::slack(sink))
///     .build()?;
/// ```
#[derive(Default)]
pub struct ChainBuilder {
    base: Option<BoxCapability>,
    specs: Vec<WrapperSpec>,
}

impl ChainBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base unit. Setting it again replaces the previous one.
    pub fn base(mut self, unit: impl Capability) -> Self {
        self.base = Some(unit.boxed());
        self
    }

    /// Append a wrapper spec.
    pub fn wrap(mut self, spec: WrapperSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Append a `Before` wrapper.
    pub fn before(self, effect: impl Effect) -> Self {
        self.wrap(WrapperSpec::before(effect))
    }

    /// Append an `After` wrapper.
    pub fn after(self, effect: impl Effect) -> Self {
        self.wrap(WrapperSpec::after(effect))
    }

    /// Append an `After` wrapper that runs a whole unit.
    pub fn after_unit(self, unit: impl Capability) -> Self {
        self.wrap(WrapperSpec::after_unit(unit))
    }

    /// Number of specs appended so far.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no specs were appended.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Assemble the chain.
    ///
    /// Fails with [`BuildError::InvalidBaseUnit`] when no base was set.
    pub fn build(self) -> Result<Chain, BuildError> {
        let base = self.base.ok_or(BuildError::InvalidBaseUnit)?;
        Ok(build(base, self.specs))
    }
}
