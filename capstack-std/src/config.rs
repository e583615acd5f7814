//! Typed unit and chain configuration.
//!
//! Configuration is plain data with defaults filled in by builder methods.
//! A [`UnitFactory`](crate::factory::UnitFactory) turns it into capabilities.

use crate::units::payment::DEFAULT_CURRENCY;
use capstack_core::WrapperKind;

/// Configuration of a single unit.
///
/// Only `kind` is required. `name` defaults to the kind and `currency` to
/// [`DEFAULT_CURRENCY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitConfig {
    kind: String,
    name: Option<String>,
    target: Option<String>,
    currency: String,
}

impl UnitConfig {
    /// Start a configuration for `kind`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            target: None,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Set the name reported in outcomes.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a unit-specific target (address, channel id, ...).
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the currency for payment units.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// The discriminant used to pick a constructor.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The configured name, or the kind.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }

    /// The target, if any.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// The currency.
    pub fn currency(&self) -> &str {
        &self.currency
    }
}

/// Configuration of a whole chain: one base unit plus wrapper units, first
/// wrapper innermost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainConfig {
    base: Option<UnitConfig>,
    wrappers: Vec<(WrapperKind, UnitConfig)>,
}

impl ChainConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base unit.
    pub fn with_base(mut self, base: UnitConfig) -> Self {
        self.base = Some(base);
        self
    }

    /// Append a wrapper unit that runs before the inner chain.
    pub fn before(mut self, unit: UnitConfig) -> Self {
        self.wrappers.push((WrapperKind::Before, unit));
        self
    }

    /// Append a wrapper unit that runs after the inner chain succeeds.
    pub fn after(mut self, unit: UnitConfig) -> Self {
        self.wrappers.push((WrapperKind::After, unit));
        self
    }

    /// The base unit, if set.
    pub fn base(&self) -> Option<&UnitConfig> {
        self.base.as_ref()
    }

    /// Wrapper units in build order.
    pub fn wrappers(&self) -> &[(WrapperKind, UnitConfig)] {
        &self.wrappers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = UnitConfig::new("payment-service");
        assert_eq!(config.name(), "payment-service");
        assert_eq!(config.currency(), "USD");
        assert_eq!(config.target(), None);
    }

    #[test]
    fn overrides_apply() {
        let config = UnitConfig::new("email")
            .with_name("ops-mail")
            .with_target("ops@example.com")
            .with_currency("EUR");
        assert_eq!(config.kind(), "email");
        assert_eq!(config.name(), "ops-mail");
        assert_eq!(config.target(), Some("ops@example.com"));
        assert_eq!(config.currency(), "EUR");
    }

    #[test]
    fn chain_config_keeps_wrapper_order() {
        let config = ChainConfig::new()
            .with_base(UnitConfig::new("email"))
            .after(UnitConfig::new("sms"))
            .before(UnitConfig::new("slack"));

        let kinds: Vec<_> = config
            .wrappers()
            .iter()
            .map(|(kind, unit)| (*kind, unit.kind()))
            .collect();
        assert_eq!(
            kinds,
            vec![(WrapperKind::After, "sms"), (WrapperKind::Before, "slack")]
        );
    }
}
