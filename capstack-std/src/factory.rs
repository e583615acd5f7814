//! Unit factory.
//!
//! Maps a discriminant string to a constructor function. There is no
//! factory hierarchy: adding a unit kind means registering one closure.
//!
//! # Example
//!
//! ```rust,ignore
//! let factory = UnitFactory::with_defaults(Arc::new(ConsoleSink));
//! let chain = factory.build_chain(
//!     &ChainConfig::new()
//!         .with_base(UnitConfig::new("email"))
//!         .after(UnitConfig::new("sms")),
//! )?;
//! ```

use crate::{
    chain::{Chain, WrapperSpec, build},
    config::{ChainConfig, UnitConfig},
    sink::SharedSink,
    units::{
        notify::{Channels, Notifier},
        payment::{
            LegacyGatewayAdapter, SinkLegacyGateway, SinkTransactionService,
            TransactionServiceAdapter,
        },
    },
};
use capstack_core::{BoxCapability, BuildError, Capability, UnitEffect};
use std::collections::HashMap;

/// A registered constructor.
pub type Constructor =
    Box<dyn Fn(&UnitConfig, &SharedSink) -> Result<BoxCapability, BuildError> + Send + Sync>;

/// Builds units from [`UnitConfig`]s.
pub struct UnitFactory {
    sink: SharedSink,
    constructors: HashMap<String, Constructor>,
}

impl UnitFactory {
    /// Start an empty factory whose units write to `sink`.
    pub fn builder(sink: SharedSink) -> FactoryBuilder {
        FactoryBuilder {
            sink,
            constructors: HashMap::new(),
        }
    }

    /// A factory with every built-in unit kind registered.
    pub fn with_defaults(sink: SharedSink) -> Self {
        Self::builder(sink).with_defaults().build()
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Construct one unit.
    pub fn create(&self, config: &UnitConfig) -> Result<BoxCapability, BuildError> {
        let constructor = self
            .constructors
            .get(config.kind())
            .ok_or_else(|| BuildError::UnknownKind(config.kind().to_string()))?;
        constructor(config, &self.sink)
    }

    /// Construct a whole chain. Wrapper units run as effects of their layer.
    pub fn build_chain(&self, config: &ChainConfig) -> Result<Chain, BuildError> {
        let base = config.base().ok_or(BuildError::InvalidBaseUnit)?;
        let base = self.create(base)?;
        let specs = config
            .wrappers()
            .iter()
            .map(|(kind, unit)| {
                self.create(unit)
                    .map(|unit| WrapperSpec::new(*kind, UnitEffect::new(unit)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(build(base, specs))
    }
}

/// Builder for constructing a [`UnitFactory`].
pub struct FactoryBuilder {
    sink: SharedSink,
    constructors: HashMap<String, Constructor>,
}

impl FactoryBuilder {
    /// Register a constructor. A later registration for the same kind wins.
    pub fn register<F>(mut self, kind: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&UnitConfig, &SharedSink) -> Result<BoxCapability, BuildError>
            + Send
            + Sync
            + 'static,
    {
        self.constructors.insert(kind.into(), Box::new(constructor));
        self
    }

    /// Register the notification and payment units.
    pub fn with_defaults(self) -> Self {
        let mut builder = self;
        for kind in ["email", "sms", "slack"] {
            builder = builder.register(kind, notifier);
        }
        builder
            .register("legacy-gateway", |config, sink| {
                Ok(LegacyGatewayAdapter::new(SinkLegacyGateway::new(sink.clone()))
                    .named(config.name())
                    .boxed())
            })
            .register("payment-service", |config, sink| {
                let currency = validate_currency(config.currency())?;
                Ok(
                    TransactionServiceAdapter::new(SinkTransactionService::new(sink.clone()))
                        .with_currency(currency)
                        .named(config.name())
                        .boxed(),
                )
            })
    }

    /// Build the factory.
    pub fn build(self) -> UnitFactory {
        UnitFactory {
            sink: self.sink,
            constructors: self.constructors,
        }
    }
}

fn notifier(config: &UnitConfig, sink: &SharedSink) -> Result<BoxCapability, BuildError> {
    let channel = Channels::from_kind(config.kind())
        .ok_or_else(|| BuildError::UnknownKind(config.kind().to_string()))?;
    let mut notifier = Notifier::new(channel, sink.clone())?.named(config.name());
    if let Some(target) = config.target() {
        notifier = notifier.with_target(target);
    }
    Ok(notifier.boxed())
}

fn validate_currency(currency: &str) -> Result<&str, BuildError> {
    if currency.len() == 3 && currency.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(currency)
    } else {
        Err(BuildError::InvalidConfig(format!(
            "currency must be a three-letter code, got `{currency}`"
        )))
    }
}
