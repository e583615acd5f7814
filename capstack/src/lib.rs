//! # capstack - Composable Capability Chains
//!
//! `capstack` builds chains of capability-providing units at construction
//! time and invokes them through one uniform call. Wrap order is execution
//! order: every wrapper runs its own effect strictly before or strictly
//! after the single call to its inner capability.
//!
//! ## Quick Start (Static Path)
//!
//! ```rust,ignore
//! use capstack::prelude::*;
//!
//! let sink = MemorySink::new();
//! let chain = Notifier::email(sink.shared())
//!     .after(UnitEffect::new(Notifier::sms(sink.shared())))
//!     .after(UnitEffect::new(Notifier::slack(sink.shared())));
//!
//! let outcome = dispatch(&chain, &Payload::new().with("message", "shipped"));
//! ```
//!
//! ## Runtime Assembly
//!
//! ```rust,ignore
//! let chain = ChainBuilder::new()
//!     .base(Notifier::email(sink.shared()))
//!     .after_unit(Notifier::sms(sink.shared()))
//!     .build()?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use capstack_core::{
    // Payload
    Amount,
    // Capability
    BoxCapability,
    // Effect
    BoxEffect,
    // Error types
    BoxError,
    BuildError,
    Capability,
    Effect,
    EffectError,
    // Outcome
    Failure,
    FailureKind,
    FnEffect,
    Outcome,
    Payload,
    PayloadError,
    UnitEffect,
    Value,
    // Wrapper
    Wrapper,
    WrapperKind,
    effect_fn,
};

// Chain assembly and dispatch
pub use capstack_std::{
    Chain, ChainBuilder, ChainConfig, Dispatcher, FactoryBuilder, UnitConfig, UnitFactory,
    WrapperSpec, build, dispatch,
};

/// Output sinks.
pub mod sink {
    #[cfg(feature = "tracing")]
    pub use capstack_std::sink::TracingSink;
    pub use capstack_std::sink::{ConsoleSink, LogSink, MemorySink, SharedSink};
}

/// Standard units.
pub mod units {
    pub use capstack_std::units::{notify, payment, query};
    pub use capstack_std::units::{
        Channels, LegacyGatewayAdapter, LegacyPayments, Notifier, QueryError, QueryExecutor, QueryUnit,
        Row,
        SinkLegacyGateway, SinkTransactionService, TransactionService, TransactionServiceAdapter,
        notification_chain,
    };
}

/// Capability layers.
pub mod layers {
    pub use capstack_std::layers::{Guarded, LayerExt, LogEffect, Traced};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use capstack_std::testing::*;
}

/// Prelude module - common imports for capstack.
///
/// # Usage
///
/// ```rust,ignore
/// use capstack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Amount, BoxCapability, BuildError, Capability, Chain, ChainBuilder, Dispatcher, Effect,
        FailureKind, Outcome, Payload, UnitEffect, WrapperKind, WrapperSpec, build, dispatch,
        effect_fn,
        layers::LayerExt,
        sink::{LogSink, MemorySink, SharedSink},
        units::{Channels, Notifier},
    };
}
