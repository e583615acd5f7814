//! # capstack-std
//!
//! Standard implementations for the capstack composable dispatch framework.
//!
//! This crate provides:
//! - **Chain assembly**: [`build`], [`ChainBuilder`], [`WrapperSpec`], [`Chain`]
//! - **Dispatch**: [`Dispatcher`]
//! - **Sinks**: [`LogSink`], [`ConsoleSink`], [`MemorySink`]
//! - **Standard units**: notifications, payment adapters, query scripts
//! - **Layers**: panic containment, tracing spans, payload logging
//! - **Factory**: [`UnitFactory`] driven by [`UnitConfig`] / [`ChainConfig`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use capstack_core;

// Modules
pub mod chain;
pub mod config;
pub mod dispatch;
pub mod factory;
pub mod layers;
pub mod sink;
pub mod testing;
pub mod units;

pub use chain::{Chain, ChainBuilder, WrapperSpec, build};
pub use config::{ChainConfig, UnitConfig};
pub use dispatch::{Dispatcher, dispatch};
pub use factory::{FactoryBuilder, UnitFactory};
pub use sink::{ConsoleSink, LogSink, MemorySink, SharedSink};
