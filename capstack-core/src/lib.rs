//! # capstack-core
//!
//! Core traits for the capstack composable dispatch framework.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! units and effects that don't need the full `capstack-std` implementation.
//!
//! # Three-Layer Architecture
//!
//! ## Layer 1: Capability ([`Capability`])
//!
//! A single-operation contract: `invoke(&Payload) -> Outcome`. Units are
//! leaf capabilities that perform the real effect (send a message, charge a
//! card, run a query).
//!
//! - **Uniform**: Callers never special-case a concrete unit
//! - **Total**: Every internal fault surfaces as a failure [`Outcome`]
//!
//! ## Layer 2: Effect ([`Effect`])
//!
//! The side effect a wrapper contributes. Closures become effects through
//! [`effect_fn`]; whole capabilities through [`UnitEffect`].
//!
//! ## Layer 3: Wrapper ([`Wrapper`])
//!
//! Owns exactly one inner capability and one effect. The [`WrapperKind`]
//! decides whether the effect runs before or after delegation, which makes
//! wrap order equal to execution order.
//!
//! # Error Types
//!
//! - [`BuildError`] - Chain and unit construction errors
//! - [`EffectError`] - Wrapper effect errors
//! - [`PayloadError`] - Payload decoding errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod capability;
mod effect;
mod error;
mod outcome;
mod payload;
mod wrapper;

// Re-exports
pub use capability::{BoxCapability, Capability};
pub use effect::{BoxEffect, Effect, FnEffect, UnitEffect, effect_fn};
pub use error::{BoxError, BuildError, EffectError, PayloadError};
pub use outcome::{Failure, FailureKind, Outcome};
pub use payload::{Amount, Payload, Value};
pub use wrapper::{Wrapper, WrapperKind};
