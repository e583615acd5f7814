//! Uniform invocation of capability chains.

use crate::{chain::Chain, layers::guard::panic_message};
use capstack_core::{BuildError, Capability, Outcome, Payload};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Invokes capabilities without knowing their shape.
///
/// A bare unit and an N-deep chain go through the same call site. The
/// dispatcher adds no logic of its own: the outcome it returns is exactly
/// the outcome the capability produced.
///
/// A panic that escapes the capability is caught here and reported as an
/// `InnerFailed` outcome named after the dispatched capability. Wrap a unit
/// in [`Guarded`](crate::layers::Guarded) to contain it closer to the source,
/// so outer layers see a normal failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// Create a new dispatcher.
    pub const fn new() -> Self {
        Self
    }

    /// Invoke `capability` with `payload`.
    pub fn dispatch<C>(&self, capability: &C, payload: &Payload) -> Outcome
    where
        C: Capability + ?Sized,
    {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(capability = capability.name(), "dispatching");
        }

        let outcome = match catch_unwind(AssertUnwindSafe(|| capability.invoke(payload))) {
            Ok(outcome) => outcome,
            Err(panic) => Outcome::inner_failed(
                capability.name(),
                format!("panicked: {}", panic_message(panic.as_ref())),
            ),
        };

        #[cfg(feature = "tracing")]
        {
            match outcome.failure() {
                None => tracing::debug!(capability = capability.name(), "dispatch succeeded"),
                Some(failure) => tracing::warn!(
                    capability = capability.name(),
                    kind = %failure.kind,
                    origin = %failure.origin,
                    inner_ran = failure.inner_ran,
                    "dispatch failed: {}",
                    failure.message
                ),
            }
        }

        outcome
    }

    /// Dispatch the result of a chain build.
    ///
    /// A build error is reported as an [`InvalidBaseUnit`] failure instead of
    /// escaping the dispatch boundary.
    ///
    /// [`InvalidBaseUnit`]: capstack_core::FailureKind::InvalidBaseUnit
    pub fn dispatch_built(&self, built: Result<Chain, BuildError>, payload: &Payload) -> Outcome {
        match built {
            Ok(chain) => self.dispatch(&chain, payload),
            Err(err) => {
                #[cfg(feature = "tracing")]
                {
                    tracing::warn!(error = %err, "chain could not be built");
                }
                Outcome::invalid_base_unit(err.to_string())
            }
        }
    }

    /// Dispatch every capability in turn.
    ///
    /// Chains are independent: a failure in one does not stop the rest.
    /// Outcomes are returned in iteration order.
    pub fn dispatch_all<'a, I, C>(&self, capabilities: I, payload: &Payload) -> Vec<Outcome>
    where
        I: IntoIterator<Item = &'a C>,
        C: Capability + ?Sized + 'a,
    {
        capabilities
            .into_iter()
            .map(|capability| self.dispatch(capability, payload))
            .collect()
    }
}

/// Invoke `capability` through a default [`Dispatcher`].
pub fn dispatch<C>(capability: &C, payload: &Payload) -> Outcome
where
    C: Capability + ?Sized,
{
    Dispatcher::new().dispatch(capability, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chain::ChainBuilder,
        testing::{CountingUnit, EffectLog, RecordingUnit},
    };
    use capstack_core::{BoxCapability, FailureKind};

    #[test]
    fn dispatch_returns_outcome_unchanged() {
        let log = EffectLog::new();
        let unit = RecordingUnit::failing("base", log.clone(), "offline");

        let direct = unit.invoke(&Payload::new());
        let dispatched = dispatch(&unit, &Payload::new());

        assert_eq!(direct, dispatched);
        assert_eq!(dispatched.failure_kind(), Some(FailureKind::InnerFailed));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn escaping_panic_becomes_a_failure() {
        struct Exploding;

        impl Capability for Exploding {
            fn name(&self) -> &str {
                "exploding"
            }

            fn invoke(&self, _payload: &Payload) -> Outcome {
                panic!("wire cut")
            }
        }

        let outcome = dispatch(&Exploding, &Payload::new());

        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::InnerFailed);
        assert_eq!(failure.origin, "exploding");
        assert_eq!(failure.message, "panicked: wire cut");
    }

    #[test]
    fn dispatch_built_reports_missing_base() {
        let outcome = Dispatcher::new().dispatch_built(ChainBuilder::new().build(), &Payload::new());

        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::InvalidBaseUnit);
        assert!(!failure.inner_ran);
    }

    #[test]
    fn dispatch_all_continues_past_failures() {
        let log = EffectLog::new();
        let counter = CountingUnit::new();
        let chains: Vec<BoxCapability> = vec![
            RecordingUnit::failing("broken", log.clone(), "down").boxed(),
            counter.clone().boxed(),
            RecordingUnit::new("ok", log.clone()).boxed(),
        ];

        let outcomes = Dispatcher::new().dispatch_all(&chains, &Payload::new());

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_failure());
        assert!(outcomes[1].is_success());
        assert!(outcomes[2].is_success());
        assert_eq!(counter.count(), 1);
        assert_eq!(log.entries(), vec!["broken", "ok"]);
    }
}
