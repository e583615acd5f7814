//! Logging effect for payload observation.

use capstack_core::{BoxError, Effect, Payload};

/// An effect that logs the payload for debugging/observation.
///
/// Never fails, so it is safe in either wrapper position.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEffect;

impl Effect for LogEffect {
    fn name(&self) -> &str {
        "log"
    }

    fn apply(&self, payload: &Payload) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(?payload, "processing payload");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = payload;
        }
        Ok(())
    }
}
