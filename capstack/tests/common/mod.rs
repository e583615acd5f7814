#![allow(dead_code)]

use capstack::{
    Capability, Outcome, Payload, WrapperSpec,
    testing::{EffectLog, FailingEffect, RecordingEffect, RecordingUnit},
};

// ============================================================================
// Payloads
// ============================================================================

pub fn message(text: &str) -> Payload {
    Payload::new().with("message", text)
}

// ============================================================================
// Spec helpers
// ============================================================================

pub fn before(label: &str, log: &EffectLog) -> WrapperSpec {
    WrapperSpec::before(RecordingEffect::new(label, log.clone()))
}

pub fn after(label: &str, log: &EffectLog) -> WrapperSpec {
    WrapperSpec::after(RecordingEffect::new(label, log.clone()))
}

pub fn failing_after(label: &str, log: &EffectLog) -> WrapperSpec {
    WrapperSpec::after(FailingEffect::recorded(label, log.clone()))
}

pub fn base(log: &EffectLog) -> RecordingUnit {
    RecordingUnit::new("base", log.clone())
}

/// Invoke and return the outcome together with the effects it produced.
pub fn run(capability: &dyn Capability, payload: &Payload, log: &EffectLog) -> (Outcome, Vec<String>) {
    log.clear();
    let outcome = capability.invoke(payload);
    (outcome, log.entries())
}
