//! Testing utilities for capstack.
//!
//! This module provides utilities to make testing units, wrappers and
//! chains easier.
//!
//! # Features
//!
//! - [`EffectLog`]: A shared, ordered record of observed effects
//! - [`RecordingUnit`]: A unit that records itself and succeeds or fails on demand
//! - [`RecordingEffect`] / [`FailingEffect`]: Effects that record and succeed or fail
//! - [`CountingUnit`]: A unit that counts invocations
//! - [`RecordingLegacyGateway`]: A legacy payment backend that captures amounts
//! - [`StubExecutor`]: A query executor with canned rows

use crate::units::{
    payment::LegacyPayments,
    query::{QueryExecutor, Row},
};
use capstack_core::{BoxError, Capability, Effect, EffectError, Outcome, Payload};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Effect Log
// ============================================================================

/// A shared, ordered record of effect labels.
///
/// Clones share the same record, so one handle can be kept by the test and
/// others handed to the units and effects under test.
///
/// # Example
///
/// ```rust,ignore
/// let log = EffectLog::new();
/// let chain = build(
///     RecordingUnit::new("email", log.clone()),
///     [WrapperSpec::after(RecordingEffect::new("sms", log.clone()))],
/// );
/// chain.invoke(&Payload::new());
/// assert_eq!(log.entries(), vec!["email", "sms"]);
/// ```
#[derive(Clone, Default)]
pub struct EffectLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl EffectLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label.
    pub fn record(&self, label: &str) {
        self.entries.lock().unwrap().push(label.to_string());
    }

    /// Get a clone of the recorded labels.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Get the number of recorded labels.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all recorded labels.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

// ============================================================================
// Recording Unit
// ============================================================================

/// A unit that records its name on every invocation.
pub struct RecordingUnit {
    name: String,
    log: EffectLog,
    failure: Option<String>,
}

impl RecordingUnit {
    /// A unit that always succeeds with message `done`.
    pub fn new(name: impl Into<String>, log: EffectLog) -> Self {
        Self {
            name: name.into(),
            log,
            failure: None,
        }
    }

    /// A unit that records itself and then fails with `message`.
    pub fn failing(name: impl Into<String>, log: EffectLog, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            log,
            failure: Some(message.into()),
        }
    }
}

impl Capability for RecordingUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, _payload: &Payload) -> Outcome {
        self.log.record(&self.name);
        match &self.failure {
            Some(message) => Outcome::inner_failed(&self.name, message),
            None => Outcome::success(&self.name, "done"),
        }
    }
}

// ============================================================================
// Recording / Failing Effects
// ============================================================================

/// An effect that records its name and succeeds.
pub struct RecordingEffect {
    name: String,
    log: EffectLog,
}

impl RecordingEffect {
    /// Create a new recording effect.
    pub fn new(name: impl Into<String>, log: EffectLog) -> Self {
        Self {
            name: name.into(),
            log,
        }
    }
}

impl Effect for RecordingEffect {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, _payload: &Payload) -> Result<(), BoxError> {
        self.log.record(&self.name);
        Ok(())
    }
}

/// An effect that always fails, optionally recording the attempt.
pub struct FailingEffect {
    name: String,
    log: Option<EffectLog>,
}

impl FailingEffect {
    /// Create a failing effect that records nothing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            log: None,
        }
    }

    /// Create a failing effect that records each attempt.
    pub fn recorded(name: impl Into<String>, log: EffectLog) -> Self {
        Self {
            name: name.into(),
            log: Some(log),
        }
    }
}

impl Effect for FailingEffect {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, _payload: &Payload) -> Result<(), BoxError> {
        if let Some(log) = &self.log {
            log.record(&self.name);
        }
        Err(Box::new(EffectError::Rejected(format!(
            "{} always fails",
            self.name
        ))))
    }
}

// ============================================================================
// Counting Unit
// ============================================================================

/// A unit that counts invocations.
#[derive(Clone, Default)]
pub struct CountingUnit {
    count: Arc<AtomicUsize>,
}

impl CountingUnit {
    /// Create a new counting unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Capability for CountingUnit {
    fn name(&self) -> &str {
        "counter"
    }

    fn invoke(&self, _payload: &Payload) -> Outcome {
        let seen = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        Outcome::success("counter", format!("invocation {seen}"))
    }
}

// ============================================================================
// Recording Legacy Gateway
// ============================================================================

/// A legacy payment backend that captures the dollar figures it receives.
#[derive(Clone, Default)]
pub struct RecordingLegacyGateway {
    payments: Arc<Mutex<Vec<f64>>>,
}

impl RecordingLegacyGateway {
    /// Create a new recording gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the received amounts.
    pub fn payments(&self) -> Vec<f64> {
        self.payments.lock().unwrap().clone()
    }
}

impl LegacyPayments for RecordingLegacyGateway {
    fn make_payment(&self, amount_in_dollars: f64) -> Result<(), BoxError> {
        self.payments.lock().unwrap().push(amount_in_dollars);
        Ok(())
    }
}

// ============================================================================
// Stub Executor
// ============================================================================

/// A query executor that records commands and returns canned rows.
#[derive(Clone, Default)]
pub struct StubExecutor {
    calls: Arc<Mutex<Vec<String>>>,
    rows: Vec<Row>,
    fail_on: Option<String>,
}

impl StubExecutor {
    /// Create an executor that returns no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `rows` from every successful command.
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    /// Fail every command whose text contains `needle`.
    pub fn failing_on(mut self, needle: impl Into<String>) -> Self {
        self.fail_on = Some(needle.into());
        self
    }

    /// Get a clone of the commands received so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl QueryExecutor for StubExecutor {
    fn run(&self, command: &str, _params: &Payload) -> Result<Vec<Row>, BoxError> {
        self.calls.lock().unwrap().push(command.to_string());
        match &self.fail_on {
            Some(needle) if command.contains(needle.as_str()) => {
                Err(format!("executor rejected `{needle}`").into())
            }
            _ => Ok(self.rows.clone()),
        }
    }
}
