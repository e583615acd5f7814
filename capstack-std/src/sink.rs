//! Line-output sinks.
//!
//! Units never print directly. They are handed a [`SharedSink`] at
//! construction and write their observable effect through it, so the
//! console, a log pipeline, or an in-memory capture can be swapped in.

use capstack_core::BoxError;
use std::{
    io::Write,
    sync::{Arc, Mutex, PoisonError},
};

/// An injected line-output collaborator.
pub trait LogSink: Send + Sync + 'static {
    /// Write one line.
    fn write(&self, line: &str) -> Result<(), BoxError>;
}

/// A sink shared by every unit of a chain.
pub type SharedSink = Arc<dyn LogSink>;

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write(&self, line: &str) -> Result<(), BoxError> {
        (**self).write(line)
    }
}

/// Writes lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, line: &str) -> Result<(), BoxError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}")?;
        Ok(())
    }
}

/// Captures lines in memory.
///
/// Clones share the same buffer, so a test can keep one handle and give
/// the other to the units under test.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Discard captured lines.
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Convert into a [`SharedSink`] that still writes to this buffer.
    pub fn shared(&self) -> SharedSink {
        Arc::new(self.clone())
    }
}

impl LogSink for MemorySink {
    fn write(&self, line: &str) -> Result<(), BoxError> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}

/// Forwards lines to `tracing` at info level.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    label: &'static str,
}

#[cfg(feature = "tracing")]
impl TracingSink {
    /// Create a sink whose events carry `label` as the `sink` field.
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }
}

#[cfg(feature = "tracing")]
impl LogSink for TracingSink {
    fn write(&self, line: &str) -> Result<(), BoxError> {
        tracing::info!(sink = %self.label, "{line}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_clones_share_lines() {
        let sink = MemorySink::new();
        let shared = sink.shared();
        shared.write("first").unwrap();
        shared.write("second").unwrap();

        assert_eq!(sink.lines(), vec!["first", "second"]);
        sink.clear();
        assert!(sink.lines().is_empty());
    }
}
