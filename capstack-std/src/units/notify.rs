//! Notification units.
//!
//! A [`Notifier`] delivers the payload's `message` over one channel by
//! writing a line to its sink. [`notification_chain`] composes several
//! channels: the first selected channel is the base unit, every further
//! channel is an `After` wrapper, so delivery happens in declaration order.

use crate::{
    chain::{Chain, WrapperSpec, build},
    sink::SharedSink,
};
use bitflags::bitflags;
use capstack_core::{BoxError, BuildError, Capability, Outcome, Payload};

/// Payload key carrying the notification text.
pub const MESSAGE_KEY: &str = "message";

bitflags! {
    /// Delivery channels. Declaration order is composition order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Channels: u8 {
        /// Email delivery.
        const EMAIL = 1;
        /// SMS delivery.
        const SMS = 1 << 1;
        /// Slack delivery.
        const SLACK = 1 << 2;
    }
}

impl Channels {
    /// Display label of a single channel, `None` for combinations.
    pub fn label(self) -> Option<&'static str> {
        if self == Self::EMAIL {
            Some("Email")
        } else if self == Self::SMS {
            Some("SMS")
        } else if self == Self::SLACK {
            Some("Slack")
        } else {
            None
        }
    }

    /// Look up a single channel by its lowercase kind name.
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "email" => Some(Self::EMAIL),
            "sms" => Some(Self::SMS),
            "slack" => Some(Self::SLACK),
            _ => None,
        }
    }
}

/// Delivers a message over a single channel.
pub struct Notifier {
    name: String,
    label: &'static str,
    target: Option<String>,
    sink: SharedSink,
}

impl Notifier {
    /// Create a notifier for exactly one channel.
    pub fn new(channel: Channels, sink: SharedSink) -> Result<Self, BuildError> {
        let label = channel.label().ok_or_else(|| {
            BuildError::InvalidConfig(format!(
                "notifier needs exactly one channel, got {channel:?}"
            ))
        })?;
        Ok(Self::single(label, sink))
    }

    /// An email notifier.
    pub fn email(sink: SharedSink) -> Self {
        Self::single("Email", sink)
    }

    /// An SMS notifier.
    pub fn sms(sink: SharedSink) -> Self {
        Self::single("SMS", sink)
    }

    /// A Slack notifier.
    pub fn slack(sink: SharedSink) -> Self {
        Self::single("Slack", sink)
    }

    fn single(label: &'static str, sink: SharedSink) -> Self {
        Self {
            name: label.to_string(),
            label,
            target: None,
            sink,
        }
    }

    /// Override the name reported in outcomes.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Address deliveries to `target`.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    fn send(&self, payload: &Payload) -> Result<String, BoxError> {
        let message = payload.text(MESSAGE_KEY)?;
        let line = match &self.target {
            Some(target) => format!("Sending {} Notification to {target}: {message}", self.label),
            None => format!("Sending {} Notification: {message}", self.label),
        };
        self.sink.write(&line)?;
        Ok(line)
    }
}

impl Capability for Notifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, payload: &Payload) -> Outcome {
        Outcome::from_result(&self.name, self.send(payload))
    }
}

/// Compose one notifier per selected channel.
///
/// The lowest selected channel is the base unit; the rest become `After`
/// wrappers in declaration order. An empty selection has no base unit.
pub fn notification_chain(channels: Channels, sink: SharedSink) -> Result<Chain, BuildError> {
    let mut selected = channels.iter();
    let base = selected.next().ok_or(BuildError::InvalidBaseUnit)?;
    let base = Notifier::new(base, sink.clone())?;
    let specs = selected
        .map(|channel| Notifier::new(channel, sink.clone()).map(WrapperSpec::after_unit))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(build(base, specs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use capstack_core::FailureKind;

    #[test]
    fn notifier_writes_one_line() {
        let sink = MemorySink::new();
        let outcome = Notifier::email(sink.shared())
            .invoke(&Payload::new().with(MESSAGE_KEY, "Your order has been placed!"));

        assert!(outcome.is_success());
        assert_eq!(
            sink.lines(),
            vec!["Sending Email Notification: Your order has been placed!"]
        );
    }

    #[test]
    fn target_is_named_in_the_line() {
        let sink = MemorySink::new();
        Notifier::slack(sink.shared())
            .with_target("#ops")
            .invoke(&Payload::new().with(MESSAGE_KEY, "deploy done"));

        assert_eq!(sink.lines(), vec!["Sending Slack Notification to #ops: deploy done"]);
    }

    #[test]
    fn missing_message_is_an_inner_failure() {
        let sink = MemorySink::new();
        let outcome = Notifier::sms(sink.shared()).invoke(&Payload::new());

        assert_eq!(outcome.failure_kind(), Some(FailureKind::InnerFailed));
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn combined_channels_are_rejected_for_a_single_notifier() {
        let sink = MemorySink::new();
        let result = Notifier::new(Channels::EMAIL | Channels::SMS, sink.shared());
        assert!(matches!(result, Err(BuildError::InvalidConfig(_))));
    }

    #[test]
    fn channels_deliver_in_declaration_order() {
        let sink = MemorySink::new();
        let chain = notification_chain(Channels::SLACK | Channels::EMAIL, sink.shared()).unwrap();

        assert_eq!(chain.depth(), 1);
        chain.invoke(&Payload::new().with(MESSAGE_KEY, "New critical alert!"));
        assert_eq!(
            sink.lines(),
            vec![
                "Sending Email Notification: New critical alert!",
                "Sending Slack Notification: New critical alert!",
            ]
        );
    }

    #[test]
    fn empty_selection_has_no_base() {
        let sink = MemorySink::new();
        let result = notification_chain(Channels::empty(), sink.shared());
        assert_eq!(result.unwrap_err(), BuildError::InvalidBaseUnit);
    }
}
