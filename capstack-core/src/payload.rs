//! Invocation payloads.
//!
//! A [`Payload`] is an ordered mapping from string keys to primitive
//! [`Value`]s. Every capability in a chain receives the same payload by
//! reference; nothing in the chain can mutate it.

use crate::error::PayloadError;
use std::{collections::BTreeMap, fmt, str::FromStr};

/// An exact currency amount with two fractional digits.
///
/// Stored as signed minor units (cents) so that decimal input such as
/// `100.50` survives unchanged until an adapter explicitly converts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    minor: i64,
}

impl Amount {
    /// Create an amount from minor units (`10050` is `100.50`).
    pub const fn from_minor(minor: i64) -> Self {
        Self { minor }
    }

    /// The amount in minor units.
    pub const fn minor(&self) -> i64 {
        self.minor
    }

    /// The equivalent floating-point value, for collaborators that take `f64`.
    pub fn to_f64(&self) -> f64 {
        self.minor as f64 / 100.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor < 0 { "-" } else { "" };
        let abs = self.minor.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PayloadError::InvalidAmount(s.to_string());
        let text = s.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if frac.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut cents: i64 = if frac.is_empty() {
            0
        } else {
            frac.parse().map_err(|_| invalid())?
        };
        if frac.len() == 1 {
            cents *= 10;
        }

        let minor = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(cents))
            .ok_or_else(invalid)?;
        Ok(Self {
            minor: if negative { -minor } else { minor },
        })
    }
}

/// A primitive payload value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// Free text.
    Text(String),
    /// An exact currency amount.
    Amount(Amount),
}

impl Value {
    /// Human readable name of this value's kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Amount(_) => "amount",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Amount(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Amount> for Value {
    fn from(v: Amount) -> Self {
        Value::Amount(v)
    }
}

/// The argument passed to every capability in a chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    entries: BTreeMap<String, Value>,
}

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn require(&self, key: &str) -> Result<&Value, PayloadError> {
        self.entries.get(key).ok_or_else(|| PayloadError::Missing {
            key: key.to_string(),
        })
    }

    fn mismatch(key: &str, expected: &'static str) -> PayloadError {
        PayloadError::TypeMismatch {
            key: key.to_string(),
            expected,
        }
    }

    /// Read a text entry.
    pub fn text(&self, key: &str) -> Result<&str, PayloadError> {
        match self.require(key)? {
            Value::Text(v) => Ok(v),
            _ => Err(Self::mismatch(key, "text")),
        }
    }

    /// Read an integer entry.
    pub fn int(&self, key: &str) -> Result<i64, PayloadError> {
        match self.require(key)? {
            Value::Int(v) => Ok(*v),
            _ => Err(Self::mismatch(key, "int")),
        }
    }

    /// Read a boolean entry.
    pub fn flag(&self, key: &str) -> Result<bool, PayloadError> {
        match self.require(key)? {
            Value::Bool(v) => Ok(*v),
            _ => Err(Self::mismatch(key, "bool")),
        }
    }

    /// Read a currency amount.
    ///
    /// Text entries are parsed as decimals. `Int` entries are whole currency
    /// units, so `12` reads as `12.00`.
    pub fn amount(&self, key: &str) -> Result<Amount, PayloadError> {
        match self.require(key)? {
            Value::Amount(v) => Ok(*v),
            Value::Int(v) => v
                .checked_mul(100)
                .map(Amount::from_minor)
                .ok_or_else(|| PayloadError::InvalidAmount(v.to_string())),
            Value::Text(v) => v.parse(),
            _ => Err(Self::mismatch(key, "amount")),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Payload::new();
        for (k, v) in iter {
            payload.insert(k, v);
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_amounts() {
        assert_eq!("100.50".parse::<Amount>().unwrap().minor(), 10050);
        assert_eq!("7.5".parse::<Amount>().unwrap().minor(), 750);
        assert_eq!("-3".parse::<Amount>().unwrap().minor(), -300);
        assert_eq!(".25".parse::<Amount>().unwrap().minor(), 25);
    }

    #[test]
    fn rejects_malformed_amounts() {
        for bad in ["", "-", ".", "1.234", "12a", "1,00", "--1"] {
            assert!(bad.parse::<Amount>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn amount_display_and_float() {
        let amount = Amount::from_minor(10050);
        assert_eq!(amount.to_string(), "100.50");
        assert_eq!(amount.to_f64(), 100.50);
        assert_eq!(Amount::from_minor(-5).to_string(), "-0.05");
    }

    #[test]
    fn typed_accessors() {
        let payload = Payload::new()
            .with("message", "hello")
            .with("count", 3)
            .with("amount", "250.75")
            .with("whole", 12);

        assert_eq!(payload.text("message").unwrap(), "hello");
        assert_eq!(payload.int("count").unwrap(), 3);
        assert_eq!(payload.amount("amount").unwrap(), Amount::from_minor(25075));
        assert_eq!(payload.amount("whole").unwrap(), Amount::from_minor(1200));
        assert_eq!(
            payload.text("count"),
            Err(PayloadError::TypeMismatch {
                key: "count".into(),
                expected: "text"
            })
        );
        assert_eq!(
            payload.text("missing"),
            Err(PayloadError::Missing {
                key: "missing".into()
            })
        );
    }
}
