//! Payment adapters.
//!
//! Two payment backends expose incompatible shapes: a legacy gateway that
//! takes a floating-point dollar figure, and a transaction service that
//! takes an exact amount plus a currency code. Each adapter is a unit that
//! reads the payload's `amount` and performs the translation itself, so the
//! dispatcher treats both identically.

use crate::sink::SharedSink;
use capstack_core::{Amount, BoxError, Capability, Outcome, Payload};

/// Payload key carrying the amount to charge.
pub const AMOUNT_KEY: &str = "amount";
/// Optional payload key overriding the adapter's currency.
pub const CURRENCY_KEY: &str = "currency";
/// Currency used when neither configuration nor payload names one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// The legacy gateway's native interface.
pub trait LegacyPayments: Send + Sync + 'static {
    /// Charge an amount given in dollars.
    fn make_payment(&self, amount_in_dollars: f64) -> Result<(), BoxError>;
}

/// The transaction service's native interface.
pub trait TransactionService: Send + Sync + 'static {
    /// Execute a transaction in the given currency.
    fn execute_transaction(&self, amount: Amount, currency: &str) -> Result<(), BoxError>;
}

/// A legacy gateway that reports to a sink.
pub struct SinkLegacyGateway {
    sink: SharedSink,
}

impl SinkLegacyGateway {
    /// Create a new `SinkLegacyGateway`.
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }
}

impl LegacyPayments for SinkLegacyGateway {
    fn make_payment(&self, amount_in_dollars: f64) -> Result<(), BoxError> {
        self.sink.write(&format!(
            "[OldPaymentGateway] Processing payment of ${amount_in_dollars:.2} using legacy system."
        ))?;
        self.sink
            .write("[OldPaymentGateway] Transaction completed successfully via old system.")
    }
}

/// A transaction service that reports to a sink.
pub struct SinkTransactionService {
    sink: SharedSink,
}

impl SinkTransactionService {
    /// Create a new `SinkTransactionService`.
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }
}

impl TransactionService for SinkTransactionService {
    fn execute_transaction(&self, amount: Amount, currency: &str) -> Result<(), BoxError> {
        self.sink.write(&format!(
            "[NewPaymentService] Executing transaction for {amount} {currency}."
        ))?;
        self.sink
            .write("[NewPaymentService] Transaction approved by new service.")
    }
}

/// Adapts a [`LegacyPayments`] backend to the capability contract.
pub struct LegacyGatewayAdapter<G> {
    name: String,
    gateway: G,
}

impl<G: LegacyPayments> LegacyGatewayAdapter<G> {
    /// Create a new adapter around `gateway`.
    pub fn new(gateway: G) -> Self {
        Self {
            name: "legacy-gateway".to_string(),
            gateway,
        }
    }

    /// Override the name reported in outcomes.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn charge(&self, payload: &Payload) -> Result<String, BoxError> {
        let amount = payload.amount(AMOUNT_KEY)?;
        self.gateway.make_payment(amount.to_f64())?;
        Ok(format!("charged {amount} via legacy gateway"))
    }
}

impl<G: LegacyPayments> Capability for LegacyGatewayAdapter<G> {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, payload: &Payload) -> Outcome {
        Outcome::from_result(&self.name, self.charge(payload))
    }
}

/// Adapts a [`TransactionService`] backend to the capability contract.
pub struct TransactionServiceAdapter<S> {
    name: String,
    service: S,
    currency: String,
}

impl<S: TransactionService> TransactionServiceAdapter<S> {
    /// Create a new adapter charging in [`DEFAULT_CURRENCY`].
    pub fn new(service: S) -> Self {
        Self {
            name: "payment-service".to_string(),
            service,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Charge in `currency` unless the payload names another one.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Override the name reported in outcomes.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn charge(&self, payload: &Payload) -> Result<String, BoxError> {
        let amount = payload.amount(AMOUNT_KEY)?;
        let currency = if payload.contains(CURRENCY_KEY) {
            payload.text(CURRENCY_KEY)?
        } else {
            self.currency.as_str()
        };
        self.service.execute_transaction(amount, currency)?;
        Ok(format!("charged {amount} {currency} via transaction service"))
    }
}

impl<S: TransactionService> Capability for TransactionServiceAdapter<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, payload: &Payload) -> Outcome {
        Outcome::from_result(&self.name, self.charge(payload))
    }
}
