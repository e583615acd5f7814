//! Standard units.
//!
//! Leaf capabilities that perform real effects through injected
//! collaborators:
//!
//! - [`notify`]: message delivery over email, SMS and Slack
//! - [`payment`]: adapters over two incompatible payment backends
//! - [`query`]: command scripts against a query executor

pub mod notify;
pub mod payment;
pub mod query;

pub use notify::{Channels, Notifier, notification_chain};
pub use payment::{
    LegacyGatewayAdapter, LegacyPayments, SinkLegacyGateway, SinkTransactionService,
    TransactionService, TransactionServiceAdapter,
};
pub use query::{QueryError, QueryExecutor, QueryUnit, Row};
