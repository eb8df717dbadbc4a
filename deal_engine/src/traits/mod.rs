//! # Backend contracts
//!
//! The deal engine does not know where deals come from or who takes the customer's money. Those are supplied by
//! backends that implement the traits in this module.
//!
//! * [`DealSource`] produces the current deals for a single platform. The server ships a source that reads a JSON
//!   catalogue; tests use an in-memory one.
//! * [`PaymentGateway`] creates orders with a hosted-checkout payment provider and checks the signatures the provider
//!   hands back when a payment completes.
mod deal_source;
mod payment_gateway;

pub use deal_source::{DealSource, DealSourceError};
pub use payment_gateway::{NewPaymentOrder, PaymentGateway, PaymentGatewayError, PaymentOrder};
