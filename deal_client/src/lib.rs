//! # DealStream client
//!
//! The client side of DealStream: an HTTP client for the DealStream server and a view-controller that lists deals,
//! filters them by platform and walks the customer through unlocking a deal.
//!
//! The controller, [`DealController`], is independent of how anything is drawn or paid for. It is assembled from
//! * a [`DealBackend`], normally [`DealServerClient`],
//! * a [`PaymentWidget`], the hosted checkout, and
//! * a [`Presenter`], which receives rendering instructions.
//!
//! The `dealstream` binary wires these up for the terminal (see [`interactive`]).
pub mod api_client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod interactive;
pub mod traits;
pub mod unlock;
pub mod view;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use api_client::DealServerClient;
pub use config::{ClientConfig, UiTimings};
pub use controller::{DealController, LoadOutcome, UnlockOutcome};
pub use errors::ClientError;
pub use traits::{DealBackend, PaymentWidget, Presenter, WidgetOutcome};
