//! A thin client for the parts of the Razorpay REST API that DealStream uses: creating orders and reading them back.
mod api;
mod config;
mod error;

mod data_objects;

pub use api::RazorpayApi;
pub use config::RazorpayConfig;
pub use data_objects::{NewRazorpayOrder, RazorpayOrder, RazorpayOrderStatus};
pub use error::RazorpayApiError;
