//! Support code for the DealStream end-to-end suite: a stand-in for the Razorpay orders API and a checkout that pays
//! through it.
pub mod checkout;
pub mod fake_razorpay;
pub mod helpers;

pub use checkout::{CheckoutBehaviour, SigningCheckout};
pub use fake_razorpay::{FakeRazorpay, FakeRazorpayServer};
