//! Primitives shared by every DealStream crate.
mod paise;
mod secret;

pub mod helpers;

pub use paise::{Paise, PaiseConversionError, INR_CURRENCY_CODE};
pub use secret::Secret;
