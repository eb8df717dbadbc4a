//! DealStream deal engine
//!
//! The deal engine holds the logic behind DealStream, a service that lists discounted products from Indian retailers
//! and charges a small fee to unlock the affiliate link of a deal. It is provider-agnostic: where deals come from and
//! who processes payments are supplied by the caller.
//!
//! The library is divided into three main sections:
//! 1. Domain and wire types ([`mod@deal_types`], [`mod@api_objects`]) and the pure helpers that operate on them:
//!    platform filtering, discount maths, affiliate links and payment-signature checks ([`mod@helpers`]).
//! 2. Backend contracts ([`mod@traits`]). A [`DealSource`] produces deals for a platform, and a [`PaymentGateway`]
//!    creates orders with a hosted-checkout payment provider. Ready-made sources live in [`mod@sources`].
//! 3. The public API ([`DealsApi`], [`UnlockApi`]). This is what the server exposes over HTTP.
pub mod api_objects;
pub mod cache;
mod deal_api;
pub mod deal_types;
pub mod filter;
pub mod helpers;
pub mod sources;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use deal_api::{DealsApi, UnlockApi, UnlockApiError};
pub use traits::{DealSource, DealSourceError, PaymentGateway, PaymentGatewayError};
