//! # Deal engine public API
//!
//! * [`DealsApi`] serves the current deals, per platform or aggregated, through the shared [`DealCache`].
//! * [`UnlockApi`] runs the server side of an unlock: it creates the payment order for a deal, and once the customer
//!   has paid, checks the provider's signature and hands back the deal's affiliate link.
//!
//! As with the backends, both APIs are constructed by handing them an implementation of the relevant trait:
//!
//! ```rust,ignore
//! let source = JsonFileDealSource::new("deals.json");
//! let deals_api = DealsApi::new(source, DealCache::default());
//! let deals = deals_api.all_deals(false).await;
//! ```
//!
//! [`DealCache`]: crate::cache::DealCache
mod deals_api;
mod errors;
mod unlock_api;

pub use deals_api::DealsApi;
pub use errors::UnlockApiError;
pub use unlock_api::UnlockApi;
