mod affiliate;
mod discount;
mod payment_signature;

pub use affiliate::{affiliate_link, AffiliateIds};
pub use discount::{calculate_discount, parse_price};
pub use payment_signature::{sign_payment, verify_payment_signature, PaymentSignatureError};
