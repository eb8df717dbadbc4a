//! # Payment signatures
//!
//! When the checkout widget completes a payment, the payment provider hands the browser a signature that proves the
//! payment id belongs to the order we created. The signature is an HMAC-SHA256 over
//!
//! ```text
//!    {order_id}|{payment_id}
//! ```
//!
//! keyed with the merchant's API key secret, and encoded as lowercase hex. Only the server knows the key secret, so
//! only the server can check the signature.
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentSignatureError {
    #[error("The payment signature is not valid hex")]
    Malformed,
    #[error("The payment signature does not match the order and payment ids")]
    Mismatch,
}

fn mac_for(secret: &str, order_id: &str, payment_id: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take a key of any size");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac
}

/// Produces the signature the payment provider would issue for this order and payment.
pub fn sign_payment(secret: &str, order_id: &str, payment_id: &str) -> String {
    hex::encode(mac_for(secret, order_id, payment_id).finalize().into_bytes())
}

/// Checks `signature` against the order and payment ids. The comparison runs in constant time.
pub fn verify_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<(), PaymentSignatureError> {
    let expected = hex::decode(signature.trim()).map_err(|_| PaymentSignatureError::Malformed)?;
    mac_for(secret, order_id, payment_id).verify_slice(&expected).map_err(|_| PaymentSignatureError::Mismatch)
}
