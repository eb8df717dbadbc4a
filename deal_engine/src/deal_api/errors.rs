use thiserror::Error;

use crate::{
    deal_types::{DealId, Platform},
    helpers::PaymentSignatureError,
    traits::PaymentGatewayError,
};

#[derive(Debug, Clone, Error)]
pub enum UnlockApiError {
    #[error("Missing deal_id or platform")]
    MissingDealReference,
    #[error("Could not create the payment order. {0}")]
    OrderFailed(#[from] PaymentGatewayError),
    #[error("Invalid payment signature. {0}")]
    InvalidSignature(#[from] PaymentSignatureError),
    #[error("Deal {deal_id} not found on {platform}")]
    DealNotFound { deal_id: DealId, platform: Platform },
    #[error("Deal {0} has no product link")]
    NoProductLink(DealId),
}
