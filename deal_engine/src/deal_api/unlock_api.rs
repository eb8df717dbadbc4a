use std::{fmt::Debug, sync::Arc};

use ds_common::Paise;
use log::*;

use crate::{
    api_objects::{CreateOrderRequest, OrderDetails, VerificationResult, VerifyPaymentRequest},
    deal_api::{DealsApi, UnlockApiError},
    helpers::{affiliate_link, AffiliateIds},
    traits::{DealSource, NewPaymentOrder, PaymentGateway},
};

/// `UnlockApi` handles the two server-side steps of unlocking a deal: creating the payment order, and verifying the
/// completed payment in exchange for the deal's affiliate link.
///
/// Nothing is stored between the two steps. The order is tied to the deal through the notes attached to it at the
/// payment provider, and the payment is tied to the order through the provider's signature.
pub struct UnlockApi<G> {
    gateway: Arc<G>,
    price: Paise,
    currency: String,
    affiliate_ids: AffiliateIds,
}

impl<G> Debug for UnlockApi<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnlockApi ({} {})", self.price, self.currency)
    }
}

impl<G> Clone for UnlockApi<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            price: self.price,
            currency: self.currency.clone(),
            affiliate_ids: self.affiliate_ids.clone(),
        }
    }
}

impl<G> UnlockApi<G> {
    pub fn new<S: Into<String>>(gateway: G, price: Paise, currency: S, affiliate_ids: AffiliateIds) -> Self {
        Self { gateway: Arc::new(gateway), price, currency: currency.into(), affiliate_ids }
    }

    pub fn price(&self) -> Paise {
        self.price
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

impl<G> UnlockApi<G>
where G: PaymentGateway
{
    /// Creates a payment order for the unlock price. The deal id and platform travel with the order as notes so that
    /// the provider's dashboard shows what was bought.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderDetails, UnlockApiError> {
        if request.deal_id.as_str().trim().is_empty() {
            return Err(UnlockApiError::MissingDealReference);
        }
        let order = NewPaymentOrder::new(self.price, self.currency.as_str())
            .with_note("deal_id", request.deal_id.as_str())
            .with_note("platform", request.platform.as_str());
        let order = self.gateway.create_order(order).await.map_err(|e| {
            error!("💳️ Could not create an order for deal {} on {}. {e}", request.deal_id, request.platform);
            UnlockApiError::from(e)
        })?;
        info!("💳️ Created order {} ({}) for deal {} on {}", order.id, order.amount, request.deal_id, request.platform);
        Ok(OrderDetails { key: self.gateway.key_id(), amount: order.amount, currency: order.currency, order_id: order.id })
    }

    /// Checks the payment signature and, if it is genuine, releases the deal's affiliate link.
    ///
    /// The signature is checked before anything else, so an invalid payment learns nothing about the deal.
    pub async fn verify_payment<S: DealSource>(
        &self,
        request: &VerifyPaymentRequest,
        deals: &DealsApi<S>,
    ) -> Result<VerificationResult, UnlockApiError> {
        self.gateway.verify_signature(&request.order_id, &request.payment_id, &request.signature).map_err(|e| {
            warn!("💳️ Payment {} for order {} failed verification. {e}", request.payment_id, request.order_id);
            UnlockApiError::from(e)
        })?;
        let not_found = || UnlockApiError::DealNotFound { deal_id: request.deal_id.clone(), platform: request.platform };
        let deal = deals
            .find_deal(request.platform, &request.deal_id)
            .await
            .map_err(|e| {
                warn!("💳️ Could not look up deal {} after payment {}. {e}", request.deal_id, request.payment_id);
                not_found()
            })?
            .ok_or_else(not_found)?;
        let url = deal.url.as_deref().ok_or_else(|| UnlockApiError::NoProductLink(deal.id.clone()))?;
        let link = affiliate_link(url, deal.platform, &self.affiliate_ids);
        info!("💳️ Payment {} verified. Deal {} on {} unlocked.", request.payment_id, deal.id, deal.platform);
        Ok(VerificationResult::unlocked(link, deal.title))
    }
}
