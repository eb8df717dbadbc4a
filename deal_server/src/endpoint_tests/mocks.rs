use deal_engine::{
    deal_types::{Deal, Platform},
    helpers::PaymentSignatureError,
    traits::{DealSource, DealSourceError, NewPaymentOrder, PaymentGateway, PaymentGatewayError, PaymentOrder},
};
use mockall::mock;

mock! {
    pub Catalogue {}
    impl DealSource for Catalogue {
        async fn fetch_deals(&self, platform: Platform) -> Result<Vec<Deal>, DealSourceError>;
    }
}

mock! {
    pub Gateway {}
    impl PaymentGateway for Gateway {
        fn key_id(&self) -> String;
        async fn create_order(&self, order: NewPaymentOrder) -> Result<PaymentOrder, PaymentGatewayError>;
        fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> Result<(), PaymentSignatureError>;
    }
}
