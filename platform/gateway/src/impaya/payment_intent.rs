use super::ImpayaClient;
use crate::error::GatewayError;
use crate::types::InitEnvelope;
use crate::{CreatedIntent, PaymentGateway};
use async_trait::async_trait;

impl ImpayaClient {
    /// Register a payment intent and return the provider-issued identifier
    ///
    /// The Impaya API takes the amount and currency as query parameters and
    /// answers with `{ "data": { "paymentId": <number> } }`.
    pub async fn create_payment_intent(
        &self,
        amount: &str,
        currency: &str,
    ) -> Result<i64, GatewayError> {
        let params = [("amount", amount), ("currency", currency)];

        let token = self.config().api_key.clone();
        let envelope: InitEnvelope = self.post_query("/payment/init", &token, &params).await?;

        tracing::info!(
            payment_id = envelope.data.payment_id,
            amount = %amount,
            currency = %currency,
            "Payment intent registered with Impaya"
        );

        Ok(envelope.data.payment_id)
    }
}

#[async_trait]
impl PaymentGateway for ImpayaClient {
    async fn create_intent(
        &self,
        amount: &str,
        currency: &str,
    ) -> Result<CreatedIntent, GatewayError> {
        let payment_id = self.create_payment_intent(amount, currency).await?;
        Ok(CreatedIntent {
            payment_id: Some(payment_id),
        })
    }
}
