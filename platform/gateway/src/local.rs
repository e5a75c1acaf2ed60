use crate::error::GatewayError;
use crate::{CreatedIntent, PaymentGateway};
use async_trait::async_trait;

/// Local-only gateway for the no-backend variant
///
/// Issues no provider identifier; the terminal encodes the amount (and
/// optional recipient) directly into the generated payment URL instead.
#[derive(Debug, Default)]
pub struct LocalGateway;

impl LocalGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGateway for LocalGateway {
    async fn create_intent(
        &self,
        amount: &str,
        currency: &str,
    ) -> Result<CreatedIntent, GatewayError> {
        tracing::debug!(amount = %amount, currency = %currency, "Local intent, no backend registration");
        Ok(CreatedIntent { payment_id: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_gateway_issues_no_payment_id() {
        let gateway = LocalGateway::new();
        let intent = gateway.create_intent("5.00", "USD").await.unwrap();
        assert_eq!(intent.payment_id, None);
    }
}
