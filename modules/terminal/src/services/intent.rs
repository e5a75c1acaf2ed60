use crate::services::amount_entry::PendingAmount;
use crate::services::payload;
use payment_gateway::{GatewayError, PaymentGateway};
use thiserror::Error;
use url::Url;

/// A registered payment awaiting payer action
///
/// Immutable once created; discarded when the merchant resets the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub amount: String,
    pub currency: String,
    pub recipient: Option<String>,
    pub payment_id: Option<i64>,
    pub qr_payload: String,
}

/// Errors raised while creating a payment intent
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Register the keyed-in amount with the active gateway and build the QR payload
///
/// A gateway failure is surfaced as a blocking error; there is no retry.
pub async fn create_intent(
    gateway: &dyn PaymentGateway,
    origin: &Url,
    currency: &str,
    pending: PendingAmount,
    recipient: Option<String>,
) -> Result<PaymentIntent, IntentError> {
    if pending.is_zero() {
        return Err(IntentError::ZeroAmount);
    }

    let amount = pending.display();
    let created = gateway.create_intent(&amount, currency).await?;

    let qr_payload =
        payload::payment_url(origin, &amount, recipient.as_deref(), created.payment_id);

    tracing::info!(
        amount = %amount,
        currency = %currency,
        payment_id = ?created.payment_id,
        "Payment intent created"
    );

    Ok(PaymentIntent {
        amount,
        currency: currency.to_string(),
        recipient,
        payment_id: created.payment_id,
        qr_payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::amount_entry::Key;
    use payment_gateway::LocalGateway;

    fn keyed(keys: &str) -> PendingAmount {
        let mut amount = PendingAmount::new();
        for c in keys.chars() {
            amount.press(Key::parse(&c.to_string()).unwrap()).unwrap();
        }
        amount
    }

    fn origin() -> Url {
        Url::parse("http://localhost:8080").unwrap()
    }

    #[tokio::test]
    async fn test_zero_amount_is_rejected() {
        let gateway = LocalGateway::new();
        let result =
            create_intent(&gateway, &origin(), "USD", PendingAmount::new(), None).await;

        assert!(matches!(result, Err(IntentError::ZeroAmount)));
    }

    #[tokio::test]
    async fn test_local_intent_embeds_amount_in_payload() {
        let gateway = LocalGateway::new();
        let intent = create_intent(&gateway, &origin(), "USD", keyed("500"), None)
            .await
            .unwrap();

        assert_eq!(intent.amount, "5.00");
        assert_eq!(intent.payment_id, None);
        assert_eq!(intent.qr_payload, "http://localhost:8080/pay?amount=5.00");
    }

    #[tokio::test]
    async fn test_recipient_rides_in_payload() {
        let gateway = LocalGateway::new();
        let intent = create_intent(
            &gateway,
            &origin(),
            "USD",
            keyed("1250"),
            Some("Acme".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(
            intent.qr_payload,
            "http://localhost:8080/pay?amount=12.50&recipient=Acme"
        );
    }
}
