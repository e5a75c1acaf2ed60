//! # Payment Gateway Abstraction
//!
//! A platform-level abstraction for the external payment provider used by the
//! POS terminal service.
//!
//! ## Why This Lives in Tier 1
//!
//! The gateway is a **shared runtime capability**: the merchant terminal needs
//! payment-intent registration and the payer checkout needs card recognition,
//! and neither should care which concrete provider sits behind the seam.
//! Placing the traits next to their implementations allows a config-driven
//! swap between the Impaya HTTP integration and the local (URL-encoded)
//! variant, and lets tests substitute fakes.
//!
//! ## Implementations
//!
//! - **ImpayaClient**: production implementation calling the Impaya QR API
//!   (`/payment/init`, `/bill/recognize`)
//! - **LocalGateway**: local-only implementation that issues no backend
//!   identifier; the amount rides in the generated payment URL instead

pub mod error;
pub mod impaya;
pub mod local;
pub mod types;

pub use error::GatewayError;
pub use impaya::{ImpayaClient, ImpayaConfig};
pub use local::LocalGateway;

use async_trait::async_trait;
use std::fmt;

/// Outcome of registering a payment intent with the active gateway
///
/// `payment_id` is `Some` only when a backend recorded the intent and issued
/// an opaque identifier; the local variant leaves it `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIntent {
    pub payment_id: Option<i64>,
}

/// Card fields extracted from a photographed card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedCard {
    pub number: String,
    pub exp_date: String,
}

/// Registers payment intents with the payment provider
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Register a payment intent for `amount` (two-decimal string) in `currency`
    ///
    /// # Returns
    /// * `Ok(CreatedIntent)` carrying the provider-issued identifier, if any
    /// * `Err(GatewayError)` if registration failed; the caller surfaces this
    ///   as a blocking error and does not retry
    async fn create_intent(&self, amount: &str, currency: &str) -> Result<CreatedIntent, GatewayError>;
}

/// Extracts card number and expiry from a card photo
#[async_trait]
pub trait CardRecognizer: Send + Sync {
    /// Recognize card fields from raw image bytes with the given MIME type
    async fn recognize(&self, image: &[u8], mime: &str) -> Result<RecognizedCard, GatewayError>;
}

impl fmt::Debug for dyn PaymentGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PaymentGateway")
    }
}

impl fmt::Debug for dyn CardRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardRecognizer")
    }
}
