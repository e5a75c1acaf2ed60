use crate::services::intent::PaymentIntent;
use crate::services::receipt::Receipt;
use crate::validation::CardInputErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// REQUESTS
// ============================================================================

/// Body of POST /api/auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of POST /api/terminal/keypad
#[derive(Debug, Clone, Deserialize)]
pub struct KeypadRequest {
    pub key: String,
}

/// Body of POST /api/terminal/payments
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    #[serde(default)]
    pub recipient: Option<String>,
}

/// Card fields of POST /api/pay/card
#[derive(Debug, Clone, Deserialize)]
pub struct CardForm {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of POST /api/pay/card
#[derive(Debug, Clone, Deserialize)]
pub struct PayCardRequest {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub payment_id: Option<i64>,
    pub card: CardForm,
}

/// Body of POST /api/pay/wallet, the digital-wallet shortcut
#[derive(Debug, Clone, Deserialize)]
pub struct PayWalletRequest {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub payment_id: Option<i64>,
}

/// Query of GET /api/status
#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token_type: &'static str,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct AmountResponse {
    pub amount_cents: u64,
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct IntentResponse {
    pub amount: String,
    pub currency: String,
    pub recipient: Option<String>,
    pub payment_id: Option<i64>,
    pub qr_payload: String,
}

impl From<&PaymentIntent> for IntentResponse {
    fn from(intent: &PaymentIntent) -> Self {
        IntentResponse {
            amount: intent.amount.clone(),
            currency: intent.currency.clone(),
            recipient: intent.recipient.clone(),
            payment_id: intent.payment_id,
            qr_payload: intent.qr_payload.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionStatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SettlementResponse {
    pub status: &'static str,
    pub steps: Vec<&'static str>,
}

/// Outcome of a payer-side payment submission
#[derive(Debug, Serialize)]
pub struct PaymentOutcome {
    pub result: &'static str,
    pub redirect: String,
}

/// Pre-filled card fields returned by the scan sub-flow
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub card_number: String,
    pub expiry: String,
}

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    pub recipient: String,
    pub reference: String,
    pub date: String,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        ReceiptResponse {
            result: if receipt.success { "success" } else { "failure" },
            amount: receipt.amount,
            recipient: receipt.recipient,
            reference: receipt.reference,
            date: receipt.date,
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Per-field validation errors, cumulative
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: BTreeMap<&'static str, &'static str>,
}

impl From<&CardInputErrors> for ValidationErrorResponse {
    fn from(errors: &CardInputErrors) -> Self {
        ValidationErrorResponse {
            errors: errors
                .iter()
                .map(|(field, message)| (field.as_str(), message))
                .collect(),
        }
    }
}

/// Error response wrapper for proper HTTP error handling
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
