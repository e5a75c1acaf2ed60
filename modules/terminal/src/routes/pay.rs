//! Payer-side routes
//!
//! Card capture with format-on-arrival transforms, the digital-wallet
//! shortcut, and the optional card-scan sub-flow. The payer reaches these via
//! the QR URL, so no session is required; amount, recipient, and paymentId
//! arrive with the request exactly as the URL carried them.

use crate::models::{
    ApiError, PayCardRequest, PayWalletRequest, PaymentOutcome, ScanResponse,
    ValidationErrorResponse,
};
use crate::services::payload;
use crate::state::AppState;
use crate::validation::{self, CardInput, CurrentMonth};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

/// Simulated card-processor latency
const PROCESSOR_DELAY: Duration = Duration::from_millis(2000);

/// POST /api/pay/card - validate card details and settle
///
/// Validation errors answer 422 with the cumulative per-field map. A valid
/// submission waits out the simulated processor delay and hands back the
/// status-screen redirect; the simulated path always succeeds.
pub async fn pay_with_card(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PayCardRequest>,
) -> Result<Response, ApiError> {
    // Same transforms the payer screen applies while typing
    let input = CardInput {
        card_number: validation::format_card_number(&req.card.card_number),
        expiry: validation::format_expiry(&req.card.expiry),
        cvv: validation::format_cvv(&req.card.cvv),
        name: req.card.name.clone(),
    };

    let today = CurrentMonth::from_datetime(&Utc::now());
    let errors = validation::validate_card_input(&input, today);
    if !errors.is_valid() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorResponse::from(&errors)),
        )
            .into_response());
    }

    tracing::info!(payment_id = ?req.payment_id, "Card accepted, simulating processor");
    state.clock.sleep(PROCESSOR_DELAY).await;

    Ok(Json(success_outcome(&state, req.amount, req.recipient)).into_response())
}

/// POST /api/pay/wallet - digital-wallet shortcut
///
/// Bypasses card validation entirely and goes straight to the simulated
/// success path.
pub async fn pay_with_wallet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PayWalletRequest>,
) -> Json<PaymentOutcome> {
    tracing::info!(payment_id = ?req.payment_id, "Wallet tap, simulating processor");
    state.clock.sleep(PROCESSOR_DELAY).await;

    Json(success_outcome(&state, req.amount, req.recipient))
}

/// POST /api/pay/scan - pre-fill card fields from a card photo
///
/// Any recognizer failure is non-fatal: the payer keeps whatever was already
/// typed and sees an inline error instead.
pub async fn scan_card(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ScanResponse>, ApiError> {
    let recognizer = state.recognizer.as_ref().ok_or_else(|| {
        ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Card scan is not configured")
    })?;

    if body.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "No image provided"));
    }

    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg");

    let card = recognizer.recognize(&body, mime).await.map_err(|e| {
        tracing::warn!(error = %e, "Card recognition failed");
        ApiError::new(StatusCode::BAD_GATEWAY, format!("Could not read the card: {}", e))
    })?;

    Ok(Json(ScanResponse {
        card_number: validation::format_card_number(&card.number),
        expiry: validation::format_expiry(&card.exp_date),
    }))
}

fn success_outcome(
    state: &AppState,
    amount: Option<String>,
    recipient: Option<String>,
) -> PaymentOutcome {
    // The payer screen falls back to 0.00 when the URL carried no amount
    // (the backend-registered variant)
    let amount = amount.unwrap_or_else(|| "0.00".to_string());
    let redirect = payload::status_url(
        &state.config.public_origin,
        "success",
        &amount,
        recipient.as_deref(),
    );

    PaymentOutcome {
        result: "success",
        redirect,
    }
}
