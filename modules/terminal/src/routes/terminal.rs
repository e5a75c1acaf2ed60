//! Merchant terminal routes
//!
//! Amount entry, QR generation, simulated settlement, and reset. All routes
//! here sit behind the session middleware.

use crate::models::{
    AmountResponse, ApiError, CreatePaymentRequest, IntentResponse, KeypadRequest, OkResponse,
    SettlementResponse, TransactionStatusResponse,
};
use crate::services::amount_entry::Key;
use crate::services::intent::{self, IntentError};
use crate::services::settlement::{self, SettlementError};
use crate::session::MerchantSession;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Extension, Json};
use std::sync::Arc;

fn unknown_session() -> ApiError {
    ApiError::new(StatusCode::UNAUTHORIZED, "Unknown terminal session")
}

/// POST /api/terminal/keypad - apply one keystroke to the pending amount
pub async fn press_key(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<MerchantSession>,
    Json(req): Json<KeypadRequest>,
) -> Result<Json<AmountResponse>, ApiError> {
    let key = Key::parse(&req.key)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;

    let pressed = state
        .sessions
        .with_terminal(&session.token, |terminal| {
            terminal
                .pending
                .press(key)
                .map(|_| (terminal.pending.cents(), terminal.pending.display()))
        })
        .await
        .ok_or_else(unknown_session)?;

    let (amount_cents, display) =
        pressed.map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(Json(AmountResponse {
        amount_cents,
        display,
    }))
}

/// GET /api/terminal/amount - current pending amount
pub async fn get_amount(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<MerchantSession>,
) -> Result<Json<AmountResponse>, ApiError> {
    let (amount_cents, display) = state
        .sessions
        .with_terminal(&session.token, |terminal| {
            (terminal.pending.cents(), terminal.pending.display())
        })
        .await
        .ok_or_else(unknown_session)?;

    Ok(Json(AmountResponse {
        amount_cents,
        display,
    }))
}

/// POST /api/terminal/payments - submit the keyed-in amount
///
/// Registers the intent with the active gateway and answers with the QR
/// payload. A gateway failure is a blocking 502; there is no retry.
pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<MerchantSession>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<IntentResponse>), ApiError> {
    let already_active = || {
        ApiError::new(
            StatusCode::CONFLICT,
            "A payment is already active; reset the terminal first",
        )
    };

    // Snapshot the keyed-in amount; one intent at a time per terminal
    let pending = state
        .sessions
        .with_terminal(&session.token, |terminal| {
            if terminal.intent.is_some() {
                None
            } else {
                Some(terminal.pending)
            }
        })
        .await
        .ok_or_else(unknown_session)?
        .ok_or_else(already_active)?;

    let intent = intent::create_intent(
        state.gateway.as_ref(),
        &state.config.public_origin,
        &state.config.currency,
        pending,
        req.recipient,
    )
    .await
    .map_err(|e| match e {
        IntentError::ZeroAmount => ApiError::new(StatusCode::BAD_REQUEST, e.to_string()),
        IntentError::Gateway(gateway_error) => {
            tracing::error!(error = %gateway_error, "Payment intent creation failed");
            ApiError::new(
                StatusCode::BAD_GATEWAY,
                format!("Failed to create payment: {}", gateway_error),
            )
        }
    })?;

    let response = IntentResponse::from(&intent);

    // Re-check before storing: a concurrent submit may have won the race
    let stored = state
        .sessions
        .with_terminal(&session.token, |terminal| {
            if terminal.intent.is_some() {
                false
            } else {
                terminal.intent = Some(intent);
                true
            }
        })
        .await
        .ok_or_else(unknown_session)?;

    if !stored {
        return Err(already_active());
    }

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/terminal/settle - drive the simulated settlement sequence
pub async fn settle(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<MerchantSession>,
) -> Result<Json<SettlementResponse>, ApiError> {
    let steps = settlement::run_settlement(&state.sessions, &session.token, state.clock.as_ref())
        .await
        .map_err(|e| match e {
            SettlementError::UnknownSession => {
                ApiError::new(StatusCode::UNAUTHORIZED, e.to_string())
            }
            SettlementError::NoActivePayment
            | SettlementError::InFlight
            | SettlementError::AlreadySettled => {
                ApiError::new(StatusCode::CONFLICT, e.to_string())
            }
        })?;

    Ok(Json(SettlementResponse {
        status: "success",
        steps,
    }))
}

/// GET /api/terminal/status - current transaction state of this terminal
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<MerchantSession>,
) -> Result<Json<TransactionStatusResponse>, ApiError> {
    let status = state
        .sessions
        .with_terminal(&session.token, |terminal| terminal.status)
        .await
        .ok_or_else(unknown_session)?;

    Ok(Json(TransactionStatusResponse {
        status: status.as_str(),
        message: status.message(),
    }))
}

/// POST /api/terminal/reset - start a fresh payment
pub async fn reset(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<MerchantSession>,
) -> Result<Json<OkResponse>, ApiError> {
    state
        .sessions
        .with_terminal(&session.token, |terminal| terminal.reset())
        .await
        .ok_or_else(unknown_session)?;

    tracing::info!("Terminal reset for a new payment");

    Ok(Json(OkResponse { ok: true }))
}
