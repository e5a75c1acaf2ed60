pub mod auth;
pub mod pay;
pub mod status;
pub mod terminal;

use crate::health::health;
use crate::session;
use crate::state::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the application router
///
/// Merchant-side routes sit behind the session middleware; payer-side routes
/// are reached via the QR URL and carry everything they need in the request.
pub fn router(state: Arc<AppState>) -> Router {
    let merchant = Router::new()
        .route("/api/terminal/keypad", post(terminal::press_key))
        .route("/api/terminal/amount", get(terminal::get_amount))
        .route("/api/terminal/payments", post(terminal::create_payment))
        .route("/api/terminal/settle", post(terminal::settle))
        .route("/api/terminal/status", get(terminal::get_status))
        .route("/api/terminal/reset", post(terminal::reset))
        .layer(from_fn_with_state(state.clone(), session::require_session));

    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/pay/card", post(pay::pay_with_card))
        .route("/api/pay/wallet", post(pay::pay_with_wallet))
        .route("/api/pay/scan", post(pay::scan_card))
        .route("/api/status", get(status::get_receipt))
        .merge(merchant)
        .with_state(state)
}
