use crate::models::{ApiError, LoginRequest, TokenResponse};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use std::time::Duration;

/// Simulated credential-check latency
const LOGIN_DELAY: Duration = Duration::from_millis(1000);

/// POST /api/auth/login - mock sign-in issuing a terminal session
///
/// Demo authentication: any non-empty credentials are accepted after a
/// simulated delay. The issued bearer token gates the merchant routes.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "email and password are required",
        ));
    }

    state.clock.sleep(LOGIN_DELAY).await;

    let session = state.sessions.create(&req.email.to_lowercase()).await;

    tracing::info!(email = %session.email, "Merchant signed in");

    Ok(Json(TokenResponse {
        token_type: "Bearer",
        token: session.token,
    }))
}
