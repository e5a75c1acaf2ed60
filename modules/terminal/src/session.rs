//! Merchant sessions
//!
//! The mocked browser-local authentication flag is modelled as an explicit
//! session object: login issues an opaque bearer token, merchant-side routes
//! resolve it through middleware, and the session entry owns the transient
//! per-terminal state (pending amount, intent, status). Nothing survives the
//! process.

use crate::services::amount_entry::PendingAmount;
use crate::services::intent::PaymentIntent;
use crate::services::settlement::TransactionStatus;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// An authenticated merchant terminal
#[derive(Debug, Clone)]
pub struct MerchantSession {
    pub token: String,
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Transient state of one terminal screen, discarded on reset
#[derive(Debug, Default)]
pub struct TerminalState {
    pub pending: PendingAmount,
    pub intent: Option<PaymentIntent>,
    pub status: TransactionStatus,
}

impl TerminalState {
    /// Start a fresh payment: clear amount, intent, and status
    pub fn reset(&mut self) {
        self.pending.clear();
        self.intent = None;
        self.status = TransactionStatus::Idle;
    }
}

struct SessionEntry {
    session: MerchantSession,
    terminal: TerminalState,
}

/// In-memory session registry keyed by bearer token
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session for a signed-in merchant
    pub async fn create(&self, email: &str) -> MerchantSession {
        let session = MerchantSession {
            token: Uuid::new_v4().to_string(),
            email: email.to_string(),
            signed_in_at: Utc::now(),
        };

        let entry = SessionEntry {
            session: session.clone(),
            terminal: TerminalState::default(),
        };
        self.inner.write().await.insert(session.token.clone(), entry);

        session
    }

    /// Look up a session by its bearer token
    pub async fn get(&self, token: &str) -> Option<MerchantSession> {
        self.inner
            .read()
            .await
            .get(token)
            .map(|entry| entry.session.clone())
    }

    /// Run `f` against the terminal state owned by `token`'s session
    ///
    /// Returns `None` when the token is unknown. The lock is held only for
    /// the duration of `f`; callers must not block inside it.
    pub async fn with_terminal<R>(
        &self,
        token: &str,
        f: impl FnOnce(&mut TerminalState) -> R,
    ) -> Option<R> {
        let mut guard = self.inner.write().await;
        guard.get_mut(token).map(|entry| f(&mut entry.terminal))
    }
}

/// Require a merchant session on the wrapped routes
///
/// A missing or unknown token answers 401 with a login hint, the API-level
/// rendition of the entry screen's hard redirect to the login page.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let session = match bearer_token(req.headers()) {
        Some(token) => state.sessions.get(token).await,
        None => None,
    };

    match session {
        Some(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "merchant authentication required",
                "login": "/api/auth/login"
            })),
        )
            .into_response(),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
