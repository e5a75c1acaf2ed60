use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Datelike, Months, Utc};
use http_body_util::BodyExt;
use payment_gateway::{
    CardRecognizer, CreatedIntent, GatewayError, LocalGateway, PaymentGateway, RecognizedCard,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use terminal_rs::config::Config;
use terminal_rs::services::clock::Clock;
use terminal_rs::session::SessionStore;
use terminal_rs::state::AppState;
use tower::ServiceExt;
use url::Url;

/// Gateway fake: configurable payment id, optional hard failure
#[derive(Debug, Default)]
pub struct FakeGateway {
    pub payment_id: Option<i64>,
    pub fail: bool,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_intent(
        &self,
        _amount: &str,
        _currency: &str,
    ) -> Result<CreatedIntent, GatewayError> {
        if self.fail {
            return Err(GatewayError::ApiError {
                status_code: 500,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(CreatedIntent {
            payment_id: self.payment_id,
        })
    }
}

/// Recognizer fake returning fixed card fields
#[derive(Debug)]
pub struct FakeRecognizer {
    pub number: String,
    pub exp_date: String,
    pub fail: bool,
}

#[async_trait]
impl CardRecognizer for FakeRecognizer {
    async fn recognize(&self, _image: &[u8], _mime: &str) -> Result<RecognizedCard, GatewayError> {
        if self.fail {
            return Err(GatewayError::ParseError("no card found".to_string()));
        }
        Ok(RecognizedCard {
            number: self.number.clone(),
            exp_date: self.exp_date.clone(),
        })
    }
}

/// Clock fake: returns immediately and records every requested delay
#[derive(Debug, Default)]
pub struct InstantClock {
    pub slept: Mutex<Vec<Duration>>,
}

#[async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_origin: Url::parse("http://localhost:8080").unwrap(),
        currency: "USD".to_string(),
        intent_mode: "local".to_string(),
    }
}

/// Build the full router with injected fakes; returns the recording clock
pub fn build_app(
    gateway: Arc<dyn PaymentGateway>,
    recognizer: Option<Arc<dyn CardRecognizer>>,
) -> (Router, Arc<InstantClock>) {
    let clock = Arc::new(InstantClock::default());

    let state = Arc::new(AppState {
        config: test_config(),
        gateway,
        recognizer,
        clock: clock.clone(),
        sessions: SessionStore::new(),
    });

    (terminal_rs::router(state), clock)
}

/// Default app: local gateway, no recognizer
pub fn app() -> Router {
    build_app(Arc::new(LocalGateway::new()), None).0
}

/// Read response body as JSON.
pub async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Build a JSON POST request, optionally with a bearer token.
pub fn post_json(uri: &str, token: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Build a GET request, optionally with a bearer token.
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder.body(Body::empty()).unwrap()
}

/// Sign in and return the session token.
pub async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            None,
            &serde_json::json!({
                "email": "merchant@example.com",
                "password": "hunter2"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    body_json(response).await["token"]
        .as_str()
        .expect("login response should carry a token")
        .to_string()
}

/// Key a digit sequence into the terminal keypad.
pub async fn key_in(app: &Router, token: &str, keys: &str) {
    for c in keys.chars() {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/terminal/keypad",
                Some(token),
                &serde_json::json!({ "key": c.to_string() }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

/// An MM/YY expiry one year in the future.
pub fn future_expiry() -> String {
    let future = Utc::now()
        .checked_add_months(Months::new(12))
        .expect("date arithmetic");

    format!("{:02}/{:02}", future.month(), future.year() % 100)
}
