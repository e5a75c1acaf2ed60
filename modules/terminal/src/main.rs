use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use payment_gateway::{CardRecognizer, ImpayaClient, LocalGateway, PaymentGateway};
use terminal_rs::{
    config::Config,
    router,
    services::clock::SystemClock,
    session::SessionStore,
    state::AppState,
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!("Starting terminal service...");

    // Load configuration from environment
    let config = Config::from_env()
        .expect("Failed to load configuration from environment");

    tracing::info!(
        "Configuration loaded: host={}, port={}, intent_mode={}",
        config.host,
        config.port,
        config.intent_mode
    );

    // Select the payment gateway
    let gateway: Arc<dyn PaymentGateway> = match config.intent_mode.to_lowercase().as_str() {
        "local" => {
            tracing::info!("Using local payment intents (amount encoded in QR URL)");
            Arc::new(LocalGateway::new())
        }
        "remote" => {
            tracing::info!("Using Impaya payment intents");
            let client = ImpayaClient::from_env()
                .expect("Failed to configure Impaya client");
            Arc::new(client)
        }
        _ => panic!(
            "Invalid INTENT_MODE: {}. Must be 'local' or 'remote'",
            config.intent_mode
        ),
    };

    // Card recognition is optional; enabled whenever Impaya credentials exist
    let recognizer: Option<Arc<dyn CardRecognizer>> = match ImpayaClient::from_env() {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!("Card scan disabled: {}", e);
            None
        }
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        gateway,
        recognizer,
        clock: Arc::new(SystemClock::new()),
        sessions: SessionStore::new(),
    });

    // Build the application router
    let app = router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(TraceLayer::new_for_http());

    // Bind to the configured address
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Terminal service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    // Start the server
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
