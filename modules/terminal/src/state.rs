use crate::config::Config;
use crate::services::clock::Clock;
use crate::session::SessionStore;
use payment_gateway::{CardRecognizer, PaymentGateway};
use std::sync::Arc;

/// Shared application state for the terminal service
///
/// The gateway, recognizer, and clock are capability seams: production wires
/// the Impaya client and the tokio clock, tests substitute fakes.
pub struct AppState {
    pub config: Config,
    pub gateway: Arc<dyn PaymentGateway>,
    pub recognizer: Option<Arc<dyn CardRecognizer>>,
    pub clock: Arc<dyn Clock>,
    pub sessions: SessionStore,
}
