pub mod payment_intent;
pub mod recognize;

use crate::error::GatewayError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the Impaya API client
#[derive(Debug, Clone)]
pub struct ImpayaConfig {
    pub api_key: String,
    pub recognizer_key: String,
    pub base_path: String,
}

impl ImpayaConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, GatewayError> {
        let api_key = std::env::var("IMPAYA_API_KEY")
            .map_err(|_| GatewayError::ConfigError("Missing IMPAYA_API_KEY".to_string()))?;
        let recognizer_key = std::env::var("IMPAYA_RECOGNIZER_KEY")
            .map_err(|_| GatewayError::ConfigError("Missing IMPAYA_RECOGNIZER_KEY".to_string()))?;

        let base_path = std::env::var("IMPAYA_BASE_PATH")
            .unwrap_or_else(|_| "https://qr.impaya.online/api/v1".to_string());

        Ok(ImpayaConfig {
            api_key,
            recognizer_key,
            base_path,
        })
    }
}

/// Main Impaya API client
#[derive(Clone)]
pub struct ImpayaClient {
    config: Arc<ImpayaConfig>,
    http_client: Client,
}

impl ImpayaClient {
    /// Create a new Impaya client with the given configuration
    pub fn new(config: ImpayaConfig) -> Result<Self, GatewayError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GatewayError::HttpError(e.to_string()))?;

        Ok(ImpayaClient {
            config: Arc::new(config),
            http_client,
        })
    }

    /// Create a new Impaya client from environment variables
    pub fn from_env() -> Result<Self, GatewayError> {
        let config = ImpayaConfig::from_env()?;
        Self::new(config)
    }

    /// Make a POST request carrying query parameters and no body
    pub(crate) async fn post_query<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        params: &[(&str, &str)],
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.config.base_path, path);
        let response = self.http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .query(params)
            .send()
            .await
            .map_err(|e| GatewayError::HttpError(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body
    pub(crate) async fn post_json<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.config.base_path, path);
        let response = self.http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::HttpError(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Handle HTTP response and convert to appropriate type or error
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await
                .map_err(|e| GatewayError::ParseError(e.to_string()))
        } else {
            let error_body = response.text().await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            Err(GatewayError::ApiError {
                status_code: status.as_u16(),
                message: error_body,
            })
        }
    }

    /// Access the config
    pub fn config(&self) -> &ImpayaConfig {
        &self.config
    }
}
