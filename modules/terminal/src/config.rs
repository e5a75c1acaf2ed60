use std::env;
use url::Url;

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub public_origin: Url,
    pub currency: String,
    pub intent_mode: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "PORT must be a valid u16".to_string())?;

        // Origin baked into generated QR payloads and status hand-off URLs
        let public_origin = env::var("PUBLIC_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        let public_origin = Url::parse(&public_origin)
            .map_err(|_| "PUBLIC_ORIGIN must be a valid URL".to_string())?;

        let currency = env::var("CURRENCY")
            .unwrap_or_else(|_| "USD".to_string());

        let intent_mode = env::var("INTENT_MODE")
            .unwrap_or_else(|_| "local".to_string());

        Ok(Config {
            host,
            port,
            public_origin,
            currency,
            intent_mode,
        })
    }
}
