use serde::{Deserialize, Serialize};

/// Envelope wrapping every Impaya API response body
#[derive(Debug, Clone, Deserialize)]
pub struct InitEnvelope {
    pub data: InitData,
}

/// Payload of a successful `POST /payment/init`
#[derive(Debug, Clone, Deserialize)]
pub struct InitData {
    #[serde(rename = "paymentId")]
    pub payment_id: i64,
}

/// Request body for `POST /bill/recognize`
///
/// `file` carries the card photo as a base64 data URL; `model` selects the
/// recognition backend and is fixed to "gemini" by the Impaya API.
#[derive(Debug, Clone, Serialize)]
pub struct RecognizeRequest {
    pub file: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognizeEnvelope {
    pub data: RecognizeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognizeData {
    pub card: RecognizedCardWire,
}

/// Card fields as the recognizer returns them, unformatted
#[derive(Debug, Clone, Deserialize)]
pub struct RecognizedCardWire {
    pub number: String,
    #[serde(rename = "expDate")]
    pub exp_date: String,
}
