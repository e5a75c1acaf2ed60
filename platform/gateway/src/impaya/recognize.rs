use super::ImpayaClient;
use crate::error::GatewayError;
use crate::types::{RecognizeEnvelope, RecognizeRequest};
use crate::{CardRecognizer, RecognizedCard};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encode raw image bytes as the data URL the recognition endpoint expects
pub fn data_url(image: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(image))
}

impl ImpayaClient {
    /// Submit a card photo for recognition and return the extracted fields
    ///
    /// The recognizer answers `{ "data": { "card": { "number", "expDate" } } }`.
    /// Transport and parse failures come back as `GatewayError`; callers treat
    /// them as non-fatal and leave any previously entered fields untouched.
    pub async fn recognize_card(
        &self,
        image: &[u8],
        mime: &str,
    ) -> Result<RecognizedCard, GatewayError> {
        let request = RecognizeRequest {
            file: data_url(image, mime),
            model: "gemini".to_string(),
        };

        let token = self.config().recognizer_key.clone();
        let envelope: RecognizeEnvelope = self.post_json("/bill/recognize", &token, &request).await?;

        tracing::info!(bytes = image.len(), "Card photo recognized");

        Ok(RecognizedCard {
            number: envelope.data.card.number,
            exp_date: envelope.data.card.exp_date,
        })
    }
}

#[async_trait]
impl CardRecognizer for ImpayaClient {
    async fn recognize(&self, image: &[u8], mime: &str) -> Result<RecognizedCard, GatewayError> {
        self.recognize_card(image, mime).await
    }
}
