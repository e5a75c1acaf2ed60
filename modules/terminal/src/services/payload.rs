//! Hand-off URL construction
//!
//! The QR payload and the status redirect are the only channels between the
//! three screens; everything they need rides in query parameters.

use url::Url;

/// Build the payment URL encoded into the merchant QR code
///
/// With a backend-issued identifier only the opaque id is embedded (the
/// backend already recorded the amount); otherwise the decimal amount and
/// optional recipient ride in the URL.
pub fn payment_url(
    origin: &Url,
    amount: &str,
    recipient: Option<&str>,
    payment_id: Option<i64>,
) -> String {
    let mut url = origin.clone();
    url.set_path("/pay");

    {
        let mut query = url.query_pairs_mut();
        match payment_id {
            Some(id) => {
                query.append_pair("paymentId", &id.to_string());
            }
            None => {
                query.append_pair("amount", amount);
                if let Some(recipient) = recipient {
                    query.append_pair("recipient", recipient);
                }
            }
        }
    }

    url.to_string()
}

/// Build the status-screen URL the payer is redirected to after settlement
pub fn status_url(origin: &Url, result: &str, amount: &str, recipient: Option<&str>) -> String {
    let mut url = origin.clone();
    url.set_path("/status");

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("result", result);
        query.append_pair("amount", amount);
        if let Some(recipient) = recipient {
            query.append_pair("recipient", recipient);
        }
    }

    url.to_string()
}
