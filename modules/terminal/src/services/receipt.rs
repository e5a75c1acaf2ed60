use chrono::Utc;
use rand::Rng;

/// Read-only receipt view derived from the status hand-off URL
///
/// The reference number is generated once per render and is display-only:
/// neither unique nor verifiable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub success: bool,
    pub amount: Option<String>,
    pub recipient: String,
    pub reference: String,
    pub date: String,
}

/// Generate a display-only transaction reference, e.g. "TXN-482913"
pub fn new_reference() -> String {
    format!("TXN-{}", rand::thread_rng().gen_range(0..1_000_000))
}

/// Build a receipt from the status-screen query parameters
///
/// Anything other than `result=success` renders as a failure; the recipient
/// falls back to "Merchant" when absent.
pub fn build_receipt(
    result: Option<&str>,
    amount: Option<&str>,
    recipient: Option<&str>,
) -> Receipt {
    let success = result == Some("success");

    Receipt {
        success,
        amount: amount.map(|a| format!("${}", a)),
        recipient: recipient
            .filter(|r| !r.trim().is_empty())
            .unwrap_or("Merchant")
            .to_string(),
        reference: new_reference(),
        date: Utc::now().format("%Y-%m-%d").to_string(),
    }
}
