use crate::models::{ReceiptResponse, StatusQuery};
use crate::services::receipt;
use axum::{extract::Query, Json};

/// GET /api/status - standalone receipt screen
///
/// Stateless: success or failure is read purely from the `result` query
/// parameter and the reference number is generated once per render.
pub async fn get_receipt(Query(params): Query<StatusQuery>) -> Json<ReceiptResponse> {
    let receipt = receipt::build_receipt(
        params.result.as_deref(),
        params.amount.as_deref(),
        params.recipient.as_deref(),
    );

    Json(receipt.into())
}
