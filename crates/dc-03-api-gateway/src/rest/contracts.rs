use super::AppState;
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::types::{AddContractRequest, ContractResponse, InvokeResponse};
use crate::middleware::{RequestKind, RequestTimer};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::Json;
use tracing::{info, warn};

/// `POST /addContract`
pub(super) async fn add_contract(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<InvokeResponse>> {
    let timer = RequestTimer::new(state.metrics.clone(), RequestKind::Invoke);
    let result = invoke_add_contract(&state, body).await;
    timer.finish(result.is_ok());
    result.map(Json)
}

async fn invoke_add_contract(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<InvokeResponse> {
    let body = body.map_err(|r| ApiError::new(r.status(), r.body_text()))?;
    let args = AddContractRequest::parse(&body)?.into_args()?;
    let key = args[0].clone();

    match state.api.invoke("addContract", args).await {
        Ok(receipt) => {
            info!(
                key = %key,
                tx_id = %receipt.tx_id.short(),
                block = receipt.block_number,
                "Contract added"
            );
            Ok(InvokeResponse {
                success: receipt.message.clone(),
                payload: receipt.payload_text(),
            })
        }
        Err(e) => {
            warn!(key = %key, error = %e, "addContract failed");
            Err(e.into())
        }
    }
}

/// `GET /contracts/:key`
pub(super) async fn get_contract(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<ContractResponse>> {
    let timer = RequestTimer::new(state.metrics.clone(), RequestKind::Query);
    let result = state.api.query("getContract", vec![key.clone()]).await;
    timer.finish(result.is_ok());

    let result = result.map_err(|e| {
        warn!(key = %key, error = %e, "getContract failed");
        ApiError::from(e)
    })?;
    Ok(Json(ContractResponse::from_payload(key, &result.payload)))
}
