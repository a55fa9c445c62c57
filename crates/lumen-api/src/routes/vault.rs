//! Vault passkey endpoint.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use lumen_vault::{PasskeyCheck, VaultArea};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

/// Body of a successful check.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    /// Always `true`.
    pub success: bool,
    /// Where the client should navigate.
    pub path: String,
    /// The unlocked area.
    pub page: VaultArea,
}

/// `POST /api/vault/verify`
pub async fn verify(
    State(state): State<ApiState>,
    body: Bytes,
) -> ApiResult<Json<VerifyResponse>> {
    let passkey = extract_passkey(&body).ok_or_else(|| ApiError::bad_request("Passkey is required"))?;

    match state.vault.check(&passkey) {
        PasskeyCheck::Granted(area) => {
            tracing::info!(area = %area, "Vault passkey accepted");
            Ok(Json(VerifyResponse {
                success: true,
                path: area.path(),
                page: area,
            }))
        }
        PasskeyCheck::Denied => {
            tracing::debug!("Vault passkey rejected");
            Err(ApiError::unauthorized("Invalid passkey"))
        }
    }
}

/// The `passkey` string from a JSON object body, if present and non-empty.
fn extract_passkey(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("passkey")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}
