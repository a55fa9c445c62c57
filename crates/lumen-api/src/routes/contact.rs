//! Contact form endpoint.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use lumen_contact::{ContactForm, RequestMeta};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

/// Message returned for every accepted submission.
pub const THANK_YOU: &str = "Thank you for your message. We'll be in touch soon.";

/// Body of a successful submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable acknowledgment.
    pub message: &'static str,
    /// Stored record id; `null` when the write failed.
    pub id: Option<String>,
}

/// `POST /api/contact`
///
/// The body is parsed by hand: a body that is not a JSON object is an
/// unexpected failure (500), while a well-formed object with bad fields is
/// a validation failure (400).
pub async fn submit(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<ContactResponse>> {
    let form: ContactForm = serde_json::from_slice(&body)
        .map_err(|e| ApiError::internal(format!("unreadable contact body: {e}")))?;

    let receipt = state.contact.submit(&form, request_meta(&headers)).await?;
    tracing::info!(
        stored = receipt.id.is_some(),
        operator_notified = receipt.operator_notified,
        applicant_notified = receipt.applicant_notified,
        "Contact submission accepted"
    );

    Ok(Json(ContactResponse {
        success: true,
        message: THANK_YOU,
        id: receipt.id,
    }))
}

/// Client IP from `x-forwarded-for` (first hop) or `x-real-ip`, and the
/// user agent.
pub fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let ip_address = header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(str::to_string);

    let user_agent = header_str(headers, USER_AGENT.as_str()).map(str::to_string);

    RequestMeta {
        ip_address,
        user_agent,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
