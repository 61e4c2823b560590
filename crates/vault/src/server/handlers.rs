//! Axum request handlers for all service endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse, ErrorResponse,
    FetchResponse, HealthResponse,
};
use common::VaultError;
use tracing::warn;

use super::state::AppState;

/// `POST /tx/encrypt` — encrypt a payload and store it.
///
/// The payload is encrypted under a key derived from `partyId` and
/// persisted in the in-memory store under a fresh transaction id.
pub async fn encrypt(State(state): State<AppState>, Json(req): Json<EncryptRequest>) -> Response {
    if req.party_id.is_empty() {
        return error_response(VaultError::InputValidation(
            "partyId must be a non-empty string".into(),
        ));
    }
    if !req.payload.is_object() {
        return error_response(VaultError::InputValidation(
            "payload must be a JSON object".into(),
        ));
    }

    let (id, token) = state.store.create(&req.party_id, &req.payload).await;
    (
        StatusCode::CREATED,
        Json(EncryptResponse {
            id,
            token: token.into_string(),
        }),
    )
        .into_response()
}

/// `GET /tx/:id` — fetch the stored record without decrypting it.
///
/// Returns the token unchanged plus the stored party id label; the label
/// is not secret, only the payload is.
pub async fn fetch(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id).await {
        Some(record) => (
            StatusCode::OK,
            Json(FetchResponse {
                id,
                party_id: record.party_id,
                token: record.token.into_string(),
            }),
        )
            .into_response(),
        None => error_response(VaultError::NotFound),
    }
}

/// `POST /tx/:id/decrypt` — validate the supplied party id against the
/// stored record, then decrypt and return the original payload.
pub async fn decrypt(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DecryptRequest>,
) -> Response {
    if req.party_id.is_empty() {
        return error_response(VaultError::InputValidation(
            "partyId must be a non-empty string".into(),
        ));
    }

    match state.store.decrypt(&id, &req.party_id).await {
        Ok(payload) => (StatusCode::OK, Json(DecryptResponse { id, payload })).into_response(),
        Err(e) => {
            let err = VaultError::from(e);
            if matches!(err, VaultError::PayloadCorrupt) {
                warn!(tx_id = %id, "decrypted bytes are not valid JSON");
            }
            error_response(err)
        }
    }
}

/// `GET /health` — liveness check with the current record count.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        transactions: state.store.len().await,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Map a [`VaultError`] onto the wire error contract.
fn error_response(err: VaultError) -> Response {
    let status = StatusCode::from_u16(err.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.code(), err.to_string()))).into_response()
}
