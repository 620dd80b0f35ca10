//! Paste create, read, and update endpoints.
//!
//! # Design
//! - The caller's token travels in a header; absence is forwarded to the
//!   service, which decides whether it matters.
//! - Malformed JSON bodies are reported as problem documents like every
//!   other client error.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use javap_core::PasteView;

use crate::http::constants::HEADER_USER_TOKEN;
use crate::http::errors::ApiError;
use crate::models::{CreatePasteRequest, UpdatePasteRequest};
use crate::state::ApiState;

fn caller_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(HEADER_USER_TOKEN)
        .and_then(|value| value.to_str().ok())
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large(rejection.body_text())
        } else {
            ApiError::bad_request(rejection.body_text())
        }
    })
}

pub(crate) async fn create_paste(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    body: Result<Json<CreatePasteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PasteView>), ApiError> {
    let request = json_body(body)?;
    let view = state
        .service
        .create(caller_token(&headers), request.input)
        .await?;
    state.telemetry.inc_paste_created();
    Ok((StatusCode::CREATED, Json(view)))
}

pub(crate) async fn get_paste(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<PasteView>, ApiError> {
    let view = state.service.get(caller_token(&headers), &id).await?;
    Ok(Json(view))
}

pub(crate) async fn update_paste(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<UpdatePasteRequest>, JsonRejection>,
) -> Result<Json<PasteView>, ApiError> {
    let request = json_body(body)?;
    let changed = request.input.is_some();
    let view = state
        .service
        .update(caller_token(&headers), &id, request.input)
        .await?;
    if changed {
        state.telemetry.inc_paste_updated();
    }
    Ok(Json(view))
}
