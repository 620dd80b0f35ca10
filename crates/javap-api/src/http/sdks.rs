//! Toolchain listing.

use std::sync::Arc;

use axum::{Json, extract::State};
use javap_core::Sdk;

use crate::state::ApiState;

pub(crate) async fn list_sdks(State(state): State<Arc<ApiState>>) -> Json<Vec<Sdk>> {
    Json(state.sdks.all().to_vec())
}
