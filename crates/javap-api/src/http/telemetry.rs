//! Request counting by matched route and response status.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::state::ApiState;

/// Count every routed request under its route template and response status.
pub(crate) async fn count_requests(
    State(state): State<Arc<ApiState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let route = req.extensions().get::<MatchedPath>().map_or_else(
        || req.uri().path().to_string(),
        |matched| matched.as_str().to_string(),
    );
    let response = next.run(req).await;
    state
        .telemetry
        .inc_http_request(&route, response.status().as_u16());
    response
}
