//! Router construction and server host for the API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, Method, Request, header::CONTENT_TYPE},
    middleware,
    routing::get,
};
use javap_core::{PasteService, SdkRegistry};
use javap_telemetry::{Metrics, build_sha};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{Span, info};

use crate::error::{ApiServerError, ApiServerResult};
use crate::http::constants::{HEADER_REQUEST_ID, HEADER_USER_TOKEN, MAX_BODY_BYTES};
use crate::http::health::{health, metrics};
use crate::http::pastes::{create_paste, get_paste, update_paste};
use crate::http::sdks::list_sdks;
use crate::http::telemetry::count_requests;
use crate::state::ApiState;

/// Axum router wrapper that hosts the javap API.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Build the router over `service`, listing `sdks` and reporting into `telemetry`.
    #[must_use]
    pub fn new(service: PasteService, sdks: SdkRegistry, telemetry: Metrics) -> Self {
        let state = Arc::new(ApiState::new(service, sdks, telemetry));
        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE, HeaderName::from_static(HEADER_USER_TOKEN)]);
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(HEADER_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let layered = ServiceBuilder::new()
            .layer(javap_telemetry::set_request_id_layer())
            .layer(javap_telemetry::propagate_request_id_layer())
            .layer(trace_layer)
            .layer(middleware::from_fn_with_state(state.clone(), count_requests));

        let router = Router::new()
            .route("/health", get(health))
            .route("/metrics", get(metrics))
            .route("/api/sdk", get(list_sdks))
            .route("/api/paste", axum::routing::post(create_paste))
            .route("/api/paste/{id}", get(get_paste).put(update_paste))
            .layer(cors_layer)
            .route_layer(layered)
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .with_state(state);

        Self { router }
    }

    /// Bind `addr` and serve until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or serving stops.
    pub async fn serve(self, addr: SocketAddr) -> ApiServerResult<()> {
        info!(%addr, "starting api");
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        axum::serve(listener, self.router.into_make_service())
            .await
            .map_err(|source| ApiServerError::Serve { source })
    }

    #[cfg(test)]
    pub(crate) const fn router(&self) -> &Router {
        &self.router
    }
}
