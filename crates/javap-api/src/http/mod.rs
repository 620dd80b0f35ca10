//! HTTP wiring: router, handlers, middleware, and problem responses.

pub(crate) mod constants;
pub(crate) mod errors;
pub(crate) mod health;
pub(crate) mod pastes;
pub(crate) mod router;
pub(crate) mod sdks;
pub(crate) mod telemetry;
