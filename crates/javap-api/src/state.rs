//! Shared state handed to every handler.

use javap_core::{PasteService, SdkRegistry};
use javap_telemetry::Metrics;

pub(crate) struct ApiState {
    pub(crate) service: PasteService,
    pub(crate) sdks: SdkRegistry,
    pub(crate) telemetry: Metrics,
}

impl ApiState {
    pub(crate) const fn new(service: PasteService, sdks: SdkRegistry, telemetry: Metrics) -> Self {
        Self {
            service,
            sdks,
            telemetry,
        }
    }
}
