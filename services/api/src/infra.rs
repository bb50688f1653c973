use crvs_forms::forms::{Event, FormCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) forms: Arc<FormCatalog>,
}

pub(crate) fn parse_event(raw: &str) -> Result<Event, String> {
    raw.parse::<Event>().map_err(|err| err.to_string())
}
