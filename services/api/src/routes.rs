use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use crvs_forms::error::AppError;
use crvs_forms::forms::{Event, RegisterForm};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
pub(crate) struct FormSummary {
    pub(crate) event: Event,
    pub(crate) sections: usize,
    pub(crate) fields: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct FormListResponse {
    pub(crate) forms: Vec<FormSummary>,
}

pub(crate) fn form_routes() -> axum::Router {
    axum::Router::new()
        .route("/forms", get(list_forms))
        .route("/forms/:event", get(form_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn list_forms(Extension(state): Extension<AppState>) -> Json<FormListResponse> {
    let forms = state
        .forms
        .iter()
        .map(|(event, form)| FormSummary {
            event,
            sections: form.sections.len(),
            fields: form.fields().count(),
        })
        .collect();
    Json(FormListResponse { forms })
}

pub(crate) async fn form_endpoint(
    Extension(state): Extension<AppState>,
    Path(event): Path<String>,
) -> Result<Json<RegisterForm>, AppError> {
    let event: Event = event.parse()?;
    let form = state
        .forms
        .get(event)
        .cloned()
        .ok_or(AppError::FormNotFound(event))?;
    Ok(Json(form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use crvs_forms::forms::address::{
        default_address_configuration, AddressSettings, AdminLevelDepth,
    };
    use crvs_forms::forms::bootstrap::load_base_forms;
    use crvs_forms::forms::decorate_all;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn app(ready: bool) -> axum::Router {
        let forms_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../forms");
        let base_forms = load_base_forms(&forms_dir).await.expect("fixtures load");
        let settings = AddressSettings::new(AdminLevelDepth::new(2).expect("depth"), "FAR");
        let forms = decorate_all(&base_forms, &default_address_configuration(), &settings)
            .expect("forms decorate");

        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            forms: Arc::new(forms),
        };
        form_routes().layer(Extension(state))
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = serde_json::from_slice(&bytes).expect("json body");
        (status, body)
    }

    #[tokio::test]
    async fn serves_a_decorated_form() {
        let (status, body) = get_json(app(true).await, "/forms/birth").await;

        assert_eq!(status, StatusCode::OK);
        let child = body["sections"]
            .as_array()
            .and_then(|sections| sections.iter().find(|section| section["id"] == "child"))
            .expect("child section");
        let fields = child["groups"][0]["fields"].as_array().expect("fields");
        assert!(fields.iter().any(|field| field["name"] == "district"
            && field["dynamicOptions"]["dependency"] == "state"));
    }

    #[tokio::test]
    async fn lists_every_event() {
        let (status, body) = get_json(app(true).await, "/forms").await;

        assert_eq!(status, StatusCode::OK);
        let events: Vec<&str> = body["forms"]
            .as_array()
            .expect("forms array")
            .iter()
            .filter_map(|form| form["event"].as_str())
            .collect();
        assert_eq!(events, vec!["birth", "death", "marriage"]);
    }

    #[tokio::test]
    async fn unknown_events_are_not_found() {
        let (status, body) = get_json(app(true).await, "/forms/adoption").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("adoption")));
    }

    #[tokio::test]
    async fn readiness_reflects_startup_state() {
        let (status, body) = get_json(app(false).await, "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, _) = get_json(app(true).await, "/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}
