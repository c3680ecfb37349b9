use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;

use crate::web::server::AppState;
use crate::web::templates::{IndexTemplate, ResourceRow};

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// Status page: one row per planned resource with its observed state.
///
/// An unreachable cluster degrades the page to "unknown" states instead of
/// failing the request.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let rows = match state.executor.status(&state.plan).await {
        Ok(states) => states
            .into_iter()
            .map(|s| ResourceRow {
                kind: s.kind.as_str(),
                name: s.name,
                state: s.state.to_string(),
            })
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Status lookup failed, rendering unknown states");
            state
                .plan
                .steps()
                .iter()
                .map(|r| ResourceRow {
                    kind: r.kind().as_str(),
                    name: r.name().to_string(),
                    state: "unknown".to_string(),
                })
                .collect()
        }
    };

    let template = IndexTemplate {
        namespace: state.plan.namespace().to_string(),
        version: env!("CARGO_PKG_VERSION"),
        generated_at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        rows,
    };

    match template.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering failed").into_response()
        }
    }
}

/// Liveness endpoint; never touches the cluster.
pub async fn healthz() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
