//! Axum Router Configuration
//!
//! This module defines the HTTP routing for the application: the explanation
//! endpoint and the OpenAPI documentation.

use crate::{
    handlers,
    models::{ConceptRequest, ErrorResponse, ExplanationResponse},
    state::AppState,
};

use axum::{Router, routing::post};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::ml_explanation),
    components(schemas(ConceptRequest, ExplanationResponse, ErrorResponse)),
    tags(
        (name = "ML Concept Visualizer", description = "Explains ML concepts through a chain of model-backed agents")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/ml_explanation/", post(handlers::ml_explanation))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_explanation_path() {
        let doc = ApiDoc::openapi();
        let json = doc.to_pretty_json().unwrap();
        assert!(json.contains("/ml_explanation/"));
        assert!(json.contains("ConceptRequest"));
        assert!(json.contains("ExplanationResponse"));
    }
}
