//! Axum Handlers for the REST API
//!
//! A single operation: take a concept name, run the agent chain over it and
//! return the last message. Uses `utoipa` doc comments for OpenAPI output.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use mlviz_core::{ConceptError, UpstreamError, resolve};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::{
    models::{ConceptRequest, ErrorResponse, ExplanationResponse},
    state::AppState,
};

pub enum ApiError {
    NotFound(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { detail })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let detail = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { detail }),
                )
                    .into_response()
            }
        }
    }
}

impl From<ConceptError> for ApiError {
    fn from(err: ConceptError) -> Self {
        Self::NotFound(err.to_string())
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        Self::InternalServerError(err.into())
    }
}

/// Explain an ML concept through the agent chain.
#[utoipa::path(
    post,
    path = "/ml_explanation/",
    request_body = ConceptRequest,
    responses(
        (status = 200, description = "Explanation generated", body = ExplanationResponse),
        (status = 404, description = "Concept name was empty", body = ErrorResponse),
        (status = 500, description = "Model provider failed", body = ErrorResponse)
    )
)]
pub async fn ml_explanation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConceptRequest>,
) -> Result<Json<ExplanationResponse>, ApiError> {
    let concept = resolve(&payload.concept_name)?;

    let conversation_id = Uuid::new_v4();
    let span = info_span!("conversation", %conversation_id, concept = %concept);

    async move {
        let chain = state.driver.chain();
        let seed = chain.seed_message(&concept);
        info!("Starting agent conversation");

        let last = state
            .driver
            .run(chain.entry(), seed, chain.max_turns())
            .await?;

        info!(sender = %last.sender, "Agent conversation finished");
        Ok::<_, ApiError>(Json(ExplanationResponse::text(last.content)))
    }
    .instrument(span)
    .await
}
