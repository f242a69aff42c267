//! API Models
//!
//! Request and response bodies for the explanation endpoint. They double as
//! OpenAPI schemas through `utoipa`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct ConceptRequest {
    #[schema(example = "Decision Trees")]
    pub concept_name: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ExplanationResponse {
    /// Content of the final message of the agent conversation.
    pub output: String,
    /// Reserved for a rendered visual. Nothing in the agent chain produces one yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ExplanationResponse {
    pub fn text(output: String) -> Self {
        Self {
            output,
            image_url: None,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_request_deserialization() {
        let json = r#"{"concept_name": "Neural Networks"}"#;
        let payload: ConceptRequest = serde_json::from_str(json).unwrap();
        assert_eq!(payload.concept_name, "Neural Networks");
    }

    #[test]
    fn test_concept_request_missing_field() {
        let result: Result<ConceptRequest, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_explanation_response_omits_missing_image() {
        let json = serde_json::to_string(&ExplanationResponse::text("Pizza!".to_string())).unwrap();
        assert_eq!(json, r#"{"output":"Pizza!"}"#);
    }

    #[test]
    fn test_explanation_response_with_image() {
        let response = ExplanationResponse {
            output: "Tree".to_string(),
            image_url: Some("https://example.com/tree.png".to_string()),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""image_url":"https://example.com/tree.png""#));
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            detail: "ML concept not found.".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"detail":"ML concept not found."}"#);
    }
}
