//! Presentation relay for the ML Concept Visualizer.
//!
//! Sends a concept to the explanation service and renders the reply as plain
//! text for a terminal.

use serde::Deserialize;

/// Shown instead of making a request when the input is blank.
pub const EMPTY_INPUT_WARNING: &str = "Please enter a valid ML concept!";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("{0}")]
    EmptyConcept(&'static str),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// The explanation service's success body.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Explanation {
    pub output: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// HTTP client for the `/ml_explanation/` endpoint.
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/ml_explanation/", self.base_url.trim_end_matches('/'))
    }

    /// Requests an explanation. Blank input never reaches the network.
    pub async fn explain(&self, concept_name: &str) -> Result<Explanation, RelayError> {
        if concept_name.trim().is_empty() {
            return Err(RelayError::EmptyConcept(EMPTY_INPUT_WARNING));
        }

        let explanation = self
            .http
            .post(self.endpoint())
            .json(&serde_json::json!({ "concept_name": concept_name }))
            .send()
            .await?
            .error_for_status()?
            .json::<Explanation>()
            .await?;
        Ok(explanation)
    }
}

/// Formats an explanation for display; the image line is omitted when absent.
pub fn render(explanation: &Explanation) -> String {
    let mut out = format!("Explanation:\n\n{}\n", explanation.output);
    if let Some(url) = &explanation.image_url {
        out.push_str(&format!("\nVisual Representation: {}\n", url));
    }
    out
}
