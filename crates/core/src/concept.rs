//! Concept name resolution.
//!
//! Resolution is identity on the trimmed input: no knowledge base is consulted.
//! The only failure is an empty name.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConceptError {
    #[error("ML concept not found.")]
    NotFound,
}

/// Trims the incoming concept name and rejects it if nothing is left.
pub fn resolve(concept_name: &str) -> Result<String, ConceptError> {
    let trimmed = concept_name.trim();
    if trimmed.is_empty() {
        return Err(ConceptError::NotFound);
    }
    Ok(trimmed.to_string())
}
