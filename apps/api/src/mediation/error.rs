use thiserror::Error;

use crate::llm_client::GatewayError;

/// Classified failure of one mediation round trip.
#[derive(Debug, Error)]
pub enum MediationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] GatewayError),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Schema violation at '{field}': {reason}")]
    SchemaViolation { field: String, reason: String },
}

impl MediationError {
    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MediationError::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code, shared by HTTP error bodies and controller snapshots.
    pub fn kind(&self) -> &'static str {
        match self {
            MediationError::InvalidInput(_) => "VALIDATION_ERROR",
            MediationError::Upstream(_) => "UPSTREAM_ERROR",
            MediationError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            MediationError::SchemaViolation { .. } => "SCHEMA_VIOLATION",
        }
    }
}
