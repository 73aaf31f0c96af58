use thiserror::Error;

/// Failures the spec pipeline can report.
///
/// Every variant is a deterministic function of the input text; none are
/// retryable. The first violated contract aborts the whole call, so no
/// partial spec is ever produced.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The input was not usable text (empty, or undecodable at the transport edge).
    #[error("Input must be a non-empty string")]
    InvalidInput,

    /// No `/* @plugin ... @endplugin */` block anywhere in the text.
    #[error("No @plugin block found in the provided text")]
    BlockNotFound,

    /// The block payload is not valid JSON.
    #[error("Failed to parse @plugin JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// A required top-level field is missing or has the wrong shape.
    #[error("Invalid plugin spec: {0}")]
    InvalidSpec(String),

    /// One parameter failed its type-specific requirements.
    #[error("Invalid param at index {index}: {reason}")]
    InvalidParam { index: usize, reason: String },
}
