use thiserror::Error;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// JSON did not parse or did not match the expected shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A descriptor document does not have the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The script evaluator failed or returned something other than JSON.
    #[error("script evaluation failed: {0}")]
    ScriptEvaluation(String),

    /// The project document is not well-formed XML.
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),
}

impl Error {
    /// Whether the error is due to the shape of the input rather than the evaluator.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Json(_) | Self::MalformedInput(_) | Self::Xml(_))
    }
}
