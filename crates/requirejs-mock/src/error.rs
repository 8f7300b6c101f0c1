use thiserror::Error;

/// Error type for the mock script evaluator.
#[derive(Clone, Debug, Error)]
#[error("mock evaluation failed: {0}")]
pub struct Error(pub String);
