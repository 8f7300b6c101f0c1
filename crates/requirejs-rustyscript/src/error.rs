use thiserror::Error;

/// Errors that can occur in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// `processConfig` returned something other than a string.
    #[error("unexpected result from processConfig: {0}")]
    UnexpectedResult(String),

    /// Rustyscript error.
    #[error(transparent)]
    RustyScript(#[from] rustyscript::Error),
}
