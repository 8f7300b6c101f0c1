//! A mock implementation of the script evaluator.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
pub use error::Error;

use proven_requirejs::ScriptEvaluator;

/// A mock implementation of the `ScriptEvaluator` trait. Used for testing.
///
/// Answers every evaluation with the same canned response and records the scripts it was given.
#[derive(Clone, Debug)]
pub struct MockScriptEvaluator {
    response: Result<String, Error>,
    scripts: Vec<String>,
}

impl MockScriptEvaluator {
    /// Creates an evaluator that returns `json` for every script.
    #[must_use]
    pub fn returning(json: impl Into<String>) -> Self {
        Self {
            response: Ok(json.into()),
            scripts: Vec::new(),
        }
    }

    /// Creates an evaluator that fails every evaluation with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(Error(message.into())),
            scripts: Vec::new(),
        }
    }

    /// The scripts evaluated so far, in order.
    #[must_use]
    pub fn evaluated_scripts(&self) -> &[String] {
        &self.scripts
    }
}

impl ScriptEvaluator for MockScriptEvaluator {
    type Error = Error;

    fn evaluate(&mut self, script: &str) -> Result<String, Self::Error> {
        self.scripts.push(script.to_string());
        self.response.clone()
    }
}
