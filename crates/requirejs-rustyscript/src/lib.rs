//! Evaluates RequireJS configuration scripts in an embedded V8 isolate.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::result_large_err)]

mod error;
pub use error::Error;

use std::time::Duration;

use proven_requirejs::{ScriptEvaluator, fill_template};
use rustyscript::{Runtime, RuntimeOptions};
use serde_json::Value;
use tracing::debug;

/// Aggregator wrapped around every configuration script.
///
/// It stubs `require`/`requirejs`/`define`, collects every configuration handed to the loader
/// and defines a global `processConfig`, which returns the merged configuration as a JSON string.
pub const AGGREGATOR_SCRIPT: &str = include_str!("aggregator.js");

/// Default limit on the time a single evaluation may take.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// A `ScriptEvaluator` running scripts on a rustyscript runtime.
///
/// Every evaluation gets a fresh runtime, so globals declared by one script are never seen by
/// the next.
#[derive(Debug)]
pub struct RustyscriptEvaluator {
    evaluations: usize,
    timeout: Duration,
}

impl RustyscriptEvaluator {
    /// Creates an evaluator with the default timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates an evaluator whose evaluations are aborted after `timeout`.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            evaluations: 0,
            timeout,
        }
    }
}

impl Default for RustyscriptEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEvaluator for RustyscriptEvaluator {
    type Error = Error;

    fn evaluate(&mut self, script: &str) -> Result<String, Self::Error> {
        self.evaluations += 1;

        let mut runtime = Runtime::new(RuntimeOptions {
            timeout: self.timeout,
            ..Default::default()
        })?;

        // Classic script in the global scope: sloppy mode, top-level `this` is the global object.
        let _: Value = runtime.eval(fill_template(AGGREGATOR_SCRIPT, script))?;

        let args: Vec<Value> = vec![Value::String(String::new())];
        let result: Value = runtime.call_function(None, "processConfig", &args)?;

        debug!(evaluation = self.evaluations, "evaluated configuration script");

        match result {
            Value::String(json) => Ok(json),
            other => Err(Error::UnexpectedResult(other.to_string())),
        }
    }
}
