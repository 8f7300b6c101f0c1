//! Loader configuration scripts and the seam to the engine that evaluates them.

use std::error::Error;
use std::sync::LazyLock;

use regex::Regex;

/// Placeholder in an aggregator script where the rewritten configuration script is inserted.
pub const EXTERNAL_CONFIG_PLACEHOLDER: &str = "{{EXTERNAL_CONFIG}}";

static WEBJARS_PLUGIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"webjars!([^'"\s]+)\.js"#).unwrap());

static WEBJARS_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"webjars\.path\(\s*['"][^'"]*['"]\s*,\s*([^)]+?)\s*\)"#).unwrap()
});

/// Evaluates a loader configuration script into its effective configuration.
///
/// This is the only blocking call a conversion makes.
pub trait ScriptEvaluator {
    /// The error type for the evaluator.
    type Error: Error;

    /// Evaluates `script` and returns the configuration it declared, as a JSON string.
    fn evaluate(&mut self, script: &str) -> Result<String, Self::Error>;
}

impl<T: ScriptEvaluator + ?Sized> ScriptEvaluator for &mut T {
    type Error = T::Error;

    fn evaluate(&mut self, script: &str) -> Result<String, Self::Error> {
        (**self).evaluate(script)
    }
}

/// Removes the webjars indirections a script may use to locate files.
///
/// `webjars!<path>.js` becomes `<path>` and `webjars.path('<id>', <expr>)` becomes `<expr>`.
#[must_use]
pub fn rewrite_webjars_references(script: &str) -> String {
    let script = WEBJARS_PLUGIN_REGEX.replace_all(script, "$1");
    WEBJARS_PATH_REGEX.replace_all(&script, "$1").into_owned()
}

/// Inserts a configuration script into an aggregator script template.
#[must_use]
pub fn fill_template(template: &str, script: &str) -> String {
    template.replace(EXTERNAL_CONFIG_PLACEHOLDER, script)
}
