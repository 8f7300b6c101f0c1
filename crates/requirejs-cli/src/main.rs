//! CLI binary converting a module descriptor into a versioned RequireJS configuration fragment.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser};
use proven_requirejs::{ArtifactInfo, PomOptions, RequireJsGenerator};
use proven_requirejs_rustyscript::RustyscriptEvaluator;
use tracing::{Level, info};

/// CLI-specific error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Conversion error
    #[error(transparent)]
    Conversion(#[from] proven_requirejs::Error),

    /// Reading input or writing output failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Required argument missing
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// Serializing the result failed
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["pom", "manifest", "script", "bare"])
))]
struct Args {
    /// Maven project document with the configuration in its `requirejs` property
    #[arg(long)]
    pom: Option<PathBuf>,

    /// `package.json` or `bower.json` manifest
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// RequireJS configuration script (needs --module-name and --module-version)
    #[arg(long, requires_all = ["module_name", "module_version"])]
    script: Option<PathBuf>,

    /// Module without configuration of its own (needs --module-name and --module-version)
    #[arg(long, requires_all = ["module_name", "module_version"])]
    bare: bool,

    /// Name of the module, for --script and --bare
    #[arg(long, env = "PROVEN_REQUIREJS_MODULE_NAME")]
    module_name: Option<String>,

    /// Version of the module, for --script and --bare
    #[arg(long, env = "PROVEN_REQUIREJS_MODULE_VERSION")]
    module_version: Option<String>,

    /// Location the artifact was deployed from (`file:` or `mvn:` URL)
    #[arg(
        long,
        env = "PROVEN_REQUIREJS_ARTIFACT_URL",
        conflicts_with_all = ["group", "artifact_id", "artifact_version"]
    )]
    artifact_url: Option<String>,

    /// Group of the artifact carrying the module
    #[arg(long, default_value = "unknown", env = "PROVEN_REQUIREJS_GROUP")]
    group: String,

    /// Id of the artifact carrying the module
    #[arg(long, env = "PROVEN_REQUIREJS_ARTIFACT_ID")]
    artifact_id: Option<String>,

    /// Version of the artifact carrying the module
    #[arg(long, default_value = "0.0.0", env = "PROVEN_REQUIREJS_ARTIFACT_VERSION")]
    artifact_version: String,

    /// Only project dependencies whose group id contains this are recorded
    #[arg(
        long,
        default_value = "org.webjars",
        env = "PROVEN_REQUIREJS_DEPENDENCY_GROUP_FILTER"
    )]
    dependency_group_filter: String,

    /// Scheme of recorded project dependencies
    #[arg(
        long,
        default_value = "pentaho-webjar-deployer",
        env = "PROVEN_REQUIREJS_DEPENDENCY_SCHEME"
    )]
    dependency_scheme: String,

    /// Time allowed for evaluating a configuration script
    #[arg(long, default_value_t = 5000, env = "PROVEN_REQUIREJS_TIMEOUT_MILLIS")]
    timeout_millis: u64,

    /// Write the result here instead of stdout
    #[arg(long, short, env = "PROVEN_REQUIREJS_OUTPUT")]
    output: Option<PathBuf>,

    /// Pretty-print the result
    #[arg(long)]
    pretty: bool,

    /// Maximum level of log events written to stderr
    #[arg(long, default_value_t = Level::INFO, env = "PROVEN_REQUIREJS_LOG_LEVEL")]
    log_level: Level,
}

impl Args {
    fn module(&self) -> Result<(&str, &str), Error> {
        let name = self
            .module_name
            .as_deref()
            .ok_or(Error::MissingArgument("--module-name"))?;
        let version = self
            .module_version
            .as_deref()
            .ok_or(Error::MissingArgument("--module-version"))?;

        Ok((name, version))
    }

    fn generator(&self) -> Result<RequireJsGenerator, Error> {
        if let Some(pom) = &self.pom {
            let options = PomOptions {
                dependency_group_filter: self.dependency_group_filter.clone(),
                dependency_scheme: self.dependency_scheme.clone(),
            };

            return Ok(RequireJsGenerator::from_pom(
                &std::fs::read_to_string(pom)?,
                &options,
            )?);
        }

        if let Some(manifest) = &self.manifest {
            return Ok(RequireJsGenerator::from_manifest_json(
                &std::fs::read_to_string(manifest)?,
            )?);
        }

        let (name, version) = self.module()?;

        if let Some(script) = &self.script {
            let evaluator =
                RustyscriptEvaluator::with_timeout(Duration::from_millis(self.timeout_millis));

            return Ok(RequireJsGenerator::from_script(
                name,
                version,
                &std::fs::read_to_string(script)?,
                evaluator,
            )?);
        }

        Ok(RequireJsGenerator::for_module(name, version)?)
    }

    fn artifact(&self) -> Result<ArtifactInfo, Error> {
        if let Some(locator) = &self.artifact_url {
            return Ok(ArtifactInfo::from_locator(locator)?);
        }

        Ok(self
            .artifact_id
            .as_ref()
            .map_or_else(ArtifactInfo::default, |artifact_id| {
                ArtifactInfo::new(&self.group, artifact_id, &self.artifact_version)
            }))
    }
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let generator = args.generator()?;
    let artifact = args.artifact()?;

    let module_info = generator.convert(&artifact);

    info!(
        module = %module_info.versioned_name,
        artifact = %artifact.key(),
        "converted module"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&module_info)?
    } else {
        serde_json::to_string(&module_info)?
    };

    match &args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
