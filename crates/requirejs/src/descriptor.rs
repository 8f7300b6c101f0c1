//! Normalization of the supported descriptor sources into a [`ModuleDescriptor`].

use indexmap::IndexMap;
use tracing::debug;

use crate::config::{PackageEntry, Paths, RequireConfig, ShimEntry};
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::package::extract_package;
use crate::pom::{Pom, PomOptions};
use crate::script::{ScriptEvaluator, rewrite_webjars_references};

/// A module and its loader configuration, expressed in bare module ids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModuleDescriptor {
    /// Name of the module. Never empty.
    pub module_name: String,

    /// Version of the module. Never empty.
    pub module_version: String,

    /// Location of the module files inside the artifact, possibly empty.
    pub module_path: String,

    /// Loader configuration in terms of bare module ids.
    pub require_config: RequireConfig,

    /// Dependencies of the module, key to version.
    pub dependencies: IndexMap<String, String>,
}

impl ModuleDescriptor {
    /// Descriptor for a module that ships no loader configuration: its name maps to its root.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or version is empty.
    pub fn for_module(module_name: impl Into<String>, module_version: impl Into<String>) -> Result<Self> {
        let module_name = non_empty(module_name.into(), "module name")?;
        let module_version = non_empty(module_version.into(), "module version")?;

        let require_config = RequireConfig {
            paths: Some(Paths::from([(module_name.clone(), String::new())])),
            ..RequireConfig::default()
        };

        Ok(Self {
            module_name,
            module_version,
            require_config,
            ..Self::default()
        })
    }

    /// Reads a Maven project document carrying its loader configuration as a JSON property.
    ///
    /// # Errors
    ///
    /// Returns an error if the document or its embedded configuration is malformed.
    pub fn from_pom(xml: &str, options: &PomOptions) -> Result<Self> {
        let pom = Pom::parse(xml, options)?;

        let require_config: RequireConfig = serde_json::from_str(&pom.requirejs)?;

        let dependencies = pom
            .dependencies
            .into_iter()
            .map(|dependency| {
                (
                    format!(
                        "{}:{}/{}",
                        options.dependency_scheme, dependency.group_id, dependency.artifact_id
                    ),
                    dependency.version,
                )
            })
            .collect::<IndexMap<_, _>>();

        debug!(
            artifact_id = %pom.artifact_id,
            dependencies = dependencies.len(),
            "read project document"
        );

        Ok(Self {
            module_name: non_empty(pom.artifact_id, "artifactId")?,
            module_version: non_empty(pom.version, "version")?,
            module_path: String::new(),
            require_config,
            dependencies,
        })
    }

    /// Builds the configuration of an npm or bower module from its manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest has no name or version.
    pub fn from_manifest(manifest: Manifest) -> Result<Self> {
        let module_name = non_empty(manifest.name.unwrap_or_default(), "name")?;
        let module_version = non_empty(manifest.version.unwrap_or_default(), "version")?;
        let module_path = manifest.path.unwrap_or_default();

        let mut paths = manifest.paths.unwrap_or_default();
        paths
            .entry(module_name.clone())
            .or_insert_with(|| module_path.clone());

        let mut map = manifest.map.unwrap_or_default();

        let package = extract_package(
            manifest.main.as_ref(),
            manifest.browser.as_ref(),
            &module_path,
            &mut paths,
            &mut map,
        );

        let mut require_config = RequireConfig::default();

        if !map.is_empty() {
            require_config.map = Some(IndexMap::from([(module_name.clone(), map)]));
        }

        let mut dependencies = IndexMap::new();
        if let Some(manifest_dependencies) = manifest.dependencies {
            let deps = manifest_dependencies.keys().cloned().collect::<Vec<_>>();

            let mut shim = paths
                .keys()
                .map(|key| (key.clone(), ShimEntry::with_deps(deps.clone())))
                .collect::<IndexMap<_, _>>();

            if let Some(package) = &package {
                let main = match package {
                    PackageEntry::Name(_) => "main",
                    PackageEntry::Package(spec) => spec.main_or_default(),
                };

                shim.insert(module_name.clone(), ShimEntry::with_deps(deps.clone()));
                shim.insert(format!("{module_name}/{main}"), ShimEntry::with_deps(deps));
            }

            require_config.shim = Some(shim);
            dependencies = manifest_dependencies;
        }

        require_config.paths = Some(paths);

        let mut packages = manifest.packages.unwrap_or_default();
        packages.extend(package);
        require_config.packages = Some(packages);

        Ok(Self {
            module_name,
            module_version,
            module_path,
            require_config,
            dependencies,
        })
    }

    /// Evaluates a loader configuration script and takes the configuration it declares.
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluator fails or does not produce a JSON configuration.
    pub fn from_script<E: ScriptEvaluator>(
        module_name: impl Into<String>,
        module_version: impl Into<String>,
        script: &str,
        mut evaluator: E,
    ) -> Result<Self> {
        let module_name = non_empty(module_name.into(), "module name")?;
        let module_version = non_empty(module_version.into(), "module version")?;

        let script = rewrite_webjars_references(script);

        let json = evaluator
            .evaluate(&script)
            .map_err(|e| Error::ScriptEvaluation(e.to_string()))?;

        let require_config = serde_json::from_str(&json).map_err(|e| {
            Error::ScriptEvaluation(format!("evaluator returned invalid configuration: {e}"))
        })?;

        Ok(Self {
            module_name,
            module_version,
            require_config,
            ..Self::default()
        })
    }

    /// `module_name/module_version`, the namespace of everything this module provides.
    #[must_use]
    pub fn versioned_name(&self) -> String {
        format!("{}/{}", self.module_name, self.module_version)
    }
}

fn non_empty(value: String, field: &str) -> Result<String> {
    if value.is_empty() {
        Err(Error::MalformedInput(format!("missing {field}")))
    } else {
        Ok(value)
    }
}
