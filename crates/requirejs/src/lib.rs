//! Conversion of JavaScript module descriptors into namespaced, versioned RequireJS configuration.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod artifact;
mod config;
mod descriptor;
mod error;
mod manifest;
mod module_info;
mod package;
mod pom;
mod script;
mod version;
mod versioning;

pub use artifact::ArtifactInfo;
pub use config::{ModuleMap, PackageEntry, PackageSpec, Paths, RequireConfig, Shim, ShimEntry};
pub use descriptor::ModuleDescriptor;
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use module_info::{ArtifactRegistry, ConvertedConfig, ModuleInfo, RequireJsMeta};
pub use package::{
    BrowserField, BrowserOverride, MISSING_MODULE, MainField, extract_package,
    package_from_filename,
};
pub use pom::PomOptions;
pub use script::{
    EXTERNAL_CONFIG_PLACEHOLDER, ScriptEvaluator, fill_template, rewrite_webjars_references,
};
pub use version::Version;
pub use versioning::{KeyMap, ModuleDetails, ModuleRegistry, VersionedConfig, remap, versionize};

use tracing::debug;

/// Converts one module descriptor into a loader configuration fragment.
///
/// The descriptor is read once; every call to [`convert`](Self::convert) versions it afresh, so
/// conversions never stack.
#[derive(Clone, Debug, PartialEq)]
pub struct RequireJsGenerator {
    descriptor: ModuleDescriptor,
}

impl RequireJsGenerator {
    /// Creates a generator for an already normalized descriptor.
    #[must_use]
    pub const fn new(descriptor: ModuleDescriptor) -> Self {
        Self { descriptor }
    }

    /// Creates a generator for a module that carries no loader configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or version is empty.
    pub fn for_module(module_name: impl Into<String>, module_version: impl Into<String>) -> Result<Self> {
        ModuleDescriptor::for_module(module_name, module_version).map(Self::new)
    }

    /// Creates a generator from a Maven project document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document or its embedded configuration is malformed.
    pub fn from_pom(xml: &str, options: &PomOptions) -> Result<Self> {
        ModuleDescriptor::from_pom(xml, options).map(Self::new)
    }

    /// Creates a generator from a parsed `package.json` or `bower.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest has no name or version.
    pub fn from_manifest(manifest: Manifest) -> Result<Self> {
        ModuleDescriptor::from_manifest(manifest).map(Self::new)
    }

    /// Creates a generator from the JSON text of a `package.json` or `bower.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or has no name or version.
    pub fn from_manifest_json(content: &str) -> Result<Self> {
        Self::from_manifest(Manifest::from_json(content)?)
    }

    /// Creates a generator from a loader configuration script.
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot be evaluated into a configuration.
    pub fn from_script<E: ScriptEvaluator>(
        module_name: impl Into<String>,
        module_version: impl Into<String>,
        script: &str,
        evaluator: E,
    ) -> Result<Self> {
        ModuleDescriptor::from_script(module_name, module_version, script, evaluator).map(Self::new)
    }

    /// The normalized descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    /// Versions the configuration and attaches the registry block for `artifact`.
    #[must_use]
    pub fn convert(&self, artifact: &ArtifactInfo) -> ModuleInfo {
        debug!(
            module = %self.descriptor.versioned_name(),
            artifact = %artifact.key(),
            "converting module"
        );

        ModuleInfo::assemble(&self.descriptor, versionize(&self.descriptor), artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_is_repeatable() {
        let generator = RequireJsGenerator::from_manifest_json(
            r#"{ "name": "foo", "version": "1.0", "paths": { "./bar": "bar" } }"#,
        )
        .unwrap();
        let artifact = ArtifactInfo::new("org.webjars", "foo", "1.0");

        let first = generator.convert(&artifact);
        let second = generator.convert(&artifact);

        assert_eq!(first, second);
        assert!(first.requirejs.config.paths.unwrap().contains_key("foo/1.0/bar"));
    }

    #[test]
    fn test_invalid_manifest_json() {
        let result = RequireJsGenerator::from_manifest_json("[]");

        assert!(result.unwrap_err().is_malformed_input());
    }
}
