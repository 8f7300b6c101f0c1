//! The converted configuration together with its registry block.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactInfo;
use crate::config::RequireConfig;
use crate::descriptor::ModuleDescriptor;
use crate::versioning::{ModuleRegistry, VersionedConfig};

/// Artifact key (`group/artifactId`) to artifact version to module id to module version.
pub type ArtifactRegistry = IndexMap<String, IndexMap<String, IndexMap<String, String>>>;

/// Side channel telling the hosting system which modules are provided, and by which artifact.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequireJsMeta {
    /// Module id to version to details.
    pub modules: ModuleRegistry,

    /// Modules provided by each artifact version.
    pub artifacts: ArtifactRegistry,
}

/// A versioned loader configuration with its registry block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertedConfig {
    /// The namespaced configuration sections.
    #[serde(flatten)]
    pub config: RequireConfig,

    /// The registry block.
    #[serde(rename = "requirejs-osgi-meta")]
    pub meta: RequireJsMeta,
}

/// The outcome of converting one module: a fragment safe to merge into a shared configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    /// Name of the module.
    pub name: String,

    /// Version of the module.
    pub version: String,

    /// `name/version`.
    pub versioned_name: String,

    /// The converted loader configuration.
    pub requirejs: ConvertedConfig,
}

impl ModuleInfo {
    /// Attaches the registry block for `artifact` to a versioned configuration.
    #[must_use]
    pub fn assemble(
        descriptor: &ModuleDescriptor,
        versioned: VersionedConfig,
        artifact: &ArtifactInfo,
    ) -> Self {
        let artifacts = IndexMap::from([(
            artifact.key(),
            IndexMap::from([(artifact.version.clone(), versioned.artifact_modules)]),
        )]);

        Self {
            name: descriptor.module_name.clone(),
            version: descriptor.module_version.clone(),
            versioned_name: descriptor.versioned_name(),
            requirejs: ConvertedConfig {
                config: versioned.config,
                meta: RequireJsMeta {
                    modules: versioned.modules,
                    artifacts,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versioning::versionize;
    use serde_json::json;

    #[test]
    fn test_assemble_envelope() {
        let descriptor = ModuleDescriptor::for_module("jquery", "2.1.4").unwrap();
        let artifact = ArtifactInfo::new("org.webjars", "jquery", "2.1.4");

        let info = ModuleInfo::assemble(&descriptor, versionize(&descriptor), &artifact);

        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({
                "name": "jquery",
                "version": "2.1.4",
                "versionedName": "jquery/2.1.4",
                "requirejs": {
                    "paths": { "jquery/2.1.4": "jquery/2.1.4" },
                    "shim": {},
                    "map": {},
                    "requirejs-osgi-meta": {
                        "modules": { "jquery": { "2.1.4": {} } },
                        "artifacts": {
                            "org.webjars/jquery": { "2.1.4": { "jquery": "2.1.4" } }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_envelope_round_trips() {
        let descriptor = ModuleDescriptor::for_module("d3", "3.5.6").unwrap();
        let info = ModuleInfo::assemble(
            &descriptor,
            versionize(&descriptor),
            &ArtifactInfo::default(),
        );

        let json = serde_json::to_string(&info).unwrap();
        let parsed: ModuleInfo = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, info);
        assert!(parsed.requirejs.meta.artifacts.contains_key("unknown/unknown"));
    }
}
