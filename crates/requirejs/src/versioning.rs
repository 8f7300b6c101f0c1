//! Rewriting of bare module ids into version-qualified, namespaced ids.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{PackageEntry, Paths, RequireConfig};
use crate::descriptor::ModuleDescriptor;

/// Translation of bare ids to their versioned replacements, scoped to a single conversion.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyMap(IndexMap<String, String>);

impl KeyMap {
    /// Creates an empty key map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the replacement of `key`.
    pub fn insert(&mut self, key: impl Into<String>, versioned_key: impl Into<String>) {
        self.0.insert(key.into(), versioned_key.into());
    }

    /// The replacement of `key`, if it has one.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Translates `key`, keeping it as is when it has no replacement.
    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Number of recorded replacements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the hosting system records about one version of a module.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModuleDetails {
    /// Dependencies declared by the providing module.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: IndexMap<String, String>,
}

/// Module id to version to details.
pub type ModuleRegistry = IndexMap<String, IndexMap<String, ModuleDetails>>;

/// Result of versioning a descriptor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VersionedConfig {
    /// The configuration with every id namespaced.
    pub config: RequireConfig,

    /// Modules registered by this conversion.
    pub modules: ModuleRegistry,

    /// Module id to version, for every registered module.
    pub artifact_modules: IndexMap<String, String>,

    /// The translations applied.
    pub key_map: KeyMap,
}

/// Namespaces and versions every id in the configuration of `descriptor`.
///
/// Relative paths (`./x`) become files of the module, any other path key is registered as a module
/// provided at the descriptor's version. Shim and map keys follow the renames.
#[must_use]
pub fn versionize(descriptor: &ModuleDescriptor) -> VersionedConfig {
    let module_name = descriptor.module_name.as_str();
    let module_version = descriptor.module_version.as_str();
    let versioned_name = descriptor.versioned_name();

    let mut key_map = KeyMap::new();
    let mut modules = ModuleRegistry::new();
    let mut artifact_modules = IndexMap::new();

    let paths = descriptor.require_config.paths.as_ref().map(|paths| {
        paths
            .iter()
            .map(|(key, target)| {
                let versioned_key = if key.starts_with("./") {
                    // Keep the slash: `./bar` -> `foo/1.0/bar`
                    format!("{versioned_name}{}", &key[1..])
                } else {
                    modules.insert(
                        key.clone(),
                        IndexMap::from([(
                            module_version.to_string(),
                            ModuleDetails {
                                dependencies: descriptor.dependencies.clone(),
                            },
                        )]),
                    );
                    artifact_modules.insert(key.clone(), module_version.to_string());

                    format!("{key}/{module_version}")
                };

                key_map.insert(key.clone(), versioned_key.clone());

                (versioned_key, format!("{versioned_name}{}", absolute(target)))
            })
            .collect::<Paths>()
    });

    let packages = descriptor.require_config.packages.as_ref().map(|packages| {
        packages
            .iter()
            .map(|package| match package {
                PackageEntry::Name(name) => {
                    let (key, versioned) = package_names(name, module_name, &versioned_name);

                    key_map.insert(format!("{key}/main"), format!("{versioned}/main"));
                    key_map.insert(key, versioned.clone());

                    PackageEntry::Name(versioned)
                }
                PackageEntry::Package(spec) => {
                    let mut spec = spec.clone();

                    if let Some(name) = &spec.name {
                        let (key, versioned) = package_names(name, module_name, &versioned_name);
                        let main = spec.main_or_default();

                        key_map.insert(format!("{key}/{main}"), format!("{versioned}/{main}"));
                        key_map.insert(key, versioned.clone());

                        spec.name = Some(versioned);
                    }

                    PackageEntry::Package(spec)
                }
            })
            .collect::<Vec<_>>()
    });

    debug!(
        module = %versioned_name,
        translations = key_map.len(),
        registered = modules.len(),
        "versioned loader configuration"
    );

    let config = RequireConfig {
        paths,
        packages,
        shim: Some(remap(&key_map, descriptor.require_config.shim.as_ref())),
        map: Some(remap(&key_map, descriptor.require_config.map.as_ref())),
    };

    VersionedConfig {
        config,
        modules,
        artifact_modules,
        key_map,
    }
}

/// Renames the top-level keys of a sub-configuration through `key_map`.
///
/// Keys without a translation are kept; values are copied untouched.
#[must_use]
pub fn remap<V: Clone>(key_map: &KeyMap, sub_config: Option<&IndexMap<String, V>>) -> IndexMap<String, V> {
    sub_config
        .into_iter()
        .flatten()
        .map(|(key, value)| (key_map.translate(key).to_string(), value.clone()))
        .collect()
}

/// The key recorded for a package and its versioned name. The empty name is the module itself.
fn package_names(name: &str, module_name: &str, versioned_name: &str) -> (String, String) {
    if name.is_empty() {
        (module_name.to_string(), versioned_name.to_string())
    } else {
        (name.to_string(), format!("{versioned_name}/{name}"))
    }
}

fn absolute(target: &str) -> String {
    if target.is_empty() || target.starts_with('/') {
        target.to_string()
    } else {
        format!("/{target}")
    }
}
