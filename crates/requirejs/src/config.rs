//! Types describing a RequireJS loader configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Module id to path.
pub type Paths = IndexMap<String, String>;

/// Module id to shim entry.
pub type Shim = IndexMap<String, ShimEntry>;

/// Referring module id to its id redirections.
pub type ModuleMap = IndexMap<String, IndexMap<String, String>>;

/// The sections of a loader configuration that take part in versioning.
///
/// Other top-level keys of a configuration are ignored when deserializing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequireConfig {
    /// Where to find named modules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Paths>,

    /// How files are grouped into importable units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<PackageEntry>>,

    /// Dependencies injected into non-AMD scripts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shim: Option<Shim>,

    /// Redirections of module ids, scoped by referring module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<ModuleMap>,
}

/// A package declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackageEntry {
    /// Just the package name. An empty name is the module itself.
    Name(String),

    /// A full package record.
    Package(PackageSpec),
}

impl PackageEntry {
    /// The package standing for the module root, without an explicit main.
    #[must_use]
    pub const fn root() -> Self {
        Self::Name(String::new())
    }

    #[cfg(test)]
    pub(crate) fn is_root(&self) -> bool {
        matches!(self, Self::Name(name) if name.is_empty())
    }
}

/// A package record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageSpec {
    /// Package name. An empty name is the module itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Location of the package, relative to the module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Main file of the package, without extension. Defaults to `main`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    /// Any other attributes, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageSpec {
    /// Main file of the package, applying the loader default.
    #[must_use]
    pub fn main_or_default(&self) -> &str {
        self.main.as_deref().unwrap_or("main")
    }
}

/// A shim entry, either the array shorthand or the full object form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShimEntry {
    /// `"id": ["dep", ...]`
    Deps(Vec<String>),

    /// `"id": { "deps": [...], "exports": ..., ... }`
    Config {
        /// Dependencies loaded before the module.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deps: Option<Vec<String>>,

        /// Other attributes (`exports`, `init`, ...), passed through untouched.
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl ShimEntry {
    /// Shim entry carrying only a dependency list.
    #[must_use]
    pub fn with_deps(deps: Vec<String>) -> Self {
        Self::Config {
            deps: Some(deps),
            extra: Map::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn deps(&self) -> &[String] {
        match self {
            Self::Deps(deps) => deps,
            Self::Config { deps, .. } => deps.as_deref().unwrap_or_default(),
        }
    }
}
