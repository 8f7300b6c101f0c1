//! `package.json` / `bower.json` manifests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::{PackageEntry, Paths};
use crate::package::{BrowserField, MainField};

/// The fields of an npm or bower manifest relevant to loader configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// The name of the module.
    #[serde(default)]
    pub name: Option<String>,

    /// The version of the module.
    #[serde(default)]
    pub version: Option<String>,

    /// Location of the module files, relative to the artifact root.
    #[serde(default)]
    pub path: Option<String>,

    /// Extra loader paths.
    #[serde(default)]
    pub paths: Option<Paths>,

    /// Id redirections applied inside this module.
    #[serde(default)]
    pub map: Option<IndexMap<String, String>>,

    /// Entry file(s).
    #[serde(default)]
    pub main: Option<MainField>,

    /// Browser-specific entry file or per-file overrides.
    #[serde(default)]
    pub browser: Option<BrowserField>,

    /// Module dependencies, name to version range.
    #[serde(default)]
    pub dependencies: Option<IndexMap<String, String>>,

    /// Pre-declared packages.
    #[serde(default)]
    pub packages: Option<Vec<PackageEntry>>,
}

impl Manifest {
    /// Parses a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or doesn't match the expected schema.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bower_manifest_parsing() {
        let content = r#"
        {
            "name": "angular",
            "version": "1.4.8",
            "main": ["./angular.js", "./angular-csp.css"],
            "ignore": [],
            "dependencies": {}
        }
        "#;

        let manifest = Manifest::from_json(content).unwrap();

        assert_eq!(manifest.name.as_deref(), Some("angular"));
        assert_eq!(manifest.version.as_deref(), Some("1.4.8"));
        assert!(matches!(manifest.main, Some(MainField::Candidates(ref files)) if files.len() == 2));
        assert!(manifest.dependencies.unwrap().is_empty());
    }

    #[test]
    fn test_package_json_parsing() {
        let content = r#"
        {
            "name": "my-package",
            "version": "1.0.0",
            "main": "index.js",
            "browser": { "./server.js": "./client.js" },
            "dependencies": {
                "lodash": "^4.17.21",
                "axios": "~0.21.0"
            },
            "devDependencies": {
                "typescript": "^4.5.0"
            }
        }
        "#;

        let manifest = Manifest::from_json(content).unwrap();

        assert_eq!(manifest.main, Some(MainField::File("index.js".to_string())));
        assert!(matches!(manifest.browser, Some(BrowserField::Overrides(_))));
        assert_eq!(manifest.dependencies.unwrap().len(), 2);
        assert!(manifest.path.is_none());
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        assert!(Manifest::from_json(r#"{ "name": 3 }"#).is_err());
        assert!(Manifest::from_json("not json").is_err());
    }
}
