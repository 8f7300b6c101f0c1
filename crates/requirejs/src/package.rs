//! Deriving a package record from the `main` and `browser` fields of a manifest.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{PackageEntry, PackageSpec, Paths};

/// Target used for browser overrides that disable a module.
pub const MISSING_MODULE: &str = "no-where-to-be-found";

/// The `main` field of a manifest: one entry file or a list of candidates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MainField {
    /// A single entry file.
    File(String),

    /// Candidate entry files, in order of preference.
    Candidates(Vec<String>),
}

/// The `browser` field of a manifest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrowserField {
    /// An alternate main file.
    Main(String),

    /// Per-file replacements.
    Overrides(IndexMap<String, BrowserOverride>),

    /// Anything else (e.g. `false`).
    Disabled(Value),
}

/// A single entry of a browser override object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrowserOverride {
    /// Replace with another file.
    File(String),

    /// Ignore the module (`false`, or any other non-file value).
    Ignored(Value),
}

/// Derives a package from a candidate entry file.
///
/// Only `.js` files make a package. `main.js` is the root package, any other file becomes the
/// `main` of an unnamed package located at `module_path`.
#[must_use]
pub fn package_from_filename(file: &str, module_path: &str) -> Option<PackageEntry> {
    if split_extension(file).1 != Some("js") {
        return None;
    }

    if file == "main.js" {
        return Some(PackageEntry::root());
    }

    Some(PackageEntry::Package(PackageSpec {
        name: Some(String::new()),
        location: (!module_path.is_empty()).then(|| module_path.to_string()),
        main: Some(remove_extension(file)),
        ..PackageSpec::default()
    }))
}

/// Derives the package of a manifest from its `main` and `browser` fields.
///
/// Browser overrides of relative files are written to `paths`, other overrides to `map`.
pub fn extract_package(
    main: Option<&MainField>,
    browser: Option<&BrowserField>,
    module_path: &str,
    paths: &mut Paths,
    map: &mut IndexMap<String, String>,
) -> Option<PackageEntry> {
    let mut package = match main {
        Some(MainField::File(file)) => package_from_filename(file, module_path),
        Some(MainField::Candidates(files)) => files
            .iter()
            .find_map(|file| package_from_filename(file, module_path)),
        None => None,
    };

    match browser {
        Some(BrowserField::Main(file)) => {
            package = package_from_filename(file, module_path);
        }
        Some(BrowserField::Overrides(overrides)) => {
            for (source, replacement) in overrides {
                let target = match replacement {
                    BrowserOverride::File(file) => {
                        remove_extension(file.strip_prefix("./").unwrap_or(file))
                    }
                    BrowserOverride::Ignored(value) => {
                        warn!(%source, %value, "browser override does not name a file, redirecting to missing module");
                        MISSING_MODULE.to_string()
                    }
                };

                let key = remove_extension(source);
                if source.starts_with("./") {
                    paths.insert(key, target);
                } else {
                    map.insert(key, target);
                }
            }
        }
        Some(BrowserField::Disabled(value)) => {
            debug!(%value, "ignoring unsupported browser field");
        }
        None => {}
    }

    package
}

/// Splits `file` at the last dot of its final path segment.
///
/// Leading dots count, so `.js` has the extension `js` and an empty stem.
fn split_extension(file: &str) -> (&str, Option<&str>) {
    match file.rsplit_once('.') {
        Some((stem, extension)) if !extension.contains(['/', '\\']) => (stem, Some(extension)),
        _ => (file, None),
    }
}

fn remove_extension(file: &str) -> String {
    split_extension(file).0.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_main_js_is_root_package() {
        let package = package_from_filename("main.js", "x").unwrap();

        assert!(package.is_root());
        assert_eq!(serde_json::to_value(&package).unwrap(), json!(""));
    }

    #[test]
    fn test_non_js_is_not_a_package() {
        assert_eq!(package_from_filename("index.css", "x"), None);
        assert_eq!(package_from_filename("README", "x"), None);
    }

    #[test]
    fn test_extension_of_last_segment_only() {
        assert_eq!(package_from_filename("lib.js/README", "x"), None);
        assert_eq!(remove_extension("./lib.v2/index"), "./lib.v2/index");
        assert_eq!(remove_extension("./lib/jquery.min.js"), "./lib/jquery.min");
    }

    #[test]
    fn test_bare_extension_is_a_js_file() {
        let package = package_from_filename(".js", "").unwrap();

        assert_eq!(
            serde_json::to_value(&package).unwrap(),
            json!({ "name": "", "main": "" })
        );
    }

    #[test]
    fn test_named_file_becomes_main() {
        let package = package_from_filename("dist/jquery.min.js", "lib").unwrap();

        assert_eq!(
            serde_json::to_value(&package).unwrap(),
            json!({ "name": "", "location": "lib", "main": "dist/jquery.min" })
        );
    }

    #[test]
    fn test_empty_module_path_has_no_location() {
        let package = package_from_filename("index.js", "").unwrap();

        assert_eq!(
            serde_json::to_value(&package).unwrap(),
            json!({ "name": "", "main": "index" })
        );
    }

    #[test]
    fn test_first_matching_candidate_wins() {
        let main = MainField::Candidates(vec![
            "style.css".to_string(),
            "first.js".to_string(),
            "second.js".to_string(),
        ]);
        let mut paths = Paths::new();
        let mut map = IndexMap::new();

        let package = extract_package(Some(&main), None, "", &mut paths, &mut map).unwrap();

        let PackageEntry::Package(spec) = package else {
            panic!("expected a package record");
        };
        assert_eq!(spec.main.as_deref(), Some("first"));
    }

    #[test]
    fn test_browser_string_overrides_main() {
        let main = MainField::File("server.js".to_string());
        let browser = BrowserField::Main("main.js".to_string());
        let mut paths = Paths::new();
        let mut map = IndexMap::new();

        let package =
            extract_package(Some(&main), Some(&browser), "", &mut paths, &mut map).unwrap();

        assert!(package.is_root());
    }

    #[test]
    fn test_browser_overrides() {
        let browser: BrowserField = serde_json::from_value(json!({
            "./lib/server.js": "./lib/client.js",
            "fs": false,
            "http": "./shims/http.js"
        }))
        .unwrap();
        let mut paths = Paths::new();
        let mut map = IndexMap::new();

        let package = extract_package(None, Some(&browser), "", &mut paths, &mut map);

        assert_eq!(package, None);
        assert_eq!(paths.get("./lib/server").map(String::as_str), Some("lib/client"));
        assert_eq!(map.get("fs").map(String::as_str), Some(MISSING_MODULE));
        assert_eq!(map.get("http").map(String::as_str), Some("shims/http"));
    }

    #[test]
    fn test_browser_false_is_ignored() {
        let browser: BrowserField = serde_json::from_value(json!(false)).unwrap();
        let main = MainField::File("index.js".to_string());
        let mut paths = Paths::new();
        let mut map = IndexMap::new();

        let package = extract_package(Some(&main), Some(&browser), "", &mut paths, &mut map);

        assert!(package.is_some());
        assert!(paths.is_empty());
        assert!(map.is_empty());
    }
}
