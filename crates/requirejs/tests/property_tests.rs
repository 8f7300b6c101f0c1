//! Properties of version coercion and of the versioning scheme.

use proptest::prelude::*;
use proven_requirejs::{ModuleDescriptor, Version, versionize};
use tracing_test::traced_test;

proptest! {
    #[test]
    fn coerce_never_fails(raw in ".*") {
        let version = Version::coerce(Some(&raw));

        if let Some(qualifier) = &version.qualifier {
            prop_assert!(!qualifier.is_empty());
            prop_assert!(!qualifier.contains('.'));
            prop_assert!(qualifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        }
    }

    #[test]
    fn coerce_keeps_numeric_components(major in 0u32..100_000, minor in 0u32..100_000, patch in 0u32..100_000) {
        let version = Version::from(format!("{major}.{minor}.{patch}").as_str());

        prop_assert_eq!(version, Version::new(major, minor, patch));
    }

    #[test]
    fn distinct_modules_never_collide(
        first in ("[a-z][a-z0-9-]{0,8}", "[0-9]{1,2}\\.[0-9]{1,2}"),
        second in ("[a-z][a-z0-9-]{0,8}", "[0-9]{1,2}\\.[0-9]{1,2}"),
    ) {
        prop_assume!(first != second);

        let keys = |(name, version): &(String, String)| {
            let descriptor = ModuleDescriptor::for_module(name.clone(), version.clone()).unwrap();
            versionize(&descriptor).config.paths.unwrap().into_keys().collect::<Vec<_>>()
        };

        let first_keys = keys(&first);
        let second_keys = keys(&second);

        prop_assert!(first_keys.iter().all(|key| !second_keys.contains(key)));
    }
}

#[test]
#[traced_test]
fn test_invalid_qualifier_is_reported() {
    let version = Version::from("1.0.0-beta+exp.sha.5114f85");

    assert_eq!(version, Version::new(1, 0, 0));
    assert!(logs_contain("version qualifier contains invalid characters"));
}

#[test]
#[traced_test]
fn test_overflowing_component_is_reported() {
    let version = Version::from("1.99999999999.0");

    assert_eq!(version, Version::new(1, 0, 0));
    assert!(logs_contain("version component is not an integer"));
}

#[test]
#[traced_test]
fn test_ignored_browser_override_is_reported() {
    let descriptor = ModuleDescriptor::from_manifest(
        serde_json::from_str(
            r#"{ "name": "foo", "version": "1.0", "browser": { "./fs.js": false } }"#,
        )
        .unwrap(),
    )
    .unwrap();

    assert_eq!(
        descriptor.require_config.paths.unwrap()["./fs"],
        proven_requirejs::MISSING_MODULE
    );
    assert!(logs_contain("redirecting to missing module"));
}
