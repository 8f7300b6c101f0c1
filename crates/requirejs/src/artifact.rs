//! Identity of the artifact a module was deployed from.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::version::Version;

const UNKNOWN: &str = "unknown";
const DEFAULT_VERSION: &str = "0.0.0";
const LATEST: &str = "LATEST";

/// Identity of the deployable unit that carries a module.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactInfo {
    /// Group of the artifact.
    pub group: String,

    /// Id of the artifact within its group.
    pub artifact_id: String,

    /// Version of the artifact as declared.
    pub version: String,

    /// `version` coerced to `MAJOR.MINOR.PATCH[.QUALIFIER]`.
    pub osgi_compatible_version: String,
}

impl Default for ArtifactInfo {
    fn default() -> Self {
        Self {
            group: UNKNOWN.to_string(),
            artifact_id: UNKNOWN.to_string(),
            version: DEFAULT_VERSION.to_string(),
            osgi_compatible_version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl ArtifactInfo {
    /// Creates an artifact identity from its coordinates.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let version = version.into();

        Self {
            group: group.into(),
            artifact_id: artifact_id.into(),
            osgi_compatible_version: Version::coerce(Some(&version)).to_string(),
            version,
        }
    }

    /// Derives the identity from the location an artifact was deployed from.
    ///
    /// `file:` locators only yield an artifact id (the file name). `mvn:` locators have the form
    /// `mvn:[repository!]group/artifactId[/version[/...]]`, the version defaulting to `LATEST`.
    /// Locators with any other scheme yield the unknown identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the locator is not a URL or a `mvn:` locator has no artifact id.
    pub fn from_locator(locator: &str) -> Result<Self> {
        let url = Url::parse(locator)
            .map_err(|e| Error::MalformedInput(format!("invalid artifact locator '{locator}': {e}")))?;

        match url.scheme() {
            "file" => {
                let path = url.path();
                let artifact_id = path.rsplit('/').next().unwrap_or(path);

                Ok(Self {
                    artifact_id: artifact_id.to_string(),
                    ..Self::default()
                })
            }
            "mvn" => {
                let path = url.path();
                let coordinates = path.split_once('!').map_or(path, |(_, coordinates)| coordinates);

                let mut parts = coordinates.split('/');
                let group = parts.next().unwrap_or_default();
                let artifact_id = parts
                    .next()
                    .filter(|artifact_id| !artifact_id.is_empty())
                    .ok_or_else(|| {
                        Error::MalformedInput(format!("no artifact id in locator '{locator}'"))
                    })?;
                let version = parts.next().filter(|v| !v.is_empty()).unwrap_or(LATEST);

                Ok(Self::new(group, artifact_id, version))
            }
            _ => Ok(Self::default()),
        }
    }

    /// `group/artifactId`, the key of the artifact in the registry.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.group, self.artifact_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_locator() {
        let artifact =
            ArtifactInfo::from_locator("file:///opt/deploy/angular-1.4.8.jar").unwrap();

        assert_eq!(artifact.artifact_id, "angular-1.4.8.jar");
        assert_eq!(artifact.group, "unknown");
        assert_eq!(artifact.version, "0.0.0");
        assert_eq!(artifact.osgi_compatible_version, "0.0.0");
    }

    #[test]
    fn test_mvn_locator() {
        let artifact = ArtifactInfo::from_locator("mvn:org.webjars/jquery/2.1.4").unwrap();

        assert_eq!(artifact.key(), "org.webjars/jquery");
        assert_eq!(artifact.version, "2.1.4");
        assert_eq!(artifact.osgi_compatible_version, "2.1.4");
    }

    #[test]
    fn test_mvn_locator_with_repository_and_snapshot() {
        let artifact = ArtifactInfo::from_locator(
            "mvn:https://repo.example.com/maven2!org.webjars.npm/react/15.0.0-rc.2/jar",
        )
        .unwrap();

        assert_eq!(artifact.group, "org.webjars.npm");
        assert_eq!(artifact.artifact_id, "react");
        assert_eq!(artifact.version, "15.0.0-rc.2");
        assert_eq!(artifact.osgi_compatible_version, "15.0.0.rc_2");
    }

    #[test]
    fn test_mvn_locator_defaults_to_latest() {
        let artifact = ArtifactInfo::from_locator("mvn:org.webjars/angularjs").unwrap();

        assert_eq!(artifact.version, "LATEST");
        assert_eq!(artifact.osgi_compatible_version, "0.0.0.LATEST");
    }

    #[test]
    fn test_mvn_locator_without_artifact() {
        assert!(ArtifactInfo::from_locator("mvn:org.webjars").is_err());
        assert!(ArtifactInfo::from_locator("not a locator").is_err());
    }

    #[test]
    fn test_other_schemes_are_unknown() {
        let artifact = ArtifactInfo::from_locator("https://cdn.example.com/jquery.js").unwrap();

        assert_eq!(artifact, ArtifactInfo::default());
    }

    #[test]
    fn test_direct_coordinates() {
        let artifact = ArtifactInfo::new("org.webjars", "d3js", "3.5.6-1");

        assert_eq!(artifact.osgi_compatible_version, "3.5.6.1");
    }
}
