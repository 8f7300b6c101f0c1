//! Coercion of free-form version strings into `MAJOR.MINOR.PATCH[.QUALIFIER]`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)?(?:\.([0-9]*)(?:\.([0-9]*))?)?[.-]?(.*)$").unwrap()
});

static QUALIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

/// A three component version with an optional qualifier.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Version {
    /// Major component.
    pub major: u32,

    /// Minor component.
    pub minor: u32,

    /// Patch component.
    pub patch: u32,

    /// Qualifier, never containing a dot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
}

impl Version {
    /// Creates a version without qualifier.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            qualifier: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_qualifier(major: u32, minor: u32, patch: u32, qualifier: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            patch,
            qualifier: Some(qualifier.into()),
        }
    }

    /// Coerces a free-form version string.
    ///
    /// Never fails: unparseable components become `0` and an invalid qualifier is dropped.
    #[must_use]
    pub fn coerce(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };

        let Some(caps) = VERSION_REGEX.captures(raw) else {
            return Self::default();
        };

        let major = parse_component(caps.get(1).map(|m| m.as_str()), "major");
        let minor = parse_component(caps.get(2).map(|m| m.as_str()), "minor");
        let patch = parse_component(caps.get(3).map(|m| m.as_str()), "patch");

        let qualifier = caps
            .get(4)
            .map(|m| m.as_str())
            .filter(|qualifier| !qualifier.is_empty())
            .and_then(|qualifier| {
                let qualifier = qualifier.replace('.', "_");
                if QUALIFIER_REGEX.is_match(&qualifier) {
                    Some(qualifier)
                } else {
                    warn!(%qualifier, "version qualifier contains invalid characters, ignoring");
                    None
                }
            });

        Self {
            major,
            minor,
            patch,
            qualifier,
        }
    }
}

/// Components are limited to the signed 32 bit range used by OSGi versions.
fn parse_component(value: Option<&str>, component: &str) -> u32 {
    match value {
        Some(value) if !value.is_empty() => value
            .parse::<i32>()
            .ok()
            .and_then(|parsed| u32::try_from(parsed).ok())
            .unwrap_or_else(|| {
                warn!(component, value, "version component is not an integer, using 0");
                0
            }),
        _ => 0,
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, ".{qualifier}")?;
        }
        Ok(())
    }
}

impl From<&str> for Version {
    fn from(raw: &str) -> Self {
        Self::coerce(Some(raw))
    }
}
