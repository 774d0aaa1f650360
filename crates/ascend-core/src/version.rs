//! Version numbers shown by the console and the next version to create.
//!
//! The console displays versions as `major` or `major.minor`. The next
//! version is the semver minor increment with the patch component dropped,
//! so `12` becomes `12.1` and `1.2` becomes `1.3`.

use crate::{Error, Result};
use semver::{BuildMetadata, Prerelease, Version};

/// Version currently published on the ready-for-sale page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedVersion {
    raw: String,
    version: Version,
}

impl PublishedVersion {
    /// Parse the version header text, ignoring any leading non-digit label
    pub fn from_header(header: &str) -> Result<Self> {
        let raw = header
            .trim_start_matches(|c: char| !c.is_ascii_digit())
            .trim()
            .to_string();

        let version =
            normalize(&raw).ok_or_else(|| Error::InvalidVersion(header.trim().to_string()))?;

        Ok(Self { raw, version })
    }

    /// Numeric form as read from the console
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Next minor version in console form
    pub fn next_minor(&self) -> Result<String> {
        let minor = self
            .version
            .minor
            .checked_add(1)
            .ok_or_else(|| Error::InvalidVersion(self.raw.clone()))?;

        let next = Version {
            major: self.version.major,
            minor,
            patch: 0,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        };

        let full = next.to_string();
        Ok(full.strip_suffix(".0").unwrap_or(&full).to_string())
    }
}

/// Pad a `major` or `major.minor` string out to a full semver version
fn normalize(raw: &str) -> Option<Version> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let padded = match raw.split('.').count() {
        1 => format!("{}.0.0", raw),
        2 => format!("{}.0", raw),
        3 => raw.to_string(),
        _ => return None,
    };

    Version::parse(&padded).ok()
}
