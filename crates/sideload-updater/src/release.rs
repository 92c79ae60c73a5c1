//! Version manifest types.

use serde::{Deserialize, Serialize};

/// Descriptor of the latest build advertised by the update server.
///
/// Deserialized from the `version.json` manifest. Consumed once per check;
/// nothing is persisted. Two checks against an unchanged manifest produce
/// equal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    /// Monotonically increasing build number.
    pub version_code: u32,

    /// Human-readable version string (e.g. "1.2.0").
    pub version_name: String,

    /// Absolute URL of the installable package.
    pub url: String,
}

impl VersionInfo {
    /// Whether this build is newer than the given running build.
    #[must_use]
    pub fn is_newer_than(&self, current_code: u32) -> bool {
        self.version_code > current_code
    }

    /// Deterministic local file name for this build's package.
    #[must_use]
    pub fn package_file_name(&self) -> String {
        format!("app_v{}.apk", self.version_code)
    }
}
