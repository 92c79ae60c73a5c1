//! Updater configuration.

use std::path::PathBuf;

use crate::release::VersionInfo;

/// Explicit capability object for the update flow.
///
/// Carries everything the flow needs from its host: where the manifest
/// lives, where downloaded packages land, and which build is currently
/// running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateConfig {
    /// Base URL of the update server. The manifest is expected at
    /// `<base_url>/version.json`.
    pub base_url: String,

    /// Directory downloaded packages are written to.
    pub package_dir: PathBuf,

    /// Version code of the running build.
    pub current_version_code: u32,

    /// Version name of the running build.
    pub current_version_name: String,
}

impl UpdateConfig {
    /// Creates a config for the given server and package directory.
    ///
    /// The running build defaults to version code 0; set it with
    /// [`UpdateConfig::with_current_version`].
    #[must_use]
    pub fn new(base_url: impl Into<String>, package_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            package_dir: package_dir.into(),
            current_version_code: 0,
            current_version_name: String::new(),
        }
    }

    /// Sets the running build's version.
    #[must_use]
    pub fn with_current_version(mut self, code: u32, name: impl Into<String>) -> Self {
        self.current_version_code = code;
        self.current_version_name = name.into();
        self
    }

    /// URL of the version manifest.
    #[must_use]
    pub fn manifest_url(&self) -> String {
        format!("{}/version.json", self.base_url.trim_end_matches('/'))
    }

    /// Local path the given build's package is written to.
    #[must_use]
    pub fn package_path(&self, info: &VersionInfo) -> PathBuf {
        self.package_dir.join(info.package_file_name())
    }
}
