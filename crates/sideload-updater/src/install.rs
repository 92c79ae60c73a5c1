//! Installer dispatch for downloaded packages.

use std::path::Path;

use crate::error::{Result, UpdateError};

/// Hands the downloaded package to the OS default handler.
///
/// The platform decides what opening an installable package means; on a
/// desktop OS this launches the associated installer. Dispatch failures are
/// reported to the immediate caller only and are expected to surface as a
/// notification, never as a failed download.
pub fn install_package(path: &Path) -> Result<()> {
    // The handler needs a stable absolute path, not one relative to our cwd.
    let path = path
        .canonicalize()
        .map_err(|e| UpdateError::Install(format!("cannot resolve {}: {e}", path.display())))?;

    tracing::info!("Dispatching {} to the platform installer", path.display());

    open::that(&path)
        .map_err(|e| UpdateError::Install(format!("installer dispatch failed: {e}")))?;

    Ok(())
}
