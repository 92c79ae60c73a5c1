//! Headless state machine for the update flow.
//!
//! This is the state a confirmation dialog or status screen renders, kept
//! behind an API so any frontend can drive it. One check and one download may be
//! in flight at a time; re-triggers while busy are ignored. There is no
//! cancellation: a dialog that goes away does not stop the transfer, and
//! late events are applied (or harmlessly dropped) against whatever state
//! the flow is in.

use crate::download::DownloadEvent;
use crate::error::Result;
use crate::release::VersionInfo;

/// Toast text shown when the running build is current.
pub const UP_TO_DATE_TEXT: &str = "App is up to date";

/// Title of the update confirmation dialog.
pub const UPDATE_AVAILABLE_TITLE: &str = "Update Available";

/// Update flow state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UpdateFlow {
    /// No check in flight and nothing to show.
    #[default]
    Idle,

    /// Manifest request in flight.
    Checking,

    /// Running build is current. Swallowed check failures land here too.
    UpToDate,

    /// Newer build advertised; waiting for confirmation.
    Available {
        /// The advertised build.
        info: VersionInfo,
    },

    /// Package transfer in flight.
    Downloading {
        /// The build being fetched.
        info: VersionInfo,
        /// Last reported fraction in `[0, 1]`; never decreases.
        progress: f64,
    },

    /// Package handed to the platform installer.
    Installing {
        /// The build that was downloaded.
        info: VersionInfo,
    },

    /// Download failed; terminal until a new check is started.
    Failed {
        /// Verbatim error message for the notification.
        message: String,
    },
}

impl UpdateFlow {
    /// Begins a version check.
    ///
    /// Returns `false` (and leaves the state alone) while a check or
    /// download is already in flight.
    pub fn start_check(&mut self) -> bool {
        match self {
            Self::Checking | Self::Downloading { .. } => false,
            _ => {
                *self = Self::Checking;
                true
            }
        }
    }

    /// Applies the result of a version check.
    ///
    /// Check failures are collapsed into the up-to-date presentation; the
    /// user cannot tell them apart, only the log can.
    pub fn finish_check(&mut self, result: Result<Option<VersionInfo>>) {
        if !matches!(self, Self::Checking) {
            return;
        }
        *self = match result {
            Ok(Some(info)) => Self::Available { info },
            Ok(None) => Self::UpToDate,
            Err(err) => {
                tracing::warn!("Update check failed: {err}");
                Self::UpToDate
            }
        };
    }

    /// Begins the download of the advertised build.
    ///
    /// Returns `false` unless an update is currently offered.
    pub fn start_download(&mut self) -> bool {
        let Self::Available { info } = self else {
            return false;
        };
        let info = info.clone();
        *self = Self::Downloading {
            info,
            progress: 0.0,
        };
        true
    }

    /// Applies one event from the download stream.
    ///
    /// Events arriving while the flow is not downloading are dropped.
    pub fn apply_download_event(&mut self, event: Result<DownloadEvent>) {
        let Self::Downloading { info, progress } = self else {
            return;
        };
        match event {
            Ok(DownloadEvent::Progress(p)) => {
                let fraction = p.fraction().clamp(0.0, 1.0);
                if fraction > *progress {
                    *progress = fraction;
                }
            }
            Ok(DownloadEvent::Complete(_)) => {
                let info = info.clone();
                *self = Self::Installing { info };
            }
            Err(err) => {
                *self = Self::Failed {
                    message: err.to_string(),
                };
            }
        }
    }

    /// Dismisses whatever the flow is showing.
    ///
    /// Refused (returns `false`) while a download is in flight, matching
    /// the dialog that cannot be dismissed mid-transfer.
    pub fn dismiss(&mut self) -> bool {
        if self.is_downloading() {
            return false;
        }
        *self = Self::Idle;
        true
    }

    /// Whether a download is currently in flight.
    #[must_use]
    pub fn is_downloading(&self) -> bool {
        matches!(self, Self::Downloading { .. })
    }

    /// Current download progress, when one is in flight.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        match self {
            Self::Downloading { progress, .. } => Some(*progress),
            _ => None,
        }
    }

    /// Dialog title, when a dialog should be visible.
    #[must_use]
    pub fn dialog_title(&self) -> Option<&'static str> {
        match self {
            Self::Available { .. } | Self::Downloading { .. } | Self::Installing { .. } => {
                Some(UPDATE_AVAILABLE_TITLE)
            }
            _ => None,
        }
    }

    /// Dialog body text, when a dialog should be visible.
    #[must_use]
    pub fn dialog_text(&self) -> Option<String> {
        match self {
            Self::Available { info }
            | Self::Downloading { info, .. }
            | Self::Installing { info } => Some(format!("New version: {}", info.version_name)),
            _ => None,
        }
    }

    /// Transient notification text, if this state warrants one.
    #[must_use]
    pub fn toast(&self) -> Option<String> {
        match self {
            Self::UpToDate => Some(UP_TO_DATE_TEXT.to_string()),
            Self::Failed { message } => Some(message.clone()),
            _ => None,
        }
    }
}
