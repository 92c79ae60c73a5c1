//! Client-side self-update for sideloaded application packages.
//!
//! This crate checks a remote endpoint for a newer build, downloads the
//! package with streamed progress, and hands the downloaded file to the
//! platform installer.
//!
//! # Overview
//!
//! The update server publishes a `version.json` manifest naming the latest
//! build (version code, display name, package URL). The flow is strictly
//! sequential and user-driven:
//!
//! - [`UpdateClient::check_for_update`] fetches the manifest and compares
//!   it to the running build.
//! - [`download_package`] streams the package to a deterministic local file,
//!   yielding ordered progress events. An already-present file short-circuits
//!   the network entirely.
//! - [`install_package`] dispatches the file to the OS default handler.
//! - [`UpdateFlow`] is the headless state machine a frontend renders:
//!   `Idle → Checking → { UpToDate | Available } → Downloading →
//!   { Installing | Failed }`.
//!
//! There are no retries, no resumption, and no verification of a previously
//! downloaded file; a failed download leaves its partial file behind.
//!
//! # Example
//!
//! ```no_run
//! use futures_util::{StreamExt, pin_mut};
//! use sideload_updater::{UpdateClient, UpdateConfig, UpdateFlow, download_package};
//!
//! async fn run() -> sideload_updater::Result<()> {
//!     let config = UpdateConfig::new("http://updates.example", "/data/packages")
//!         .with_current_version(3, "1.0.0");
//!     let client = UpdateClient::new(config.clone())?;
//!
//!     let mut flow = UpdateFlow::default();
//!     flow.start_check();
//!     flow.finish_check(client.check_for_update().await);
//!
//!     if let UpdateFlow::Available { info } = flow.clone() {
//!         flow.start_download();
//!         let events = download_package(&config, &info);
//!         pin_mut!(events);
//!         while let Some(event) = events.next().await {
//!             flow.apply_download_event(event);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod flow;
pub mod install;
pub mod release;

pub use client::UpdateClient;
pub use config::UpdateConfig;
pub use download::{DownloadEvent, DownloadProgress, download_package};
pub use error::{Result, UpdateError};
pub use flow::UpdateFlow;
pub use install::install_package;
pub use release::VersionInfo;

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
