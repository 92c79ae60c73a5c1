//! Package download with streamed progress.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use async_stream::stream;
use futures_util::{Stream, StreamExt};
use reqwest::header::{HeaderValue, USER_AGENT};

use crate::client::USER_AGENT_VALUE;
use crate::config::UpdateConfig;
use crate::error::{Result, UpdateError};
use crate::release::VersionInfo;

/// Progress snapshot for an in-flight download.
#[derive(Debug, Clone, Copy)]
pub struct DownloadProgress {
    /// Bytes written so far.
    pub downloaded: u64,
    /// Total bytes expected.
    pub total: u64,
}

impl DownloadProgress {
    /// Progress as a fraction in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.downloaded as f64 / self.total as f64).min(1.0)
    }
}

/// Event yielded by [`download_package`].
#[derive(Debug, Clone)]
pub enum DownloadEvent {
    /// Progress update, yielded for every received chunk while the total
    /// size is known.
    Progress(DownloadProgress),
    /// Package fully written to the given path.
    Complete(PathBuf),
}

/// Downloads the package for `info` into the configured package directory.
///
/// Yields ordered progress events followed by a terminal
/// [`DownloadEvent::Complete`], or a single `Err` after which the stream
/// ends. Events come from one producer in FIFO order, so fractions observed
/// by the consumer never decrease.
///
/// When the target file already exists the network is skipped entirely:
/// full progress and `Complete` are reported immediately. The existing file
/// is not validated against the remote, so a truncated file left by an
/// earlier failed run is reported complete as well.
///
/// When the response carries no `Content-Length`, no progress events are
/// yielded; the download still completes. A failed transfer leaves the
/// partially written file on disk.
pub fn download_package(
    config: &UpdateConfig,
    info: &VersionInfo,
) -> impl Stream<Item = Result<DownloadEvent>> + Send + 'static {
    let target = config.package_path(info);
    let url = info.url.clone();

    stream! {
        if target.exists() {
            tracing::info!("Package already present at {}, skipping download", target.display());
            yield Ok(DownloadEvent::Progress(DownloadProgress { downloaded: 1, total: 1 }));
            yield Ok(DownloadEvent::Complete(target));
            return;
        }

        tracing::info!("Starting package download from {}", url);

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                yield Err(e.into());
                return;
            }
        };

        let status = response.status();
        if !status.is_success() {
            yield Err(UpdateError::Server { status: status.as_u16() });
            return;
        }

        let total = response.content_length();

        let mut file = match File::create(&target) {
            Ok(f) => f,
            Err(e) => {
                yield Err(e.into());
                return;
            }
        };

        let mut downloaded: u64 = 0;
        let mut body = response.bytes_stream();

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    yield Err(UpdateError::Network(e.to_string()));
                    return;
                }
            };

            if let Err(e) = file.write_all(&chunk) {
                yield Err(e.into());
                return;
            }
            downloaded += chunk.len() as u64;

            if let Some(total) = total {
                yield Ok(DownloadEvent::Progress(DownloadProgress { downloaded, total }));
            }
        }

        if let Err(e) = file.flush() {
            yield Err(e.into());
            return;
        }

        if downloaded == 0 {
            yield Err(UpdateError::EmptyBody);
            return;
        }

        tracing::info!("Download complete: {} bytes written to {}", downloaded, target.display());
        yield Ok(DownloadEvent::Complete(target));
    }
}
