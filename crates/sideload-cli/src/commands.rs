//! Command implementations for the sideload CLI.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use futures_util::{StreamExt, pin_mut};
use indicatif::{ProgressBar, ProgressStyle};
use sideload_updater::flow::UP_TO_DATE_TEXT;
use sideload_updater::{
    DownloadEvent, UpdateClient, UpdateConfig, UpdateFlow, download_package, install_package,
};

use crate::cli::{ServerArgs, UpdateArgs};

/// Query the update server and report the result.
pub async fn run_check(args: &ServerArgs) -> anyhow::Result<()> {
    let config = build_config(args, None);
    let client = UpdateClient::new(config).context("building update client")?;

    let mut flow = UpdateFlow::default();
    flow.start_check();
    flow.finish_check(client.check_for_update().await);

    match &flow {
        UpdateFlow::Available { info } => {
            println!("{}", flow.dialog_title().unwrap_or_default());
            println!(
                "{} (code {})",
                flow.dialog_text().unwrap_or_default(),
                info.version_code
            );
        }
        _ => println!("{UP_TO_DATE_TEXT}"),
    }

    Ok(())
}

/// Check, download, and dispatch the newer package to the installer.
pub async fn run_update(args: &UpdateArgs) -> anyhow::Result<()> {
    let config = build_config(&args.server, args.package_dir.clone());
    std::fs::create_dir_all(&config.package_dir).with_context(|| {
        format!(
            "creating package directory {}",
            config.package_dir.display()
        )
    })?;

    let client = UpdateClient::new(config.clone()).context("building update client")?;

    let mut flow = UpdateFlow::default();
    flow.start_check();
    flow.finish_check(client.check_for_update().await);

    let UpdateFlow::Available { info } = flow.clone() else {
        println!("{UP_TO_DATE_TEXT}");
        return Ok(());
    };

    println!("{}", flow.dialog_title().unwrap_or_default());
    println!("{}", flow.dialog_text().unwrap_or_default());

    if !args.assume_yes && !confirm("Download and install?")? {
        return Ok(());
    }

    flow.start_download();
    let bar = progress_bar();

    let events = download_package(&config, &info);
    pin_mut!(events);

    let mut package = None;
    while let Some(event) = events.next().await {
        if let Ok(DownloadEvent::Complete(path)) = &event {
            package = Some(path.clone());
        }
        flow.apply_download_event(event);
        if let Some(progress) = flow.progress() {
            bar.set_position((progress * 100.0) as u64);
        }
    }
    bar.finish_and_clear();

    match package {
        Some(path) => {
            match install_package(&path) {
                Ok(()) => println!("Package handed to the installer: {}", path.display()),
                Err(err) => {
                    // Dispatch failures surface as a notification, never as
                    // a failed update.
                    tracing::warn!("Install dispatch failed: {err}");
                    eprintln!("{}", err.user_message());
                }
            }
            Ok(())
        }
        None => {
            let message = flow
                .toast()
                .unwrap_or_else(|| "download failed".to_string());
            anyhow::bail!("{message}")
        }
    }
}

fn build_config(args: &ServerArgs, package_dir: Option<PathBuf>) -> UpdateConfig {
    let package_dir =
        package_dir.unwrap_or_else(|| std::env::temp_dir().join("sideload"));
    UpdateConfig::new(args.base_url.as_str(), package_dir)
        .with_current_version(args.current_code, args.current_name.as_str())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    if !io::stdin().is_terminal() {
        // Refuse rather than hang when there is nobody to answer.
        eprintln!("stdin is not a terminal; pass --yes to proceed without confirmation");
        return Ok(false);
    }

    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {percent:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
