//! CLI argument definitions for the sideload updater.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "sideload",
    version,
    about = "Check for, download, and install application updates",
    long_about = "Check a remote update server for a newer application build,\n\
                  download the package with progress reporting, and hand it\n\
                  to the platform installer."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Query the update server and report whether a newer build exists.
    Check(ServerArgs),

    /// Check, download the newer package, and hand it to the installer.
    Update(UpdateArgs),
}

#[derive(Parser)]
pub struct ServerArgs {
    /// Base URL of the update server (manifest at <URL>/version.json).
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: String,

    /// Version code of the running build.
    #[arg(long = "current-code", value_name = "CODE")]
    pub current_code: u32,

    /// Version name of the running build.
    #[arg(long = "current-name", value_name = "NAME", default_value = "0.0.0")]
    pub current_name: String,
}

#[derive(Parser)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    /// Directory downloaded packages are written to (default: system temp).
    #[arg(long = "package-dir", value_name = "DIR")]
    pub package_dir: Option<PathBuf>,

    /// Skip the confirmation prompt and download immediately.
    #[arg(long = "yes", short = 'y')]
    pub assume_yes: bool,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
