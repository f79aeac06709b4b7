//! `airgrid` — terminal admin console for WiFi infrastructure.
//!
//! Sections are navigable via number keys (1-7): Dashboard, Networks,
//! Access Points, Clients, Alerts, Users, and Settings. Data comes
//! from either the REST backend or the deterministic mock layer; the
//! choice is resolved from config at startup and shown in the status
//! bar.
//!
//! Logs are written to a file (default `/tmp/airgrid.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod jobs;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use airgrid_core::Gateway;

use crate::app::App;
use crate::screens::RuntimeInfo;

/// Terminal admin console for WiFi infrastructure.
#[derive(Parser, Debug)]
#[command(name = "airgrid", version, about)]
struct Cli {
    /// Backend API base URL (e.g. https://wifi.ocean.local/api)
    #[arg(short = 'a', long, env = "AIRGRID_API_BASE")]
    api_base: Option<String>,

    /// Force the seeded mock data layer (no backend required)
    #[arg(long, env = "AIRGRID_MOCK")]
    mock: bool,

    /// Feature flag payload (JSON object, JSON array, or CSV)
    #[arg(long, env = "AIRGRID_FEATURE_FLAGS")]
    feature_flags: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/airgrid.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. The returned guard must live for the
/// whole run so logs flush on exit.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("airgrid={log_level}")));

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("airgrid.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    // Config file + env, then CLI flags on top
    let mut config = airgrid_config::load_config_or_default();
    if cli.api_base.is_some() {
        config.api_base.clone_from(&cli.api_base);
    }
    if cli.mock {
        config.mock = Some(true);
    }
    if cli.feature_flags.is_some() {
        config.feature_flags.clone_from(&cli.feature_flags);
    }

    let gateway_settings = config.resolve_gateway();
    info!(
        mode = gateway_settings.mode.label(),
        api_base = config.api_base.as_deref().unwrap_or("(unset)"),
        "starting airgrid"
    );

    let gateway =
        Gateway::from_settings(&gateway_settings).map_err(|e| eyre!("gateway setup: {e}"))?;

    let runtime = RuntimeInfo {
        gateway_mode: gateway_settings.mode.label(),
        api_base: config.api_base.clone(),
        ws_url: config.ws_url.clone(),
        flags_raw: config.feature_flags.clone(),
    };

    let prefs = airgrid_config::prefs::load_prefs();

    let mut app = App::new(gateway, runtime, config.page_size, prefs);
    app.run().await?;

    Ok(())
}
