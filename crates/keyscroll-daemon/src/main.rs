//! KeyScroll daemon entry point.
//!
//! Reads gesture events from stdin, one per line, and replays each gesture on
//! the X11 display as key taps or mouse wheel clicks.
//!
//! # Usage
//!
//! ```text
//! keyscroll [OPTIONS]
//!
//! Options:
//!   -c, --config <PATH>      Config file [default: $XDG_CONFIG_HOME/keyscroll/config.toml]
//!   -w, --window <ID>        Window to activate per gesture, decimal or 0x hex [default: 0]
//!       --dry-run            Log synthetic input instead of sending it
//!       --log-level <LEVEL>  tracing filter, overrides the config file
//!       --init-config        Write the default config file and exit
//! ```
//!
//! # Feed format
//!
//! ```text
//! start
//! update 0 42.5
//! finish
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()             -- TOML file or defaults
//!  └─ build emulator            -- LinuxXTestEmulator, or MockInputEmulator for --dry-run
//!  └─ ScrollActionFactory::validate()  -- a bad speed curve stops startup
//!  └─ event loop
//!       ├─ GestureFeed::next_event() -> GestureSession::handle()
//!       └─ Ctrl-C                    -> finish the active gesture and exit
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use keyscroll_daemon::application::emulate_input::{PlatformInputEmulator, WindowId};
use keyscroll_daemon::application::gesture_session::GestureSession;
use keyscroll_daemon::application::scroll_action::ScrollActionFactory;
use keyscroll_daemon::infrastructure::gesture_feed::{FeedError, GestureFeed};
use keyscroll_daemon::infrastructure::input_emulation::mock::MockInputEmulator;
use keyscroll_daemon::infrastructure::storage::config::{
    load_config, save_config, DaemonConfig, GeneralConfig,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Turns touchpad gestures into key taps or mouse wheel clicks.
#[derive(Debug, Parser)]
#[command(name = "keyscroll", version)]
struct Cli {
    /// Path of the TOML config file.
    #[arg(short, long, env = "KEYSCROLL_CONFIG")]
    config: Option<PathBuf>,

    /// X11 window activated at the start of every gesture.
    ///
    /// Accepts decimal or `0x`-prefixed hex, as printed by `xwininfo`.
    #[arg(short, long, default_value = "0", value_parser = parse_window_id)]
    window: WindowId,

    /// Log the synthetic input instead of sending it to the display.
    #[arg(long)]
    dry_run: bool,

    /// `tracing` filter directive; overrides `[general] log_level`.
    #[arg(long, env = "KEYSCROLL_LOG")]
    log_level: Option<String>,

    /// Write the default config file and exit.
    #[arg(long)]
    init_config: bool,
}

fn parse_window_id(s: &str) -> Result<WindowId, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => WindowId::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid window id {s:?}: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.init_config {
        let path = save_config(&DaemonConfig::default(), cli.config.as_deref())
            .context("failed to write default config")?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let config = load_config(cli.config.as_deref()).context("failed to load config")?;
    init_logging(cli.log_level.as_deref(), &config.general);

    info!(
        variant = ?config.action.variant,
        window = format_args!("{:#x}", cli.window),
        dry_run = cli.dry_run,
        "KeyScroll starting"
    );

    // ── Platform input emulator ───────────────────────────────────────────────
    let emulator = build_emulator(cli.dry_run, &config.general)?;

    let factory = ScrollActionFactory::new(config.action.to_action_config(), emulator);
    factory
        .validate()
        .context("speed curve produces an unusable threshold")?;
    let mut session = GestureSession::new(factory, cli.window);

    // ── Event loop ────────────────────────────────────────────────────────────
    let mut feed = GestureFeed::new(BufReader::new(tokio::io::stdin()));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                result.context("failed to listen for Ctrl-C")?;
                info!("shutdown signal received");
                break;
            }
            next = feed.next_event() => match next {
                Ok(Some(event)) => session.handle(event)?,
                Ok(None) => {
                    info!("gesture feed closed");
                    break;
                }
                Err(e @ FeedError::Malformed { .. }) => warn!("{e}"),
                Err(e) => return Err(e).context("gesture feed failed"),
            },
        }
    }

    session.end();
    info!(gestures = session.completed(), "KeyScroll stopped");
    Ok(())
}

fn init_logging(cli_level: Option<&str>, general: &GeneralConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = cli_level.unwrap_or(&general.log_level);
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_emulator(
    dry_run: bool,
    general: &GeneralConfig,
) -> anyhow::Result<Arc<dyn PlatformInputEmulator>> {
    if dry_run {
        info!("dry run: synthetic input is logged, not sent");
        return Ok(Arc::new(MockInputEmulator::logging()));
    }

    #[cfg(target_os = "linux")]
    {
        use keyscroll_daemon::infrastructure::input_emulation::linux::LinuxXTestEmulator;
        let emulator = LinuxXTestEmulator::new(general.display.as_deref())
            .context("failed to initialise X11 input emulation")?;
        Ok(Arc::new(emulator))
    }

    #[cfg(not(target_os = "linux"))]
    {
        let _ = general;
        anyhow::bail!("X11 input emulation is only available on Linux; use --dry-run")
    }
}
