//! avrpaneld — entry point.
//!
//! Orchestration only: CLI parsing, daemonization, logging backend,
//! pid file, signal registration, and wiring the adapters into the
//! event loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                Adapters (outer ring)                 │
//! │                                                      │
//! │  SerialLink        ShellRunner        SystemClock    │
//! │  (LinkPort)        (ScriptRunner)     (Clock)        │
//! │                                                      │
//! │  ───────────── Port Trait Boundary ──────────────    │
//! │                                                      │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │        EventLoop (pure orchestration)          │  │
//! │  │        Debouncer · Dispatcher                  │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use syslog::Facility;

use avrpaneld::adapters::script::ShellRunner;
use avrpaneld::adapters::serial::SerialLink;
use avrpaneld::adapters::time::SystemClock;
use avrpaneld::app::dispatch::Dispatcher;
use avrpaneld::app::service::{EventLoop, StopReason};
use avrpaneld::config::{self, DaemonConfig};
use avrpaneld::daemon::{self, PidFile};
use avrpaneld::error::{DaemonError, Error};
use avrpaneld::shutdown;

/// Exit status for every fatal path, matching the historical daemon.
const EXIT_FATAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "avrpaneld",
    version,
    about = "Front-panel AVR monitoring daemon: dispatches serial button events to scripts"
)]
struct Cli {
    /// Serial device connected to the front-panel AVR
    #[arg(short = 'P', long = "device", default_value = config::DEFAULT_DEVICE)]
    device: String,

    /// Directory holding the allevent / event-XX scripts
    #[arg(short = 'S', long = "scripts", default_value = config::DEFAULT_SCRIPT_DIR)]
    scripts: PathBuf,

    /// Pid file path
    #[arg(long = "pidfile", default_value = config::DEFAULT_PIDFILE)]
    pidfile: PathBuf,

    /// Stay in the foreground (log to stderr instead of syslog)
    #[arg(short = 'N', long = "foreground")]
    foreground: bool,

    /// Enable debug-level logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> DaemonConfig {
        DaemonConfig {
            device: self.device,
            script_dir: self.scripts,
            pidfile: self.pidfile,
            foreground: self.foreground,
            verbose: self.verbose,
            ..DaemonConfig::default()
        }
    }
}

fn main() -> ExitCode {
    let cfg = Cli::parse().into_config();

    // ── 1. Detach, then pick the log backend ──────────────────
    // Daemonize before logging so the syslog connection belongs to
    // the detached child.
    if !cfg.foreground {
        if let Err(err) = daemon::daemonize() {
            eprintln!("avrpaneld: {err}");
            return ExitCode::from(EXIT_FATAL);
        }
    }

    let level = if cfg.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if cfg.foreground {
        env_logger::Builder::new().filter_level(level).init();
    } else if let Err(err) = syslog::init(Facility::LOG_USER, level, Some("avrpaneld")) {
        eprintln!("avrpaneld: syslog init failed: {err}");
        return ExitCode::from(EXIT_FATAL);
    }

    info!("avrpaneld v{} starting", env!("CARGO_PKG_VERSION"));

    match run(&cfg) {
        Ok(reason) => {
            info!("stopped: {reason:?}");
            ExitCode::from(EXIT_FATAL)
        }
        Err(err) => {
            error!("{err}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(cfg: &DaemonConfig) -> Result<StopReason, Error> {
    // ── 2. Signals + pid file ─────────────────────────────────
    shutdown::install_handlers()?;
    let _pidfile = PidFile::create(&cfg.pidfile);

    // ── 3. Script directory becomes the working directory ─────
    env::set_current_dir(&cfg.script_dir).map_err(|source| DaemonError::Chdir {
        path: cfg.script_dir.clone(),
        source,
    })?;
    debug!("chdir: \"{}\"", cfg.script_dir.display());

    // ── 4. Open and prime the link ────────────────────────────
    let mut link = SerialLink::open(&cfg.device)?;
    link.send_handshake();

    // ── 5. Event loop ─────────────────────────────────────────
    let dispatcher = Dispatcher::new(cfg.device.clone());
    let mut runner = ShellRunner::new(cfg.shell.clone());
    let clock = SystemClock;

    info!("monitoring \"{}\"", cfg.device);
    let reason = EventLoop::new(dispatcher).run(&mut link, &mut runner, &clock, shutdown::flag());

    if let Some(sig) = shutdown::last_signal() {
        info!("signal: {}", sig.as_str());
    }
    Ok(reason)
}
