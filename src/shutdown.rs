//! Signal-driven shutdown flag.
//!
//! The handler does the absolute minimum that is async-signal-safe:
//! store the signal number and set an atomic flag. The event loop
//! polls the flag at every blocking-wait boundary and owns closing the
//! link; `main` logs the signal name after the loop unwinds.
//!
//! Handlers are registered **without** `SA_RESTART`, so a pending
//! `poll(2)` returns `EINTR` instead of transparently restarting —
//! that interruption is what lets the loop observe the flag promptly.

use std::ffi::c_int;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

use crate::error::DaemonError;

/// Set by the handler, read by the event loop. Never cleared.
static SHUTDOWN: AtomicBool = AtomicBool::new(false);
/// The most recent signal that requested shutdown (0 = none).
static LAST_SIGNAL: AtomicI32 = AtomicI32::new(0);

/// Signals that request a clean shutdown.
const SHUTDOWN_SIGNALS: [Signal; 4] = [
    Signal::SIGHUP,
    Signal::SIGINT,
    Signal::SIGQUIT,
    Signal::SIGTERM,
];

extern "C" fn on_signal(sig: c_int) {
    LAST_SIGNAL.store(sig, Ordering::Relaxed);
    SHUTDOWN.store(true, Ordering::Release);
}

/// Install the shutdown handler for every signal in the table.
pub fn install_handlers() -> Result<(), DaemonError> {
    let action = SigAction::new(
        SigHandler::Handler(on_signal),
        SaFlags::empty(), // no SA_RESTART: blocking waits must see EINTR
        SigSet::empty(),
    );
    for sig in SHUTDOWN_SIGNALS {
        // SAFETY: the handler only performs atomic stores, which are
        // async-signal-safe; no prior handler needs preserving.
        unsafe { sigaction(sig, &action) }.map_err(DaemonError::Signals)?;
    }
    Ok(())
}

/// The process-wide shutdown flag the event loop polls.
pub fn flag() -> &'static AtomicBool {
    &SHUTDOWN
}

/// The signal that triggered shutdown, if any was delivered.
pub fn last_signal() -> Option<Signal> {
    match LAST_SIGNAL.load(Ordering::Relaxed) {
        0 => None,
        raw => Signal::try_from(raw).ok(),
    }
}
