//! The serial event loop — the daemon's hexagonal core.
//!
//! ```text
//!  LinkPort ──▶ ┌──────────────────────────┐
//!               │        EventLoop         │ ──▶ ScriptRunner
//!     Clock ──▶ │  Debouncer · Dispatcher  │
//!               └──────────────────────────┘
//! ```
//!
//! State machine per cycle:
//!
//! ```text
//! WAITING ──▶ READING ──▶ (SUPPRESSED | DISPATCHING) ──▶ WAITING
//!    │                                                     ▲
//!    └──── ERROR_RETRY (bounded, 50) ──────────────────────┘
//! ```
//!
//! A shared atomic shutdown flag is polled at every blocking-wait
//! boundary; the signal handler only sets the flag, and the loop owns
//! closing the link on every termination path. Script execution is
//! synchronous, so a long-running script delays all subsequent event
//! processing — accepted trade-off for a strictly single-threaded core.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, info};

use crate::drivers::debounce::Debouncer;

use super::dispatch::Dispatcher;
use super::ports::{Clock, LinkPort, ScriptRunner, Wait};

/// Consecutive wait/read errors tolerated before giving up.
const RETRY_LIMIT: u32 = 50;
/// Delay applied after every cycle to bound the polling rate.
const CYCLE_DELAY_MS: u64 = 10;

/// Why the loop stopped. Every reason maps to a non-zero exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The shutdown flag was observed set.
    ShutdownRequested,
    /// The error-retry counter reached its bound.
    RetriesExhausted,
}

/// Orchestrates link, debouncer, and dispatcher for the process lifetime.
pub struct EventLoop {
    debouncer: Debouncer,
    dispatcher: Dispatcher,
}

impl EventLoop {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            debouncer: Debouncer::new(),
            dispatcher,
        }
    }

    /// Run until shutdown is requested or retries are exhausted.
    /// The link is closed before returning, on every path.
    pub fn run(
        &mut self,
        link: &mut impl LinkPort,
        runner: &mut impl ScriptRunner,
        clock: &impl Clock,
        shutdown: &AtomicBool,
    ) -> StopReason {
        let mut retries: u32 = 0;

        loop {
            if shutdown.load(Ordering::Acquire) {
                info!("shutdown requested, closing link");
                link.close();
                return StopReason::ShutdownRequested;
            }

            match link.wait_readable() {
                Err(err) => {
                    retries += 1;
                    error!("{err}: retry={retries}");
                    if retries >= RETRY_LIMIT {
                        error!("give up after {RETRY_LIMIT} consecutive I/O errors");
                        link.close();
                        return StopReason::RetriesExhausted;
                    }
                    clock.sleep_ms(CYCLE_DELAY_MS);
                    continue;
                }
                // Signal delivery; re-check the shutdown flag at the top.
                Ok(Wait::Interrupted) => continue,
                Ok(Wait::Empty) => {
                    debug!("wait: empty");
                    clock.sleep_ms(CYCLE_DELAY_MS);
                    continue;
                }
                Ok(Wait::Ready) => {}
            }

            let now_ms = clock.now_ms();
            match link.read_byte() {
                Err(err) => {
                    retries += 1;
                    error!("{err}: retry={retries}");
                    if retries >= RETRY_LIMIT {
                        error!("give up after {RETRY_LIMIT} consecutive I/O errors");
                        link.close();
                        return StopReason::RetriesExhausted;
                    }
                }
                Ok(None) => {
                    retries = 0;
                    debug!("read: empty");
                }
                Ok(Some(code)) => {
                    retries = 0;
                    match self.debouncer.observe(code, now_ms) {
                        Some(event) => {
                            info!("event[{}]: code={:#04x}", event.timestamp_sec, event.code);
                            self.dispatcher.dispatch(&event, runner);
                        }
                        None => debug!("suppressed repeat: code={code:#04x}"),
                    }
                }
            }

            clock.sleep_ms(CYCLE_DELAY_MS);
        }
    }
}
