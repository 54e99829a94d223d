//! Port traits — the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ EventLoop (domain)
//! ```
//!
//! Driven adapters (the serial link, the shell runner, the system clock)
//! implement these traits. The [`EventLoop`](super::service::EventLoop)
//! consumes them via generics, so the domain core never touches a real
//! descriptor and the whole loop runs against mocks in tests.

use crate::error::{DispatchError, LinkError};

// ───────────────────────────────────────────────────────────────
// Serial link port
// ───────────────────────────────────────────────────────────────

/// Outcome of a blocking readability wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// The descriptor is readable; a read should follow.
    Ready,
    /// The wait returned without data (kept for parity with `select`
    /// semantics; unreachable with an infinite timeout).
    Empty,
    /// The wait was interrupted by a signal. Not an error — the caller
    /// re-checks the shutdown flag and waits again.
    Interrupted,
}

/// The serial link to the front-panel microcontroller.
///
/// One byte per event, no framing. The link is opened once at startup
/// and never reopened within a run; `close` must be idempotent because
/// every termination path calls it.
pub trait LinkPort {
    /// Block until the link is readable, interrupted, or failed.
    fn wait_readable(&mut self) -> Result<Wait, LinkError>;

    /// Read exactly one byte. `Ok(None)` is a valid zero-length read
    /// (peer closed or nothing buffered), not an error.
    fn read_byte(&mut self) -> Result<Option<u8>, LinkError>;

    /// Close the link. Safe to call more than once.
    fn close(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Script runner port
// ───────────────────────────────────────────────────────────────

/// Narrow spawn-and-wait capability for event scripts.
///
/// Script names are relative to the working directory established at
/// startup. The domain builds the names and arguments; the adapter owns
/// the shell mechanics.
pub trait ScriptRunner {
    /// Whether `name` exists as an executable regular file.
    fn is_executable(&self, name: &str) -> bool;

    /// Run `name` with `args`, blocking until it exits. Returns the
    /// child's exit code, or `None` if it was killed by a signal.
    fn run(&mut self, name: &str, args: &[String]) -> Result<Option<i32>, DispatchError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Time source and delay primitive for the event loop.
pub trait Clock {
    /// Wall-clock milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;

    /// Sleep for the inter-cycle delay. Mocks advance virtual time here.
    fn sleep_ms(&self, ms: u64);
}
