//! Unified error types for the daemon.
//!
//! Every fallible subsystem gets its own enum, and all of them funnel
//! into the top-level [`Error`] so the entry point handles a single
//! type. Variants carry their OS-level source so log lines keep the
//! underlying errno text.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fatal operation in the daemon funnels into this type.
///
/// Dispatch errors are deliberately absent: spawn failures and script
/// exit codes are dispatch-local, logged where they happen, and never
/// propagate to loop health.
#[derive(Debug, Error)]
pub enum Error {
    /// The serial link could not be opened, configured, or used.
    #[error("link: {0}")]
    Link(#[from] LinkError),

    /// Daemonization, pid-file, or signal plumbing failed.
    #[error("daemon: {0}")]
    Daemon(#[from] DaemonError),
}

// ---------------------------------------------------------------------------
// Serial link errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LinkError {
    /// The device path could not be opened for read/write.
    #[error("open failed: \"{path}\": {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The termios line configuration could not be applied.
    #[error("line configuration failed: \"{path}\": {source}")]
    Configure {
        path: String,
        #[source]
        source: nix::Error,
    },

    /// The readability wait returned an error (other than EINTR).
    #[error("wait failed: {0}")]
    Wait(#[source] nix::Error),

    /// A single-byte read returned an error.
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    /// The link was used after `close()`.
    #[error("link closed")]
    Closed,
}

// ---------------------------------------------------------------------------
// Dispatch errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The shell could not be spawned for a script.
    #[error("spawn failed: \"{script}\": {source}")]
    Spawn {
        script: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Daemonization errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("fork failed: {0}")]
    Fork(#[source] nix::Error),

    #[error("setsid failed: {0}")]
    Setsid(#[source] nix::Error),

    #[error("stdio redirect failed: {0}")]
    Stdio(#[source] std::io::Error),

    #[error("signal handler registration failed: {0}")]
    Signals(#[source] nix::Error),

    #[error("chdir failed: \"{path}\": {source}")]
    Chdir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Daemon-wide `Result` alias.
pub type Result<T> = std::result::Result<T, Error>;
