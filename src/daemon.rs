//! Daemonization and pid-file lifecycle.
//!
//! `daemonize()` is the classic detach: fork (parent exits), start a
//! new session, point stdio at `/dev/null`. It must run before the
//! logger is initialized so the syslog connection belongs to the
//! detached child.
//!
//! The pid file is best-effort, matching the original daemon's
//! behaviour: creation failure is logged and the daemon carries on;
//! when it was created it is removed on drop.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use std::process;

use log::{debug, error};
use nix::unistd::{ForkResult, dup2, fork, setsid};

use crate::error::DaemonError;

/// Detach from the controlling terminal and session.
pub fn daemonize() -> Result<(), DaemonError> {
    // SAFETY: single-threaded at this point (called before any thread
    // or signal handler is set up), so fork-then-continue is sound.
    match unsafe { fork() }.map_err(DaemonError::Fork)? {
        ForkResult::Parent { .. } => process::exit(0),
        ForkResult::Child => {}
    }

    setsid().map_err(DaemonError::Setsid)?;

    let devnull = OpenOptions::new()
        .read(true)
        .write(true)
        .open("/dev/null")
        .map_err(DaemonError::Stdio)?;
    for fd in 0..=2 {
        dup2(devnull.as_raw_fd(), fd)
            .map_err(|e| DaemonError::Stdio(std::io::Error::from_raw_os_error(e as i32)))?;
    }

    Ok(())
}

/// Pid file that removes itself when dropped.
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Write the current pid to `path`. Failure is logged and yields
    /// `None` — the daemon runs without a pid file rather than dying.
    pub fn create(path: &Path) -> Option<Self> {
        match Self::write_pid(path) {
            Ok(()) => {
                debug!("pidfile: \"{}\"", path.display());
                Some(Self {
                    path: path.to_owned(),
                })
            }
            Err(err) => {
                error!("can't write pidfile \"{}\": {err}", path.display());
                None
            }
        }
    }

    fn write_pid(path: &Path) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        write!(file, "{}", process::id())?;
        Ok(())
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            error!("can't remove pidfile \"{}\": {err}", self.path.display());
        }
    }
}
