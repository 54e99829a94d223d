//! Daemon configuration.
//!
//! All runtime parameters for avrpaneld. Values come from the command
//! line; the defaults match the paths the init scripts historically
//! expect on the appliance.

use std::path::PathBuf;

/// Serial device connected to the front-panel AVR.
pub const DEFAULT_DEVICE: &str = "/dev/ttyS1";
/// Directory holding the `allevent` / `event-XX` scripts.
pub const DEFAULT_SCRIPT_DIR: &str = "/etc/avrpaneld";
/// Shell used to invoke event scripts.
pub const DEFAULT_SHELL: &str = "/bin/sh";
/// Pid file written while the daemon runs.
pub const DEFAULT_PIDFILE: &str = "/var/run/avrpaneld.pid";

/// Core daemon configuration.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Serial device path.
    pub device: String,
    /// Script directory; becomes the working directory at startup.
    pub script_dir: PathBuf,
    /// Shell for script invocation (`<shell> -c "..."`).
    pub shell: String,
    /// Pid file path.
    pub pidfile: PathBuf,
    /// Stay in the foreground instead of daemonizing.
    pub foreground: bool,
    /// Enable debug-level logging.
    pub verbose: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_owned(),
            script_dir: PathBuf::from(DEFAULT_SCRIPT_DIR),
            shell: DEFAULT_SHELL.to_owned(),
            pidfile: PathBuf::from(DEFAULT_PIDFILE),
            foreground: false,
            verbose: false,
        }
    }
}
