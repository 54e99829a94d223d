//! Event-to-script dispatch.
//!
//! For every emitted [`PanelEvent`] two script names are tried in the
//! working directory: the catch-all `allevent` first, then the
//! code-specific `event-XX` (two lowercase hex digits). Each script
//! that exists as an executable regular file is run synchronously with
//! the arguments
//!
//! ```text
//! <device> <hex-code> <timestamp-sec> <delta-sec>
//! ```
//!
//! The two invocations are independent: a missing script, a spawn
//! failure, or a non-zero exit from one never blocks the other, and
//! none of them affect loop health.

use log::{debug, error, info};

use super::events::PanelEvent;
use super::ports::ScriptRunner;

/// Catch-all script name, tried for every event.
const CATCH_ALL_SCRIPT: &str = "allevent";
/// Prefix for code-specific script names.
const CODE_SCRIPT_PREFIX: &str = "event-";

/// Locates and runs event scripts through a [`ScriptRunner`].
pub struct Dispatcher {
    /// Device path handed to the scripts as their first argument.
    device: String,
}

impl Dispatcher {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
        }
    }

    /// Name of the code-specific script for `code`.
    pub fn code_script_name(code: u8) -> String {
        format!("{CODE_SCRIPT_PREFIX}{code:02x}")
    }

    /// Run the catch-all and code-specific scripts for `event`,
    /// in that order, each independently of the other's outcome.
    pub fn dispatch(&self, event: &PanelEvent, runner: &mut impl ScriptRunner) {
        self.try_script(CATCH_ALL_SCRIPT, event, runner);
        self.try_script(&Self::code_script_name(event.code), event, runner);
    }

    fn try_script(&self, name: &str, event: &PanelEvent, runner: &mut impl ScriptRunner) {
        if !runner.is_executable(name) {
            debug!("  not executable: {name}");
            return;
        }

        let args = [
            self.device.clone(),
            format!("{:02x}", event.code),
            event.timestamp_sec.to_string(),
            event.delta_sec.to_string(),
        ];

        info!("  exec: {name}");
        match runner.run(name, &args) {
            Ok(Some(0)) => debug!("  {name}: exit 0"),
            Ok(Some(status)) => info!("  {name}: exit {status}"),
            Ok(None) => info!("  {name}: killed by signal"),
            Err(err) => error!("  {name}: {err}"),
        }
    }
}
