//! Shell script runner adapter.
//!
//! Implements [`ScriptRunner`] by handing a command line to the
//! configured shell: `<shell> -c "./<script> <args...>"`. Script names
//! resolve relative to the working directory, which `main` pins to the
//! script directory once at startup. `std::process::Command` is the
//! spawn-and-wait primitive; a failed exec terminates the child instead
//! of ever returning into this process's control flow.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::process::Command;

use crate::app::ports::ScriptRunner;
use crate::error::DispatchError;

/// Owner-execute permission bit.
const S_IXUSR: u32 = 0o100;

/// Runs event scripts through a command shell.
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl ScriptRunner for ShellRunner {
    fn is_executable(&self, name: &str) -> bool {
        fs::metadata(name)
            .map(|m| m.is_file() && m.permissions().mode() & S_IXUSR != 0)
            .unwrap_or(false)
    }

    fn run(&mut self, name: &str, args: &[String]) -> Result<Option<i32>, DispatchError> {
        let cmdline = format!("./{} {}", name, args.join(" "));
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(&cmdline)
            .status()
            .map_err(|source| DispatchError::Spawn {
                script: name.to_owned(),
                source,
            })?;
        Ok(status.code())
    }
}
