//! Serial link adapter for the front-panel AVR.
//!
//! Implements [`LinkPort`] over a character device. The line
//! configuration is preserved bit-for-bit from the microcontroller's
//! UART expectations — 9600 baud, 8 data bits, two stop bits, parity
//! generation *and* input parity checking, local mode, output
//! post-processing, raw non-canonical input with zeroed control
//! characters (`VMIN=0`/`VTIME=0`, which is what makes a zero-length
//! read a valid outcome rather than an error). Do not "optimize" these
//! bits; the hardware depends on the exact combination.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::os::fd::AsFd;
use std::os::unix::fs::OpenOptionsExt;

use log::{debug, error};
use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use nix::sys::termios::{
    self, BaudRate, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg,
};

use crate::app::ports::{LinkPort, Wait};
use crate::error::LinkError;

/// Priming sequence markers; each is written four times consecutively.
const HANDSHAKE_MARKERS: [u8; 3] = *b"RTZ";
/// Repetitions per marker (12 bytes total).
const HANDSHAKE_REPEAT: usize = 4;

/// Owns the serial descriptor and its line configuration.
pub struct SerialLink {
    path: String,
    file: Option<File>,
}

impl SerialLink {
    /// Open `path` read/write without becoming the controlling TTY and
    /// apply the fixed line configuration. Either failure is fatal to
    /// the whole process; there is no retry.
    pub fn open(path: &str) -> Result<Self, LinkError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY)
            .open(path)
            .map_err(|source| LinkError::Open {
                path: path.to_owned(),
                source,
            })?;

        Self::configure(&file).map_err(|source| LinkError::Configure {
            path: path.to_owned(),
            source,
        })?;
        debug!("open: \"{path}\"");

        Ok(Self {
            path: path.to_owned(),
            file: Some(file),
        })
    }

    fn configure(file: &File) -> Result<(), nix::Error> {
        let mut tio = termios::tcgetattr(file.as_fd())?;

        tio.input_flags = InputFlags::INPCK;
        tio.output_flags = OutputFlags::OPOST;
        tio.control_flags = ControlFlags::CS8
            | ControlFlags::CSTOPB
            | ControlFlags::CREAD
            | ControlFlags::PARENB
            | ControlFlags::CLOCAL;
        tio.local_flags = LocalFlags::empty();
        tio.control_chars = [0 as libc::cc_t; libc::NCCS];
        termios::cfsetspeed(&mut tio, BaudRate::B9600)?;

        termios::tcsetattr(file.as_fd(), SetArg::TCSANOW, &tio)
    }

    /// Device path this link was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Write the fixed priming sequence: each marker repeated four
    /// times. A short write is a logged, non-fatal error; the sequence
    /// continues regardless.
    pub fn send_handshake(&mut self) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        for marker in HANDSHAKE_MARKERS {
            let chunk = [marker; HANDSHAKE_REPEAT];
            match file.write(&chunk) {
                Ok(n) if n == chunk.len() => {
                    debug!("write: code={:#04x}({})", marker, marker as char);
                }
                Ok(n) => error!("write error: short write ({n} of {})", chunk.len()),
                Err(err) => error!("write error: {err}"),
            }
        }
    }
}

impl LinkPort for SerialLink {
    fn wait_readable(&mut self) -> Result<Wait, LinkError> {
        let Some(file) = self.file.as_ref() else {
            return Err(LinkError::Closed);
        };

        let mut fds = [PollFd::new(file.as_fd(), PollFlags::POLLIN)];
        match poll(&mut fds, PollTimeout::NONE) {
            // Interrupted by a signal; the loop re-checks the
            // shutdown flag. Handlers are installed without
            // SA_RESTART precisely so this wakes the wait.
            Err(Errno::EINTR) => Ok(Wait::Interrupted),
            Err(err) => Err(LinkError::Wait(err)),
            Ok(0) => Ok(Wait::Empty),
            Ok(_) => {
                let readable = fds[0].revents().is_some_and(|r| {
                    r.intersects(PollFlags::POLLIN | PollFlags::POLLHUP | PollFlags::POLLERR)
                });
                Ok(if readable { Wait::Ready } else { Wait::Empty })
            }
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>, LinkError> {
        let Some(file) = self.file.as_mut() else {
            return Err(LinkError::Closed);
        };

        let mut buf = [0u8; 1];
        match file.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(err) => Err(LinkError::Read(err)),
        }
    }

    fn close(&mut self) {
        if let Some(file) = self.file.take() {
            drop(file);
            debug!("close: \"{}\"", self.path);
        }
    }
}
