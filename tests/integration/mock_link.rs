//! Mock link, clock, and script runner for event-loop tests.
//!
//! The link is scripted: each step describes one wait/read cycle. The
//! clock is virtual and shared with the link, so a step can pin the
//! exact wall time at which its byte is observed; `sleep_ms` advances
//! virtual time instead of blocking.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use avrpaneld::app::ports::{Clock, LinkPort, ScriptRunner, Wait};
use avrpaneld::error::{DispatchError, LinkError};

// ── Scripted link ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Wait reports ready; the read yields `code` at virtual time `at_ms`.
    Byte { at_ms: u64, code: u8 },
    /// Wait reports ready; the read is zero-length.
    EmptyRead,
    /// The readability wait fails.
    WaitError,
    /// The wait succeeds but the read fails.
    ReadError,
    /// The wait is interrupted by a signal.
    Interrupted,
}

pub struct MockLink {
    steps: Vec<Step>,
    cursor: usize,
    pending_read: Option<Step>,
    now: Rc<Cell<u64>>,
    shutdown: Arc<AtomicBool>,
    pub closed: bool,
}

impl MockLink {
    /// When the script runs out, the link requests shutdown so the
    /// loop unwinds instead of spinning forever.
    pub fn new(steps: Vec<Step>, now: Rc<Cell<u64>>, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            steps,
            cursor: 0,
            pending_read: None,
            now,
            shutdown,
            closed: false,
        }
    }
}

impl LinkPort for MockLink {
    fn wait_readable(&mut self) -> Result<Wait, LinkError> {
        let Some(&step) = self.steps.get(self.cursor) else {
            self.shutdown.store(true, Ordering::Release);
            return Ok(Wait::Interrupted);
        };
        self.cursor += 1;

        match step {
            Step::Byte { at_ms, .. } => {
                self.now.set(at_ms);
                self.pending_read = Some(step);
                Ok(Wait::Ready)
            }
            Step::EmptyRead | Step::ReadError => {
                self.pending_read = Some(step);
                Ok(Wait::Ready)
            }
            Step::WaitError => Err(LinkError::Wait(nix::Error::EIO)),
            Step::Interrupted => Ok(Wait::Interrupted),
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>, LinkError> {
        match self.pending_read.take() {
            Some(Step::Byte { code, .. }) => Ok(Some(code)),
            Some(Step::EmptyRead) => Ok(None),
            Some(Step::ReadError) => Err(LinkError::Read(std::io::Error::other("mock"))),
            _ => Ok(None),
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

// ── Virtual clock ─────────────────────────────────────────────

pub struct MockClock {
    now: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn new(now: Rc<Cell<u64>>) -> Self {
        Self { now }
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn sleep_ms(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

// ── Recording runner ──────────────────────────────────────────

#[derive(Default)]
pub struct MockRunner {
    pub executable: Vec<&'static str>,
    pub calls: Vec<(String, Vec<String>)>,
}

impl MockRunner {
    pub fn new(executable: Vec<&'static str>) -> Self {
        Self {
            executable,
            calls: Vec::new(),
        }
    }

    pub fn call_names(&self) -> Vec<&str> {
        self.calls.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl ScriptRunner for MockRunner {
    fn is_executable(&self, name: &str) -> bool {
        self.executable.contains(&name)
    }

    fn run(&mut self, name: &str, args: &[String]) -> Result<Option<i32>, DispatchError> {
        self.calls.push((name.to_owned(), args.to_vec()));
        Ok(Some(0))
    }
}
