//! Debounce state machine for raw panel codes.
//!
//! ## Hardware
//!
//! The AVR streams one byte per poll tick for as long as a button is
//! held, so a single press arrives as a burst of identical codes. Two
//! codes (`0x20` and `0x22`) carry the appliance's press/hold
//! signaling and get special treatment:
//!
//! - an identical repeat within the 2-second window is suppressed,
//!   collapsing the burst into one logical event;
//! - when such a code does emit, its delta is computed against the
//!   *paired* code's last timestamp (`code + 1` in the table), i.e.
//!   "time since the opposite edge" instead of "time since myself".
//!
//! Every other code always emits, with a plain per-code delta.
//!
//! State is never reset mid-run: after the first full cycle every code
//! has a nonzero reference, and only a code's first-ever observation
//! reports a delta of zero.

use crate::app::events::PanelEvent;

/// Suppression window for identical repeats of a paired code.
const REPEAT_WINDOW_MS: u64 = 2000;

/// Codes whose deltas reference their paired edge (`code + 1`).
const PAIRED_CODES: [u8; 2] = [0x20, 0x22];

/// Debounce state: the last code seen plus a last-seen timestamp for
/// every possible code. Mutated only by [`observe`](Debouncer::observe);
/// owned solely by the event loop.
pub struct Debouncer {
    last_code: Option<u8>,
    /// Milliseconds since the epoch per code; 0 means "never observed".
    last_seen_ms: [u64; 256],
}

impl Debouncer {
    pub fn new() -> Self {
        Self {
            last_code: None,
            last_seen_ms: [0; 256],
        }
    }

    /// Feed one raw code observed at `now_ms`.
    /// Returns the event to dispatch, or `None` if the code was
    /// suppressed as a rapid repeat.
    pub fn observe(&mut self, code: u8, now_ms: u64) -> Option<PanelEvent> {
        let prev_code = self.last_code.replace(code);
        let same_as_prev = prev_code == Some(code);

        let prev_seen = self.last_seen_ms[code as usize];
        self.last_seen_ms[code as usize] = now_ms;

        let mut delta_ms = if prev_seen != 0 {
            now_ms.saturating_sub(prev_seen)
        } else {
            0
        };

        if PAIRED_CODES.contains(&code) {
            if same_as_prev && delta_ms < REPEAT_WINDOW_MS {
                return None;
            }
            // Reference the paired edge's timestamp, not our own.
            let paired_seen = self.last_seen_ms[code as usize + 1];
            delta_ms = if paired_seen != 0 {
                now_ms.saturating_sub(paired_seen)
            } else {
                0
            };
        }

        Some(PanelEvent {
            code,
            timestamp_sec: now_ms / 1000,
            delta_sec: delta_ms / 1000,
        })
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
