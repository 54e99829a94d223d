//! Outbound panel events.
//!
//! The [`Debouncer`](crate::drivers::debounce::Debouncer) emits these;
//! the [`Dispatcher`](super::dispatch::Dispatcher) consumes them
//! immediately. They are transient values — constructed, dispatched,
//! discarded. Timestamps are already truncated to whole seconds, which
//! is the resolution handed to the event scripts.

/// A debounced front-panel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelEvent {
    /// Raw event code as received from the microcontroller.
    pub code: u8,
    /// Wall-clock time of the observation, whole seconds since the epoch.
    pub timestamp_sec: u64,
    /// Elapsed whole seconds since the relevant prior occurrence
    /// (0 on a code's first-ever observation).
    pub delta_sec: u64,
}
