//! Domain core: event values, port traits, dispatch, and the event loop.
//!
//! Nothing in this module touches a file descriptor, a process, or a
//! signal directly — all I/O flows through the port traits in
//! [`ports`], implemented by the adapters in [`crate::adapters`].

pub mod dispatch;
pub mod events;
pub mod ports;
pub mod service;
