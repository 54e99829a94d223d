//! avrpaneld library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. Everything that touches a real file descriptor, process,
//! or signal lives under `adapters`, `daemon`, and `shutdown`; the
//! domain core in `app` and `drivers` only sees port traits.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod drivers;
pub mod error;

pub mod adapters;
pub mod daemon;
pub mod shutdown;
