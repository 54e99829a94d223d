//! Driven adapters — port implementations over real OS resources.

pub mod script;
pub mod serial;
pub mod time;
