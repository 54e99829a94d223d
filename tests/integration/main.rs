//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the event loop
//! against mock adapters. No serial hardware or real scripts required.

mod event_loop_tests;
mod mock_link;
