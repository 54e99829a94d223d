//! Pure drivers — stateful logic with no I/O of its own.

pub mod debounce;
