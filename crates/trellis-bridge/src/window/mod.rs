//! Windowed host.
//!
//! Owns the `winit` EventLoop and Window and drives the UI queue from the
//! event loop's user events.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
