//! Trellis bridge crate.
//!
//! Lets a Rust UI engine drive a native widget toolkit: coordinate
//! conversion between points and pixels, widget wrappers, the root
//! container, UI-thread dispatch and worker threads.

pub mod boundary;
pub mod coords;
pub mod dispatch;
pub mod host;
pub mod platform;
pub mod root;
pub mod widget;
pub mod window;
pub mod worker;

pub mod logging;
