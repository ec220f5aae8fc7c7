//! UI hosts.
//!
//! A host owns the UI thread's queue and drives it. [`HeadlessHost`] is
//! driven by hand; the windowed host lives in [`crate::window`].

mod headless;

pub use headless::{HeadlessHost, HostConfig};
