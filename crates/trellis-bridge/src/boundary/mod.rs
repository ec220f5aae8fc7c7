//! The native boundary.
//!
//! Everything that crosses between engine code and the UI platform passes
//! through this module: the opaque [`EntryHandle`], the three entry
//! signatures, and the guard that turns a failing entry into a fatal,
//! non-unwinding error.

mod entry;
mod error;
mod handle;

pub use entry::{AppEntry, EntryRole, UiEntry, WorkerEntry};
pub use error::BridgeError;
pub use handle::EntryHandle;

pub(crate) use entry::invoke_boundary;
