//! Root container: the one native container the engine's UI hangs off.

mod container;

pub use container::{RootContainer, SavedState};
