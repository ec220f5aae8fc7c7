//! Platform layer.
//!
//! Models the parts of the native toolkit the bridge talks to:
//! - a native view tree with layout params and measured sizes ([`NativeTree`])
//! - a display that reports its metrics on demand ([`DisplaySource`])
//! - the UI-thread context tying them together ([`UiContext`])
//!
//! `UiContext` is `!Send`. Code holding one is by construction running on the
//! UI thread, which is how widget mutation stays confined to that thread.

mod context;
mod native;

pub use context::{DisplaySource, UiContext};
pub use native::{Extent, Gravity, LayoutParams, NativeTree, NativeWidget, WidgetId, WidgetKind};
