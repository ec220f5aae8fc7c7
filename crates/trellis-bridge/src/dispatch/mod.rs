//! UI-thread dispatch.
//!
//! Work reaches the UI thread as a [`UiTask`] posted through a [`UiSender`].
//! A `UiTask` only ever runs with the UI thread's `UiContext`, so code inside
//! one may touch widgets; code outside one cannot.
//!
//! [`Dispatcher`] is the single-use wrapper around one engine callback:
//! `Created → Queued → Run`, with each step consuming the previous state.

mod dispatcher;
mod queue;

pub use dispatcher::Dispatcher;
pub use queue::{UiSender, UiTask};

pub(crate) use queue::UiPoster;
