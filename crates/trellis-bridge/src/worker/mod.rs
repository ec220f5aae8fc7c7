//! Dedicated worker threads running engine entry points off the UI thread.
//!
//! Workers are fire-and-forget: there is no join handle and no cancellation.
//! A worker that needs the UI posts a `Dispatcher` through the [`UiSender`]
//! it is handed.
//!
//! [`UiSender`]: crate::dispatch::UiSender

mod thread;

pub use thread::{spawn_worker, WorkerConfig, WorkerThread};
