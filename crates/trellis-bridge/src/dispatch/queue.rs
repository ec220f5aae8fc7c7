use std::fmt;
use std::sync::Arc;

use crate::boundary::{invoke_boundary, BridgeError, EntryRole};
use crate::platform::UiContext;

type UiJob = Box<dyn FnOnce(&UiContext) + Send + 'static>;

/// A unit of work that may only execute on the UI thread.
///
/// Anyone can build a task; only a UI host can run it, because running needs
/// the host's [`UiContext`].
pub struct UiTask {
    job: UiJob,
}

impl UiTask {
    pub fn new<F>(job: F) -> Self
    where
        F: FnOnce(&UiContext) + Send + 'static,
    {
        Self { job: Box::new(job) }
    }

    pub(crate) fn run(self, context: &UiContext) {
        let job = self.job;
        invoke_boundary(EntryRole::Dispatched, || job(context));
    }
}

impl fmt::Debug for UiTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UiTask { .. }")
    }
}

/// Host-specific delivery of tasks onto the UI thread's queue.
pub(crate) trait UiPoster: Send + Sync {
    fn post(&self, task: UiTask) -> Result<(), BridgeError>;
}

/// Cloneable, thread-safe handle for posting work to one UI thread.
///
/// Tasks posted through clones of the same sender from one thread run in
/// post order. There is no ordering between different posting threads.
#[derive(Clone)]
pub struct UiSender {
    poster: Arc<dyn UiPoster>,
}

impl UiSender {
    pub(crate) fn new(poster: impl UiPoster + 'static) -> Self {
        Self {
            poster: Arc::new(poster),
        }
    }

    /// Enqueues `task`; it runs on the UI thread during a later loop step.
    ///
    /// Fails with [`BridgeError::UiLoopClosed`] once the host is gone, in which
    /// case the task is dropped unrun.
    pub fn post(&self, task: UiTask) -> Result<(), BridgeError> {
        self.poster.post(task)
    }

    /// Shorthand for `post(UiTask::new(job))`.
    pub fn run_on_ui<F>(&self, job: F) -> Result<(), BridgeError>
    where
        F: FnOnce(&UiContext) + Send + 'static,
    {
        self.post(UiTask::new(job))
    }
}

impl fmt::Debug for UiSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UiSender { .. }")
    }
}
