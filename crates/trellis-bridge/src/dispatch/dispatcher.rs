use std::sync::atomic::{AtomicU64, Ordering};

use crate::boundary::{BridgeError, EntryHandle, UiEntry};
use crate::platform::UiContext;

use super::{UiSender, UiTask};

static NEXT_DISPATCHER: AtomicU64 = AtomicU64::new(1);

enum Callback {
    Entry { entry: UiEntry, handle: EntryHandle },
    Closure(Box<dyn FnOnce(&UiContext) + Send + 'static>),
}

/// Single-use wrapper that marshals one engine callback onto the UI thread.
///
/// [`queue`](Self::queue) consumes the dispatcher and the UI loop consumes the
/// resulting task, so the callback can neither be queued nor run twice.
/// Instances share nothing except the UI queue they are posted to.
pub struct Dispatcher {
    id: u64,
    callback: Callback,
}

impl Dispatcher {
    /// Wraps a boundary entry together with the handle it will consume.
    pub fn new(entry: UiEntry, handle: EntryHandle) -> Self {
        Self::with_callback(Callback::Entry { entry, handle })
    }

    /// Wraps a Rust closure instead of a raw entry/handle pair.
    pub fn from_closure<F>(job: F) -> Self
    where
        F: FnOnce(&UiContext) + Send + 'static,
    {
        Self::with_callback(Callback::Closure(Box::new(job)))
    }

    fn with_callback(callback: Callback) -> Self {
        let id = NEXT_DISPATCHER.fetch_add(1, Ordering::Relaxed);
        log::trace!("dispatcher #{id}: created");
        Self { id, callback }
    }

    /// Process-unique id, for diagnostics.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Posts this dispatcher to the UI thread's queue.
    ///
    /// The callback runs exactly once during a later UI loop step. It must not
    /// block: the loop is cooperative and not reentrant.
    pub fn queue(self, sender: &UiSender) -> Result<(), BridgeError> {
        let id = self.id;
        sender.post(UiTask::from(self)).inspect_err(|e| {
            log::warn!("dispatcher #{id}: not queued: {e}");
        })?;
        log::trace!("dispatcher #{id}: queued");
        Ok(())
    }

    fn run(self, context: &UiContext) {
        log::trace!("dispatcher #{}: run", self.id);
        match self.callback {
            Callback::Entry { entry, handle } => entry(context, handle),
            Callback::Closure(job) => job(context),
        }
    }
}

impl From<Dispatcher> for UiTask {
    fn from(dispatcher: Dispatcher) -> Self {
        UiTask::new(move |context| dispatcher.run(context))
    }
}
