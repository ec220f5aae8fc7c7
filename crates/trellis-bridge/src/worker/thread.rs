use std::thread;

use crate::boundary::{invoke_boundary, BridgeError, EntryHandle, EntryRole, WorkerEntry};
use crate::dispatch::UiSender;

/// Worker thread configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// OS thread name, visible in debuggers and panic messages.
    pub name: String,
    /// Stack size in bytes; `None` uses the platform default.
    pub stack_size: Option<usize>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            name: "trellis-worker".to_string(),
            stack_size: None,
        }
    }
}

enum Callback {
    Entry { entry: WorkerEntry, handle: EntryHandle },
    Closure(Box<dyn FnOnce(&UiSender) + Send + 'static>),
}

/// One engine callback bound to a not-yet-started OS thread.
///
/// [`start`](Self::start) consumes the value, so each instance spawns at most
/// one thread and invokes its callback at most once.
pub struct WorkerThread {
    callback: Callback,
    sender: UiSender,
    config: WorkerConfig,
}

impl WorkerThread {
    pub fn new(sender: &UiSender, entry: WorkerEntry, handle: EntryHandle) -> Self {
        Self {
            callback: Callback::Entry { entry, handle },
            sender: sender.clone(),
            config: WorkerConfig::default(),
        }
    }

    pub fn from_closure<F>(sender: &UiSender, job: F) -> Self
    where
        F: FnOnce(&UiSender) + Send + 'static,
    {
        Self {
            callback: Callback::Closure(Box::new(job)),
            sender: sender.clone(),
            config: WorkerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: WorkerConfig) -> Self {
        self.config = config;
        self
    }

    /// Spawns the thread. The callback runs once on it, then the thread exits.
    ///
    /// The thread is detached; nothing synchronises it with the UI thread or
    /// with other workers.
    pub fn start(self) -> Result<(), BridgeError> {
        let WorkerThread { callback, sender, config } = self;

        let mut builder = thread::Builder::new().name(config.name.clone());
        if let Some(size) = config.stack_size {
            builder = builder.stack_size(size);
        }

        builder
            .spawn(move || {
                invoke_boundary(EntryRole::Worker, || match callback {
                    Callback::Entry { entry, handle } => entry(&sender, handle),
                    Callback::Closure(job) => job(&sender),
                });
            })
            .map_err(|source| BridgeError::WorkerSpawn {
                name: config.name.clone(),
                source,
            })?;

        log::debug!("worker `{}` started", config.name);
        Ok(())
    }
}

/// Fire-and-forget form of [`WorkerThread::from_closure`] + [`WorkerThread::start`].
pub fn spawn_worker<F>(sender: &UiSender, job: F) -> Result<(), BridgeError>
where
    F: FnOnce(&UiSender) + Send + 'static,
{
    WorkerThread::from_closure(sender, job).start()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::host::{HeadlessHost, HostConfig};
    use crate::platform::UiContext;

    const WAIT: Duration = Duration::from_secs(5);

    thread_local! {
        static DELIVERED: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
    }

    fn deliver(_: &UiContext, handle: EntryHandle) {
        DELIVERED.with(|d| d.borrow_mut().push(handle.into_raw()));
    }

    // Worker entry: hands its token straight back to the UI thread.
    fn bounce(sender: &UiSender, handle: EntryHandle) {
        let _ = Dispatcher::new(deliver, handle).queue(sender);
    }

    #[test]
    fn closure_runs_once_on_a_distinct_thread() {
        let host = HeadlessHost::new(HostConfig::default());
        let (tx, rx) = mpsc::channel();

        spawn_worker(&host.sender(), move |_| {
            let _ = tx.send(thread::current().id());
        })
        .unwrap();

        let worker_thread = rx.recv_timeout(WAIT).unwrap();
        assert_ne!(worker_thread, host.ui_thread());
        // The closure (and its sender half) is gone after the single call.
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn entry_handle_round_trips_through_worker_and_dispatcher() {
        let mut host = HeadlessHost::new(HostConfig::default());

        WorkerThread::new(&host.sender(), bounce, EntryHandle::from_raw(0xBEEF))
            .start()
            .unwrap();

        let done = host.run_until(WAIT, |_| DELIVERED.with(|d| !d.borrow().is_empty()));
        assert!(done);
        assert_eq!(DELIVERED.with(|d| d.borrow().clone()), vec![0xBEEF]);
    }

    #[test]
    fn config_names_the_thread() {
        let host = HeadlessHost::new(HostConfig::default());
        let (tx, rx) = mpsc::channel();

        WorkerThread::from_closure(&host.sender(), move |_| {
            let _ = tx.send(thread::current().name().map(str::to_owned));
        })
        .with_config(WorkerConfig {
            name: "layout-prefetch".to_string(),
            stack_size: Some(256 * 1024),
        })
        .start()
        .unwrap();

        assert_eq!(rx.recv_timeout(WAIT).unwrap().as_deref(), Some("layout-prefetch"));
    }

    #[test]
    fn captured_state_is_released_after_the_call() {
        let host = HeadlessHost::new(HostConfig::default());
        let shared = Arc::new(());
        let (tx, rx) = mpsc::channel();

        let captured = Arc::clone(&shared);
        spawn_worker(&host.sender(), move |_| {
            let _held = &captured;
            let _ = tx.send(());
        })
        .unwrap();

        rx.recv_timeout(WAIT).unwrap();
        // The send happens before the closure is dropped; poll briefly.
        let deadline = std::time::Instant::now() + WAIT;
        while Arc::strong_count(&shared) > 1 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(Arc::strong_count(&shared), 1);
    }
}
