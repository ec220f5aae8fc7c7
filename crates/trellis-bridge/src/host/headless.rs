use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

use crate::boundary::{AppEntry, BridgeError};
use crate::coords::DisplayMetrics;
use crate::dispatch::{UiPoster, UiSender, UiTask};
use crate::platform::{DisplaySource, UiContext};
use crate::root::{RootContainer, SavedState};

/// Headless host configuration.
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    /// Initial display; change it later with
    /// [`HeadlessHost::set_display_metrics`].
    pub display: DisplayMetrics,
}

struct ChannelPoster(Sender<UiTask>);

impl UiPoster for ChannelPoster {
    fn post(&self, task: UiTask) -> Result<(), BridgeError> {
        self.0.send(task).map_err(|_| BridgeError::UiLoopClosed)
    }
}

#[derive(Clone)]
struct SharedDisplay(Rc<Cell<DisplayMetrics>>);

impl DisplaySource for SharedDisplay {
    fn metrics(&self) -> DisplayMetrics {
        self.0.get()
    }
}

/// A UI host without a window, driven step by step by its owner.
///
/// The thread that creates the host is its UI thread. Tasks posted from any
/// thread queue up until [`run_pending`](Self::run_pending) or
/// [`run_until`](Self::run_until) drains them. Dropping the host closes the
/// queue; later posts fail with [`BridgeError::UiLoopClosed`].
pub struct HeadlessHost {
    context: UiContext,
    display: SharedDisplay,
    receiver: Receiver<UiTask>,
    root: Option<RootContainer>,
    root_created: bool,
    ui_thread: ThreadId,
}

impl HeadlessHost {
    pub fn new(config: HostConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let display = SharedDisplay(Rc::new(Cell::new(config.display)));
        let context = UiContext::new(display.clone(), UiSender::new(ChannelPoster(tx)));

        log::debug!("headless host up ({:?})", config.display);

        Self {
            context,
            display,
            receiver: rx,
            root: None,
            root_created: false,
            ui_thread: thread::current().id(),
        }
    }

    pub fn context(&self) -> &UiContext {
        &self.context
    }

    /// A sender for this host's queue; clone freely and move to any thread.
    pub fn sender(&self) -> UiSender {
        self.context.sender().clone()
    }

    pub fn ui_thread(&self) -> ThreadId {
        self.ui_thread
    }

    /// Simulates a display change (rotation, density switch).
    pub fn set_display_metrics(&self, metrics: DisplayMetrics) {
        self.display.0.set(metrics);
        self.context.request_layout();
    }

    /// Creates the root container and runs `entry` with it.
    ///
    /// A host creates its root at most once, even after
    /// [`destroy_root`](Self::destroy_root).
    pub fn create_root(
        &mut self,
        saved_state: Option<SavedState>,
        entry: AppEntry,
    ) -> Result<(), BridgeError> {
        if self.root_created {
            return Err(BridgeError::RootAlreadyCreated);
        }
        self.root_created = true;

        self.root = Some(RootContainer::on_create(&self.context, saved_state, entry));
        self.context.layout();
        Ok(())
    }

    pub fn root(&self) -> Option<&RootContainer> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut RootContainer> {
        self.root.as_mut()
    }

    pub fn destroy_root(&mut self) {
        if let Some(mut root) = self.root.take() {
            root.on_destroy();
        }
    }

    /// One loop step: runs every task queued so far, then lays out.
    ///
    /// Returns the number of tasks run. Tasks posted while the step runs wait
    /// for the next step.
    pub fn run_pending(&mut self) -> usize {
        let batch: Vec<UiTask> = self.receiver.try_iter().collect();
        let ran = batch.len();

        for task in batch {
            task.run(&self.context);
        }
        self.context.layout();

        if ran > 0 {
            log::trace!("ran {ran} ui task(s)");
        }
        ran
    }

    /// Runs tasks as they arrive until `done` holds or `timeout` elapses.
    ///
    /// `done` is checked before waiting and after every task. Returns its
    /// final value.
    pub fn run_until<F>(&mut self, timeout: Duration, mut done: F) -> bool
    where
        F: FnMut(&UiContext) -> bool,
    {
        let deadline = Instant::now() + timeout;

        loop {
            if done(&self.context) {
                return true;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(task) => {
                    task.run(&self.context);
                    self.context.layout();
                }
                Err(RecvTimeoutError::Timeout) => return done(&self.context),
                // Unreachable while the context holds a sender.
                Err(RecvTimeoutError::Disconnected) => return done(&self.context),
            }
        }
    }
}

impl Drop for HeadlessHost {
    fn drop(&mut self) {
        self.destroy_root();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::coords::Density;
    use crate::worker::spawn_worker;

    #[test]
    fn tasks_wait_for_a_step() {
        let mut host = HeadlessHost::new(HostConfig::default());

        let sender = host.sender();
        sender.run_on_ui(|_| {}).unwrap();
        sender.run_on_ui(|_| {}).unwrap();

        assert_eq!(host.run_pending(), 2);
        assert_eq!(host.run_pending(), 0);
    }

    #[test]
    fn tasks_posted_during_a_step_run_next_step() {
        thread_local! {
            static ORDER: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
        }

        let mut host = HeadlessHost::new(HostConfig::default());
        host.sender()
            .run_on_ui(|ctx| {
                ORDER.with(|o| o.borrow_mut().push("outer"));
                ctx.sender()
                    .run_on_ui(|_| ORDER.with(|o| o.borrow_mut().push("inner")))
                    .unwrap();
            })
            .unwrap();

        assert_eq!(host.run_pending(), 1);
        assert_eq!(ORDER.with(|o| o.borrow().clone()), vec!["outer"]);
        assert_eq!(host.run_pending(), 1);
        assert_eq!(ORDER.with(|o| o.borrow().clone()), vec!["outer", "inner"]);
    }

    #[test]
    fn tasks_run_on_the_ui_thread() {
        let mut host = HeadlessHost::new(HostConfig::default());
        let ui = host.ui_thread();
        let seen = std::sync::Arc::new(parking_lot::Mutex::new(None));

        let slot = seen.clone();
        spawn_worker(&host.sender(), move |sender| {
            let _ = sender.run_on_ui(move |_| *slot.lock() = Some(thread::current().id()));
        })
        .unwrap();

        assert!(host.run_until(Duration::from_secs(5), |_| seen.lock().is_some()));
        assert_eq!(*seen.lock(), Some(ui));
    }

    #[test]
    fn run_until_times_out() {
        let mut host = HeadlessHost::new(HostConfig::default());
        let start = Instant::now();

        assert!(!host.run_until(Duration::from_millis(30), |_| false));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn display_changes_are_seen_fresh() {
        let host = HeadlessHost::new(HostConfig::default());
        assert_eq!(host.context().density(), Density::new(3.0).unwrap());

        host.set_display_metrics(DisplayMetrics::new(800, 1280, 2.0).unwrap());
        assert_eq!(host.context().density(), Density::new(2.0).unwrap());
        assert_eq!(host.context().display_metrics().width_pixels, 800);
    }

    #[test]
    fn posting_after_drop_fails() {
        let host = HeadlessHost::new(HostConfig::default());
        let sender = host.sender();
        drop(host);

        let err = sender.run_on_ui(|_| {}).unwrap_err();
        assert!(matches!(err, BridgeError::UiLoopClosed));
    }
}
