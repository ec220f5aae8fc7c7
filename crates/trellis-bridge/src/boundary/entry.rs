use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::dispatch::UiSender;
use crate::platform::UiContext;
use crate::root::RootContainer;

use super::EntryHandle;

/// Application entry, invoked once by [`RootContainer`] creation.
pub type AppEntry = fn(&UiContext, &mut RootContainer);

/// Dispatched-callback entry, invoked on the UI thread by a `Dispatcher`.
pub type UiEntry = fn(&UiContext, EntryHandle);

/// Worker entry, invoked on a dedicated thread by a `WorkerThread`.
pub type WorkerEntry = fn(&UiSender, EntryHandle);

/// Which boundary role a call is made in. Used for diagnostics only.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EntryRole {
    Application,
    Dispatched,
    Worker,
}

impl fmt::Display for EntryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryRole::Application => "application",
            EntryRole::Dispatched => "dispatched",
            EntryRole::Worker => "worker",
        })
    }
}

/// Runs one engine entry call.
///
/// A panic must never unwind into host code, so a failing entry is logged
/// and the process aborts. There is no retry.
pub(crate) fn invoke_boundary<F>(role: EntryRole, call: F)
where
    F: FnOnce(),
{
    log::trace!("entering engine ({role} entry)");

    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(call)) {
        log::error!(
            "{role} entry failed: {}; aborting",
            panic_message(payload.as_ref())
        );
        std::process::abort();
    }

    log::trace!("left engine ({role} entry)");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
