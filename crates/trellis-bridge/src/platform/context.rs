use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::coords::{Density, DisplayMetrics};
use crate::dispatch::UiSender;

use super::{NativeTree, NativeWidget, WidgetId};

/// Source of display metrics for a UI host.
///
/// Queried on every conversion; implementations must report the current
/// value rather than one captured at startup.
pub trait DisplaySource {
    fn metrics(&self) -> DisplayMetrics;
}

/// Handle to the UI thread's platform state.
///
/// Cloning is cheap and shares the same state. The type is `!Send`: a
/// `UiContext` only exists on the thread of the host that created it, and
/// engine code on other threads reaches the UI through [`UiSender`].
#[derive(Clone)]
pub struct UiContext {
    inner: Rc<ContextInner>,
}

struct ContextInner {
    display: Box<dyn DisplaySource>,
    tree: RefCell<NativeTree>,
    sender: UiSender,
}

impl UiContext {
    pub(crate) fn new(display: impl DisplaySource + 'static, sender: UiSender) -> Self {
        Self {
            inner: Rc::new(ContextInner {
                display: Box::new(display),
                tree: RefCell::new(NativeTree::new()),
                sender,
            }),
        }
    }

    /// Current display metrics, fetched fresh from the platform.
    pub fn display_metrics(&self) -> DisplayMetrics {
        self.inner.display.metrics()
    }

    /// Current density, fetched fresh from the platform.
    pub fn density(&self) -> Density {
        self.display_metrics().density
    }

    /// Sender for posting work back onto this UI thread.
    pub fn sender(&self) -> &UiSender {
        &self.inner.sender
    }

    /// Snapshot of one native widget.
    pub fn widget(&self, id: WidgetId) -> Option<NativeWidget> {
        self.with_tree(|tree| tree.get(id).cloned())
    }

    /// Measured size in device pixels; `(0, 0)` until a layout pass reaches it.
    pub fn measured_size(&self, id: WidgetId) -> (i32, i32) {
        self.with_tree(|tree| tree.measured_size(id))
    }

    pub fn is_attached(&self, id: WidgetId) -> bool {
        self.with_tree(|tree| tree.is_attached(id))
    }

    pub fn root_widget(&self) -> Option<WidgetId> {
        self.with_tree(NativeTree::root)
    }

    /// Number of live native widgets, root included.
    pub fn widget_count(&self) -> usize {
        self.with_tree(NativeTree::len)
    }

    fn with_tree<R>(&self, f: impl FnOnce(&NativeTree) -> R) -> R {
        f(&self.inner.tree.borrow())
    }

    pub(crate) fn with_tree_mut<R>(&self, f: impl FnOnce(&mut NativeTree) -> R) -> R {
        f(&mut self.inner.tree.borrow_mut())
    }

    /// Marks the tree dirty so the next [`layout`](Self::layout) runs a pass.
    pub fn request_layout(&self) {
        self.with_tree_mut(NativeTree::request_layout);
    }

    /// Runs a layout pass if anything changed since the last one.
    ///
    /// Hosts call this after each batch of UI work. Returns whether a pass ran.
    pub fn layout(&self) -> bool {
        let metrics = self.display_metrics();
        self.with_tree_mut(|tree| {
            if !tree.needs_layout() {
                return false;
            }
            tree.layout_pass(metrics);
            true
        })
    }
}

impl fmt::Debug for UiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiContext")
            .field("display", &self.display_metrics())
            .field("widgets", &self.inner.tree.try_borrow().map(|t| t.len()).ok())
            .finish()
    }
}
