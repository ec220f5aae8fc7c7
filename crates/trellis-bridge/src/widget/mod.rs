//! Widget wrappers.
//!
//! Each wrapper holds one native widget and speaks density-independent
//! geometry through the [`Frameable`] capability. Wrappers never own each
//! other; containment lives in the native view tree.

mod bitmap;
mod image_view;
mod view;

pub use bitmap::Bitmap;
pub use image_view::ImageView;
pub use view::View;

use std::rc::Rc;

use crate::coords::{to_logical, to_pixels, Geometry};
use crate::platform::{Gravity, LayoutParams, UiContext, WidgetId, WidgetKind};

/// Geometry capability shared by all visual widget wrappers.
pub trait Frameable {
    fn widget_id(&self) -> WidgetId;

    /// Positions the widget at `frame` (density-independent points).
    ///
    /// Takes effect at the next layout pass, accurate to one device pixel per
    /// axis.
    fn set_frame(&mut self, frame: Geometry);

    /// Measured size at `(0, 0)`, in density-independent points.
    ///
    /// Position is never reported; callers that need it keep the frame they
    /// set. Reads `{0, 0, 0, 0}` until a layout pass has measured the widget.
    fn bounds(&self) -> Geometry;
}

/// Shared reference to one native widget.
///
/// Wrapper clones share the slot. Dropping the last clone releases the
/// widget, which the tree removes once it is also detached.
#[derive(Debug, Clone)]
struct NativeHandle {
    slot: Rc<NativeSlot>,
}

#[derive(Debug)]
struct NativeSlot {
    context: UiContext,
    id: WidgetId,
}

impl Drop for NativeSlot {
    fn drop(&mut self) {
        let id = self.id;
        self.context.with_tree_mut(|tree| tree.release(id));
    }
}

impl NativeHandle {
    /// Creates the native widget, anchored top-left so absolute margins
    /// position it predictably.
    fn create(context: &UiContext, kind: WidgetKind) -> Self {
        let id = context.with_tree_mut(|tree| {
            let id = tree.create(kind);
            tree.set_gravity(id, Gravity::TOP | Gravity::LEFT);
            id
        });

        Self {
            slot: Rc::new(NativeSlot {
                context: context.clone(),
                id,
            }),
        }
    }

    fn id(&self) -> WidgetId {
        self.slot.id
    }

    fn context(&self) -> &UiContext {
        &self.slot.context
    }

    fn set_frame(&self, frame: Geometry) {
        let (context, id) = (self.context(), self.id());
        let px = to_pixels(frame, context.density());
        context.with_tree_mut(|tree| tree.set_layout_params(id, LayoutParams::from(px)));
    }

    fn bounds(&self) -> Geometry {
        let context = self.context();
        let (width, height) = context.measured_size(self.id());
        to_logical(width, height, context.density())
    }
}
