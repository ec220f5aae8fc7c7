use crate::coords::{ColorRgba, Geometry};
use crate::platform::{UiContext, WidgetId, WidgetKind};

use super::{Frameable, NativeHandle};

/// Plain container widget.
///
/// Clones refer to the same native widget.
#[derive(Debug, Clone)]
pub struct View {
    native: NativeHandle,
}

impl View {
    pub fn new(context: &UiContext) -> View {
        View {
            native: NativeHandle::create(context, WidgetKind::View),
        }
    }

    /// Makes `child` a native child of this view, moving it out of any
    /// previous parent. Cyclic edges are ignored.
    pub fn add_view(&mut self, child: &impl Frameable) {
        let (parent, child) = (self.native.id(), child.widget_id());
        self.native.context().with_tree_mut(|tree| {
            tree.add_child(parent, child);
        });
    }

    /// Removes this view from its parent, if it has one.
    pub fn remove_from_parent(&mut self) {
        let id = self.native.id();
        self.native.context().with_tree_mut(|tree| tree.detach(id));
    }

    pub fn set_background_color(&mut self, color: ColorRgba) {
        let id = self.native.id();
        self.native
            .context()
            .with_tree_mut(|tree| tree.set_background_color(id, color.to_argb()));
    }
}

impl Frameable for View {
    fn widget_id(&self) -> WidgetId {
        self.native.id()
    }

    fn set_frame(&mut self, frame: Geometry) {
        self.native.set_frame(frame);
    }

    fn bounds(&self) -> Geometry {
        self.native.bounds()
    }
}
