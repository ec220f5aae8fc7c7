use std::collections::HashMap;
use std::ops::BitOr;

use crate::coords::{DisplayMetrics, PixelRect};
use crate::widget::Bitmap;

/// Identifier of a widget inside a [`NativeTree`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    Root,
    View,
    ImageView,
}

/// Child alignment flags of a container widget.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Gravity(u8);

impl Gravity {
    pub const NONE: Gravity = Gravity(0);
    pub const TOP: Gravity = Gravity(1 << 0);
    pub const BOTTOM: Gravity = Gravity(1 << 1);
    pub const LEFT: Gravity = Gravity(1 << 2);
    pub const RIGHT: Gravity = Gravity(1 << 3);

    #[inline]
    pub const fn contains(self, other: Gravity) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Gravity {
    type Output = Gravity;
    #[inline]
    fn bitor(self, rhs: Gravity) -> Gravity {
        Gravity(self.0 | rhs.0)
    }
}

/// One axis of a widget's requested size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Extent {
    /// Exactly this many device pixels. Negative values measure as zero.
    Exact(i32),
    /// Size to content (children, image).
    WrapContent,
}

/// Absolute-positioning layout params, in device pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LayoutParams {
    pub left_margin: i32,
    pub top_margin: i32,
    pub width: Extent,
    pub height: Extent,
}

impl LayoutParams {
    pub const fn wrap_content() -> Self {
        Self {
            left_margin: 0,
            top_margin: 0,
            width: Extent::WrapContent,
            height: Extent::WrapContent,
        }
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::wrap_content()
    }
}

impl From<PixelRect> for LayoutParams {
    fn from(px: PixelRect) -> Self {
        Self {
            left_margin: px.left,
            top_margin: px.top,
            width: Extent::Exact(px.width),
            height: Extent::Exact(px.height),
        }
    }
}

/// Platform-side state of a single widget.
#[derive(Debug, Clone)]
pub struct NativeWidget {
    kind: WidgetKind,
    gravity: Gravity,
    params: LayoutParams,
    measured: (i32, i32),
    background: Option<i32>,
    image: Option<Bitmap>,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    // A wrapper still refers to this widget.
    held: bool,
}

impl NativeWidget {
    fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            gravity: Gravity::NONE,
            params: LayoutParams::wrap_content(),
            measured: (0, 0),
            background: None,
            image: None,
            parent: None,
            children: Vec::new(),
            held: false,
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn layout_params(&self) -> LayoutParams {
        self.params
    }

    /// Size committed by the last layout pass that reached this widget.
    pub fn measured_size(&self) -> (i32, i32) {
        self.measured
    }

    /// Packed `0xAARRGGBB` background, if one was set.
    pub fn background_color(&self) -> Option<i32> {
        self.background
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }
}

/// The platform's native view tree.
///
/// Containment, layout params and measured sizes live here, never in the
/// widget wrappers. Only widgets reachable from the root take part in a
/// layout pass; a detached widget keeps whatever it last measured (zero if it
/// never was).
///
/// A widget lives while a wrapper holds it or its parent lives. Once neither
/// is true it is removed, together with any descendants nothing else keeps.
#[derive(Debug, Default)]
pub struct NativeTree {
    widgets: HashMap<WidgetId, NativeWidget>,
    next_id: u32,
    root: Option<WidgetId>,
    layout_requested: bool,
}

impl NativeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    pub fn get(&self, id: WidgetId) -> Option<&NativeWidget> {
        self.widgets.get(&id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Measured size in device pixels; `(0, 0)` for unknown or unmeasured widgets.
    pub fn measured_size(&self, id: WidgetId) -> (i32, i32) {
        self.get(id).map(NativeWidget::measured_size).unwrap_or((0, 0))
    }

    /// True when `id` is reachable from the root.
    pub fn is_attached(&self, id: WidgetId) -> bool {
        self.root.is_some_and(|root| root == id || self.is_ancestor(root, id))
    }

    pub fn needs_layout(&self) -> bool {
        self.layout_requested
    }

    // ── mutation (UI thread, via UiContext) ────────────────────────────────

    /// Creates a widget held by its (single) wrapper until [`release`](Self::release).
    pub(crate) fn create(&mut self, kind: WidgetKind) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;

        let mut widget = NativeWidget::new(kind);
        widget.held = true;
        self.widgets.insert(id, widget);
        id
    }

    /// The wrapper for `id` is gone; collects the widget if nothing keeps it.
    pub(crate) fn release(&mut self, id: WidgetId) {
        if let Some(w) = self.widgets.get_mut(&id) {
            w.held = false;
        }
        self.collect(id);
    }

    pub(crate) fn create_root(&mut self) -> WidgetId {
        let id = self.create(WidgetKind::Root);
        self.root = Some(id);
        self.layout_requested = true;
        id
    }

    pub(crate) fn set_gravity(&mut self, id: WidgetId, gravity: Gravity) {
        if let Some(w) = self.widgets.get_mut(&id) {
            w.gravity = gravity;
            self.layout_requested = true;
        }
    }

    pub(crate) fn set_layout_params(&mut self, id: WidgetId, params: LayoutParams) {
        if let Some(w) = self.widgets.get_mut(&id) {
            w.params = params;
            self.layout_requested = true;
        }
    }

    pub(crate) fn set_background_color(&mut self, id: WidgetId, argb: i32) {
        if let Some(w) = self.widgets.get_mut(&id) {
            w.background = Some(argb);
        }
    }

    pub(crate) fn set_image(&mut self, id: WidgetId, bitmap: Bitmap) {
        if let Some(w) = self.widgets.get_mut(&id) {
            w.image = Some(bitmap);
            self.layout_requested = true;
        }
    }

    /// Attaches `child` under `parent`, detaching it from any previous parent.
    ///
    /// Returns `false` (and changes nothing) if the edge would create a cycle
    /// or either widget is unknown.
    pub(crate) fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        if parent == child
            || !self.widgets.contains_key(&parent)
            || !self.widgets.contains_key(&child)
            || self.is_ancestor(child, parent)
        {
            log::warn!("rejected view tree edge {parent:?} -> {child:?}");
            return false;
        }

        self.unlink(child);

        if let Some(p) = self.widgets.get_mut(&parent) {
            p.children.push(child);
        }
        if let Some(c) = self.widgets.get_mut(&child) {
            c.parent = Some(parent);
        }

        self.layout_requested = true;
        true
    }

    pub(crate) fn detach(&mut self, child: WidgetId) {
        self.unlink(child);
        self.collect(child);
    }

    fn unlink(&mut self, child: WidgetId) {
        let Some(parent) = self.widgets.get_mut(&child).and_then(|c| c.parent.take()) else {
            return;
        };

        if let Some(p) = self.widgets.get_mut(&parent) {
            p.children.retain(|&c| c != child);
        }

        self.layout_requested = true;
    }

    /// Removes `id` and its unheld descendants if no wrapper or parent keeps
    /// it alive. Held descendants survive as detached widgets.
    fn collect(&mut self, id: WidgetId) {
        let mut pending = vec![id];

        while let Some(id) = pending.pop() {
            let unreachable = self.root != Some(id)
                && self
                    .widgets
                    .get(&id)
                    .is_some_and(|w| !w.held && w.parent.is_none());
            if !unreachable {
                continue;
            }

            let Some(widget) = self.widgets.remove(&id) else {
                continue;
            };
            for child in widget.children {
                if let Some(c) = self.widgets.get_mut(&child) {
                    c.parent = None;
                }
                pending.push(child);
            }
            log::trace!("collected native widget {id:?}");
        }
    }

    pub(crate) fn request_layout(&mut self) {
        self.layout_requested = true;
    }

    // ── layout pass ────────────────────────────────────────────────────────

    /// Commits layout params into measured sizes for every attached widget.
    ///
    /// The root measures as the display. Other widgets take their exact
    /// extent, or wrap their content: the furthest child edge, or the image
    /// size for image widgets.
    pub(crate) fn layout_pass(&mut self, display: DisplayMetrics) {
        self.layout_requested = false;

        let Some(root) = self.root else {
            return;
        };

        let size = (display.width_pixels.max(0), display.height_pixels.max(0));
        if let Some(r) = self.widgets.get_mut(&root) {
            r.measured = size;
        }

        for child in self.children_of(root) {
            self.measure(child);
        }
    }

    fn measure(&mut self, id: WidgetId) -> (i32, i32) {
        let mut content = (0_i32, 0_i32);

        for child in self.children_of(id) {
            let (w, h) = self.measure(child);
            let params = self.widgets.get(&child).map(|c| c.params).unwrap_or_default();
            content.0 = content.0.max(params.left_margin.saturating_add(w));
            content.1 = content.1.max(params.top_margin.saturating_add(h));
        }

        let Some(widget) = self.widgets.get_mut(&id) else {
            return (0, 0);
        };

        if let Some(bitmap) = &widget.image {
            content.0 = content.0.max(clamp_u32(bitmap.width()));
            content.1 = content.1.max(clamp_u32(bitmap.height()));
        }

        let size = (
            resolve(widget.params.width, content.0),
            resolve(widget.params.height, content.1),
        );
        widget.measured = size;
        size
    }

    fn children_of(&self, id: WidgetId) -> Vec<WidgetId> {
        self.widgets
            .get(&id)
            .map(|w| w.children.clone())
            .unwrap_or_default()
    }

    /// True when `ancestor` is a strict ancestor of `id`.
    fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut cursor = self.widgets.get(&id).and_then(|w| w.parent);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self.widgets.get(&p).and_then(|w| w.parent);
        }
        false
    }
}

fn resolve(extent: Extent, content: i32) -> i32 {
    match extent {
        Extent::Exact(v) => v.max(0),
        Extent::WrapContent => content.max(0),
    }
}

fn clamp_u32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> DisplayMetrics {
        DisplayMetrics::new(1080, 1920, 3.0).unwrap()
    }

    fn exact(left: i32, top: i32, w: i32, h: i32) -> LayoutParams {
        LayoutParams::from(PixelRect { left, top, width: w, height: h })
    }

    // ── containment ───────────────────────────────────────────────────────

    #[test]
    fn add_child_reparents() {
        let mut tree = NativeTree::new();
        let a = tree.create(WidgetKind::View);
        let b = tree.create(WidgetKind::View);
        let c = tree.create(WidgetKind::View);

        assert!(tree.add_child(a, c));
        assert!(tree.add_child(b, c));

        assert!(tree.get(a).unwrap().children().is_empty());
        assert_eq!(tree.get(b).unwrap().children(), &[c]);
        assert_eq!(tree.get(c).unwrap().parent(), Some(b));
    }

    #[test]
    fn add_child_rejects_cycles() {
        let mut tree = NativeTree::new();
        let a = tree.create(WidgetKind::View);
        let b = tree.create(WidgetKind::View);

        assert!(tree.add_child(a, b));
        assert!(!tree.add_child(b, a));
        assert!(!tree.add_child(a, a));
        assert_eq!(tree.get(a).unwrap().parent(), None);
    }

    // ── lifetime ──────────────────────────────────────────────────────────

    #[test]
    fn released_detached_widget_is_removed() {
        let mut tree = NativeTree::new();
        let v = tree.create(WidgetKind::View);

        tree.release(v);
        assert!(tree.get(v).is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn attached_widget_outlives_its_wrapper_until_detached() {
        let mut tree = NativeTree::new();
        let root = tree.create_root();
        let v = tree.create(WidgetKind::View);
        tree.add_child(root, v);

        tree.release(v);
        assert!(tree.is_attached(v));

        tree.detach(v);
        assert!(tree.get(v).is_none());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn collecting_a_parent_keeps_held_children() {
        let mut tree = NativeTree::new();
        let parent = tree.create(WidgetKind::View);
        let held = tree.create(WidgetKind::View);
        let unheld = tree.create(WidgetKind::View);
        tree.add_child(parent, held);
        tree.add_child(parent, unheld);
        tree.release(unheld);
        assert!(tree.get(unheld).is_some(), "kept alive by its parent");

        tree.release(parent);
        assert!(tree.get(parent).is_none());
        assert!(tree.get(unheld).is_none());
        assert_eq!(tree.get(held).unwrap().parent(), None);
    }

    #[test]
    fn reparenting_a_held_widget_does_not_collect_it() {
        let mut tree = NativeTree::new();
        let a = tree.create(WidgetKind::View);
        let b = tree.create(WidgetKind::View);
        let c = tree.create(WidgetKind::View);
        tree.add_child(a, c);
        tree.release(c);

        assert!(tree.add_child(b, c));
        assert_eq!(tree.get(c).unwrap().parent(), Some(b));
    }

    // ── layout pass ───────────────────────────────────────────────────────

    #[test]
    fn root_measures_as_display() {
        let mut tree = NativeTree::new();
        let root = tree.create_root();
        tree.layout_pass(display());
        assert_eq!(tree.measured_size(root), (1080, 1920));
        assert!(!tree.needs_layout());
    }

    #[test]
    fn exact_params_become_measured_size() {
        let mut tree = NativeTree::new();
        let root = tree.create_root();
        let v = tree.create(WidgetKind::View);
        tree.add_child(root, v);
        tree.set_layout_params(v, exact(20, 40, 200, 100));

        assert!(tree.needs_layout());
        assert_eq!(tree.measured_size(v), (0, 0));

        tree.layout_pass(display());
        assert_eq!(tree.measured_size(v), (200, 100));
    }

    #[test]
    fn wrap_content_spans_furthest_child_edge() {
        let mut tree = NativeTree::new();
        let root = tree.create_root();
        let parent = tree.create(WidgetKind::View);
        let a = tree.create(WidgetKind::View);
        let b = tree.create(WidgetKind::View);
        tree.add_child(root, parent);
        tree.add_child(parent, a);
        tree.add_child(parent, b);
        tree.set_layout_params(a, exact(10, 0, 50, 20));
        tree.set_layout_params(b, exact(0, 30, 20, 20));

        tree.layout_pass(display());
        assert_eq!(tree.measured_size(parent), (60, 50));
    }

    #[test]
    fn negative_exact_extent_measures_as_zero() {
        let mut tree = NativeTree::new();
        let root = tree.create_root();
        let v = tree.create(WidgetKind::View);
        tree.add_child(root, v);
        tree.set_layout_params(v, exact(0, 0, -30, 12));

        tree.layout_pass(display());
        assert_eq!(tree.measured_size(v), (0, 12));
    }

    #[test]
    fn detached_widgets_are_not_measured() {
        let mut tree = NativeTree::new();
        tree.create_root();
        let v = tree.create(WidgetKind::View);
        tree.set_layout_params(v, exact(0, 0, 10, 10));

        tree.layout_pass(display());
        assert!(!tree.is_attached(v));
        assert_eq!(tree.measured_size(v), (0, 0));
    }

    #[test]
    fn gravity_flags_combine() {
        let g = Gravity::TOP | Gravity::LEFT;
        assert!(g.contains(Gravity::TOP));
        assert!(g.contains(Gravity::LEFT));
        assert!(!g.contains(Gravity::RIGHT));
    }
}
