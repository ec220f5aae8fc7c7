use std::collections::HashMap;

use crate::boundary::{invoke_boundary, AppEntry, EntryRole};
use crate::coords::{to_logical, Geometry};
use crate::platform::{NativeTree, UiContext, WidgetId};
use crate::widget::Frameable;

/// Key/value state handed back by the platform when a root is recreated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedState {
    values: HashMap<String, String>,
}

impl SavedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Top-level container for the engine's UI.
///
/// Exactly one exists per host; the host creates it and then hands it to the
/// application entry. Its bounds always equal the display.
#[derive(Debug)]
pub struct RootContainer {
    context: UiContext,
    id: WidgetId,
    content: Option<WidgetId>,
    saved_state: Option<SavedState>,
    destroyed: bool,
}

impl RootContainer {
    /// Platform creation hook.
    ///
    /// The native root exists before `entry` runs, so the engine may query
    /// [`bounds`](Self::bounds) and attach content immediately.
    pub(crate) fn on_create(
        context: &UiContext,
        saved_state: Option<SavedState>,
        entry: AppEntry,
    ) -> RootContainer {
        let id = context.with_tree_mut(NativeTree::create_root);
        log::info!(
            "root container created (restored state: {})",
            saved_state.is_some()
        );

        let mut root = RootContainer {
            context: context.clone(),
            id,
            content: None,
            saved_state,
            destroyed: false,
        };

        invoke_boundary(EntryRole::Application, || entry(context, &mut root));
        root
    }

    pub fn context(&self) -> &UiContext {
        &self.context
    }

    pub fn widget_id(&self) -> WidgetId {
        self.id
    }

    /// Display size in density-independent points, at `(0, 0)`.
    pub fn bounds(&self) -> Geometry {
        let metrics = self.context.display_metrics();
        to_logical(metrics.width_pixels, metrics.height_pixels, metrics.density)
    }

    /// Replaces the root's content with `view`.
    pub fn set_content_view(&mut self, view: &impl Frameable) {
        let (root, child) = (self.id, view.widget_id());
        let previous = self.content.replace(child);

        self.context.with_tree_mut(|tree| {
            if let Some(prev) = previous.filter(|&p| p != child) {
                tree.detach(prev);
            }
            tree.add_child(root, child);
        });
    }

    pub fn content_view(&self) -> Option<WidgetId> {
        self.content
    }

    pub fn saved_state(&self) -> Option<&SavedState> {
        self.saved_state.as_ref()
    }

    /// Platform teardown hook. Detaches the content; later calls are no-ops.
    pub(crate) fn on_destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        if let Some(content) = self.content.take() {
            self.context.with_tree_mut(|tree| tree.detach(content));
        }
        log::info!("root container destroyed");
    }
}
