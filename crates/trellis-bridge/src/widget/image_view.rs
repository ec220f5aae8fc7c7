use crate::coords::Geometry;
use crate::platform::{UiContext, WidgetId, WidgetKind};

use super::{Bitmap, Frameable, NativeHandle};

/// Widget that displays a [`Bitmap`].
///
/// Without a frame it wraps its image's pixel size.
#[derive(Debug, Clone)]
pub struct ImageView {
    native: NativeHandle,
}

impl ImageView {
    pub fn new(context: &UiContext) -> ImageView {
        ImageView {
            native: NativeHandle::create(context, WidgetKind::ImageView),
        }
    }

    pub fn set_image_bitmap(&mut self, bitmap: &Bitmap) {
        let id = self.native.id();
        let bitmap = bitmap.clone();
        self.native
            .context()
            .with_tree_mut(|tree| tree.set_image(id, bitmap));
    }
}

impl Frameable for ImageView {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::DisplayMetrics;
    use crate::host::{HeadlessHost, HostConfig};

    fn bitmap(w: u32, h: u32) -> Bitmap {
        Bitmap::from_rgba(image::RgbaImage::new(w, h))
    }

    #[test]
    fn unframed_image_view_wraps_bitmap() {
        let mut host = HeadlessHost::new(HostConfig {
            display: DisplayMetrics::new(800, 600, 2.0).unwrap(),
        });
        let mut image = ImageView::new(host.context());
        image.set_image_bitmap(&bitmap(64, 32));
        host.create_root(None, |_, _| {}).unwrap();
        host.root_mut().unwrap().set_content_view(&image);

        host.run_pending();
        assert_eq!(image.bounds(), Geometry::new(0.0, 0.0, 32.0, 16.0));

        let widget = host.context().widget(image.widget_id()).unwrap();
        assert_eq!(widget.kind(), WidgetKind::ImageView);
        assert_eq!(widget.image().map(Bitmap::width), Some(64));
    }

    #[test]
    fn frame_overrides_bitmap_size() {
        let mut host = HeadlessHost::new(HostConfig::default());
        let mut image = ImageView::new(host.context());
        image.set_image_bitmap(&bitmap(64, 32));
        image.set_frame(Geometry::new(0.0, 0.0, 10.0, 10.0));
        host.create_root(None, |_, _| {}).unwrap();
        host.root_mut().unwrap().set_content_view(&image);

        host.run_pending();
        assert_eq!(image.bounds(), Geometry::new(0.0, 0.0, 10.0, 10.0));
    }
}
