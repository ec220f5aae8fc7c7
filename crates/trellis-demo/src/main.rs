use std::cell::RefCell;
use std::thread;
use std::time::Duration;

use trellis_bridge::boundary::EntryHandle;
use trellis_bridge::coords::{ColorRgba, Geometry};
use trellis_bridge::dispatch::{Dispatcher, UiSender};
use trellis_bridge::logging::{init_logging, LoggingConfig};
use trellis_bridge::platform::UiContext;
use trellis_bridge::root::RootContainer;
use trellis_bridge::widget::{Frameable, View};
use trellis_bridge::window::{Runtime, RuntimeConfig};
use trellis_bridge::worker::WorkerThread;

const PALETTE: [ColorRgba; 4] = [
    ColorRgba::new(0.91, 0.30, 0.24, 1.0),
    ColorRgba::new(0.95, 0.61, 0.07, 1.0),
    ColorRgba::new(0.18, 0.80, 0.44, 1.0),
    ColorRgba::new(0.20, 0.60, 0.86, 1.0),
];

thread_local! {
    // UI-thread only: filled by the app entry, painted by dispatched callbacks.
    static TILES: RefCell<Vec<View>> = const { RefCell::new(Vec::new()) };
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig {
        tag: Some("trellis-demo".to_string()),
        ..LoggingConfig::default()
    });

    Runtime::run(
        RuntimeConfig {
            title: "Trellis demo".to_string(),
            ..RuntimeConfig::default()
        },
        app_main,
    )
}

fn app_main(ctx: &UiContext, root: &mut RootContainer) {
    let bounds = root.bounds();
    log::info!("root bounds {bounds:?}");

    let mut content = View::new(ctx);
    content.set_frame(bounds);
    content.set_background_color(ColorRgba::white());

    let tile_height = bounds.height / PALETTE.len() as f32;
    let tiles: Vec<View> = (0..PALETTE.len())
        .map(|i| {
            let mut tile = View::new(ctx);
            tile.set_frame(
                Geometry::new(0.0, i as f32 * tile_height, bounds.width, tile_height).inset(8.0),
            );
            tile.set_background_color(ColorRgba::black());
            content.add_view(&tile);
            tile
        })
        .collect();

    TILES.with(|t| *t.borrow_mut() = tiles);
    root.set_content_view(&content);

    for i in 0..PALETTE.len() {
        let worker = WorkerThread::new(ctx.sender(), pick_color, EntryHandle::from_raw(i as u64));
        if let Err(e) = worker.start() {
            log::error!("tile {i}: {e}");
        }
    }
}

// Worker side: pretend to compute, then hand the tile index back.
fn pick_color(sender: &UiSender, handle: EntryHandle) {
    let index = handle.into_raw();
    thread::sleep(Duration::from_millis(250 * (index + 1)));

    if let Err(e) = Dispatcher::new(paint_tile, EntryHandle::from_raw(index)).queue(sender) {
        log::warn!("tile {index}: {e}");
    }
}

fn paint_tile(_: &UiContext, handle: EntryHandle) {
    let index = handle.into_raw() as usize;

    TILES.with(|tiles| {
        if let Some(tile) = tiles.borrow_mut().get_mut(index) {
            tile.set_background_color(PALETTE[index % PALETTE.len()]);
            log::info!("tile {index} painted, bounds {:?}", tile.bounds());
        }
    });
}
