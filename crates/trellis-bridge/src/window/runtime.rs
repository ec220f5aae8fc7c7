use std::rc::Rc;

use anyhow::{Context, Result};
use parking_lot::Mutex;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::boundary::{AppEntry, BridgeError};
use crate::coords::{Density, DisplayMetrics};
use crate::dispatch::{UiPoster, UiSender, UiTask};
use crate::platform::{DisplaySource, UiContext};
use crate::root::RootContainer;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "trellis".to_string(),
            initial_size: LogicalSize::new(360.0, 640.0),
        }
    }
}

/// Entry point for the windowed host.
///
/// The window plays the display: its inner size and scale factor are the
/// display metrics, and the root container fills it.
pub struct Runtime;

impl Runtime {
    /// Opens the window, creates the root container, runs `entry` with it and
    /// then drives the UI loop until the window closes.
    pub fn run(config: RuntimeConfig, entry: AppEntry) -> Result<()> {
        let event_loop = EventLoop::<UiTask>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;

        let sender = UiSender::new(ProxyPoster(Mutex::new(event_loop.create_proxy())));
        let mut state = AppState::new(config, entry, sender);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct ProxyPoster(Mutex<EventLoopProxy<UiTask>>);

impl UiPoster for ProxyPoster {
    fn post(&self, task: UiTask) -> Result<(), BridgeError> {
        self.0
            .lock()
            .send_event(task)
            .map_err(|_| BridgeError::UiLoopClosed)
    }
}

struct WindowDisplay(Rc<Window>);

impl DisplaySource for WindowDisplay {
    fn metrics(&self) -> DisplayMetrics {
        metrics_for(self.0.inner_size(), self.0.scale_factor())
    }
}

fn metrics_for(size: PhysicalSize<u32>, scale_factor: f64) -> DisplayMetrics {
    let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
    DisplayMetrics {
        width_pixels: clamp(size.width),
        height_pixels: clamp(size.height),
        density: Density::from_platform(scale_factor as f32),
    }
}

struct WindowEntry {
    window: Rc<Window>,
    context: UiContext,
    root: RootContainer,
}

struct AppState {
    config: RuntimeConfig,
    entry: AppEntry,
    sender: UiSender,

    window: Option<WindowEntry>,
    // Tasks that arrived before the window existed.
    pending: Vec<UiTask>,
}

impl AppState {
    fn new(config: RuntimeConfig, entry: AppEntry, sender: UiSender) -> Self {
        Self {
            config,
            entry,
            sender,
            window: None,
            pending: Vec::new(),
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Rc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let context = UiContext::new(WindowDisplay(window.clone()), self.sender.clone());
        log::info!("ui context ready ({:?})", context.display_metrics());

        let root = RootContainer::on_create(&context, None, self.entry);

        for task in self.pending.drain(..) {
            task.run(&context);
        }
        context.layout();

        self.window = Some(WindowEntry {
            window,
            context,
            root,
        });
        Ok(())
    }

    fn destroy_window_entry(&mut self) {
        if let Some(mut entry) = self.window.take() {
            entry.root.on_destroy();
            log::debug!("window {:?} closed", entry.window.id());
        }
    }
}

impl ApplicationHandler<UiTask> for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create initial window: {e:#}");
            event_loop.exit();
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, task: UiTask) {
        match &self.window {
            Some(entry) => {
                task.run(&entry.context);
                entry.context.layout();
            }
            None => self.pending.push(task),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.window.as_ref().filter(|e| e.window.id() == window_id) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.destroy_window_entry();
                event_loop.exit();
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                entry.context.request_layout();
                entry.context.layout();
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_size_and_scale_become_metrics() {
        let metrics = metrics_for(PhysicalSize::new(720, 1280), 2.0);
        assert_eq!(metrics, DisplayMetrics::new(720, 1280, 2.0).unwrap());
    }

    #[test]
    fn oversized_windows_saturate() {
        let metrics = metrics_for(PhysicalSize::new(u32::MAX, 10), 1.0);
        assert_eq!(metrics.width_pixels, i32::MAX);
    }

    #[test]
    fn default_config_is_a_handset_window() {
        let config = RuntimeConfig::default();
        assert_eq!(config.initial_size, LogicalSize::new(360.0, 640.0));
    }
}
