//! Main window for the interactive network diagram

use crate::core::WgpuRenderer;
use crate::gui::LabelOverlay;
use crate::session::Session;
use std::sync::Arc;

/// Configuration for the diagram window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "netviz".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            vsync: true,
        }
    }
}

/// Failure to acquire a rendering resource
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("failed to acquire graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,
}

/// Interactive window with WGPU rendering and an egui label layer.
///
/// Created by [`NetworkWindow::new`]; [`NetworkWindow::run`] blocks until the
/// window is closed.
pub struct NetworkWindow {
    pub(crate) event_loop: winit::event_loop::EventLoop<()>,
    pub(crate) state: WindowState,
}

/// Everything the event loop mutates. Fields drop top to bottom, so GPU
/// resources are released before the surface and the surface before the window.
pub(crate) struct WindowState {
    pub(crate) egui_renderer: egui_wgpu::Renderer,
    pub(crate) egui_state: egui_winit::State,
    pub(crate) egui_ctx: egui::Context,
    pub(crate) label_overlay: LabelOverlay,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) renderer: WgpuRenderer,
    pub(crate) surface: wgpu::Surface<'static>,
    pub(crate) session: Session,
    pub(crate) config: WindowConfig,
    pub(crate) mouse_position: glam::Vec2,
    pub(crate) window: Arc<winit::window::Window>,
}
