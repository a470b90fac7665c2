//! Implementation methods for the diagram window

use super::window::{NetworkWindow, RenderError, WindowConfig, WindowState};
use crate::core::{EventHandler, MouseButton, PointerEvent, WgpuRenderer};
use crate::gui::LabelOverlay;
use crate::session::Session;
use egui_winit::State as EguiState;
use glam::Vec2;
use std::sync::Arc;
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopWindowTarget},
    window::WindowBuilder,
};

impl NetworkWindow {
    /// Open the window and acquire the adapter, device and surface
    pub async fn new(config: WindowConfig, session: Session) -> Result<Self, RenderError> {
        let event_loop = EventLoopBuilder::new().build()?;
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(config.resizable)
            .build(&event_loop)?;
        let window = Arc::new(window);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
        log::info!(target: "netviz_plot", "using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("netviz Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        // Colors are authored as display values, so prefer a non-sRGB target
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: present_mode(config.vsync),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let renderer = WgpuRenderer::new(device.clone(), queue, surface_config);
        let depth_view = renderer.create_depth_view();

        let egui_ctx = egui::Context::default();
        let egui_state = EguiState::new(
            egui_ctx.clone(),
            egui::viewport::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1);

        let mut session = session;
        session.resize(size.width, size.height);

        Ok(Self {
            event_loop,
            state: WindowState {
                egui_renderer,
                egui_state,
                egui_ctx,
                label_overlay: LabelOverlay::new(),
                depth_view,
                renderer,
                surface,
                session,
                config,
                mouse_position: Vec2::ZERO,
                window,
            },
        })
    }

    /// Run the event loop until the window is closed
    pub fn run(self) -> Result<(), RenderError> {
        let NetworkWindow {
            event_loop,
            mut state,
        } = self;
        event_loop.run(move |event, target| state.handle(event, target))?;
        log::info!(target: "netviz_plot", "window closed");
        Ok(())
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

fn pointer_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

impl WindowState {
    fn handle(&mut self, event: Event<()>, target: &EventLoopWindowTarget<()>) {
        target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, event } if window_id == self.window.id() => {
                let response = self.egui_state.on_window_event(&self.window, &event);
                if response.repaint {
                    self.window.request_redraw();
                }
                self.handle_window_event(event, target);
            }
            // Redraw continuously, like an idle callback
            Event::AboutToWait => self.window.request_redraw(),
            _ => {}
        }
    }

    fn handle_window_event(&mut self, event: WindowEvent, target: &EventLoopWindowTarget<()>) {
        match event {
            WindowEvent::CloseRequested => target.exit(),
            WindowEvent::Resized(new_size) => self.resize(new_size.width, new_size.height),
            WindowEvent::RedrawRequested => match self.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    log::debug!(target: "netviz_plot", "surface lost, reconfiguring");
                    self.resize(self.config.width, self.config.height)
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!(target: "netviz_plot", "surface out of memory");
                    target.exit()
                }
                Err(e) => log::warn!(target: "netviz_plot", "skipping frame: {e:?}"),
            },
            WindowEvent::MouseInput { button, state, .. } => {
                self.handle_mouse_input(button, state)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_mouse_move(Vec2::new(position.x as f32, position.y as f32))
            }
            _ => {}
        }
    }

    fn handle_mouse_input(&mut self, button: winit::event::MouseButton, state: ElementState) {
        let Some(button) = pointer_button(button) else {
            return;
        };
        let position = self.mouse_position;
        let event = match state {
            ElementState::Pressed => PointerEvent::Press { position, button },
            ElementState::Released => PointerEvent::Release { position, button },
        };
        self.session.handle_event(event);
    }

    fn handle_mouse_move(&mut self, position: Vec2) {
        self.mouse_position = position;
        if self.session.handle_event(PointerEvent::Move { position }) {
            self.window.request_redraw();
        }
    }

    /// Reconfigure the surface and depth buffer for a new size
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;

        let mut surface_config = self.renderer.surface_config.clone();
        surface_config.width = width;
        surface_config.height = height;
        surface_config.present_mode = present_mode(self.config.vsync);
        self.surface.configure(&self.renderer.device, &surface_config);
        self.renderer.surface_config = surface_config;

        self.depth_view = self.renderer.create_depth_view();

        self.session.resize(width, height);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let frame = self.session.compose_frame();
        let device = self.renderer.device.clone();
        let queue = self.renderer.queue.clone();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        let stats = self
            .renderer
            .render_frame(&mut encoder, &view, &self.depth_view, &frame);
        log::trace!(
            target: "netviz_plot",
            "frame: {} triangles, {} lines",
            stats.triangles,
            stats.lines
        );

        // Labels go on top of the scene
        let pixels_per_point = self.window.scale_factor() as f32;
        let placed = self.label_overlay.place(
            frame.draw_list.labels(),
            frame.view_proj,
            Vec2::new(self.config.width as f32, self.config.height as f32),
            pixels_per_point,
        );
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let overlay = &self.label_overlay;
        let full_output = self
            .egui_ctx
            .run(raw_input, |ctx| overlay.paint(ctx, &placed));
        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&device, &queue, *id, image_delta);
        }
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point,
        };
        let egui_commands =
            self.egui_renderer
                .update_buffers(&device, &queue, &mut encoder, &tris, &screen);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Label Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.egui_renderer.render(&mut render_pass, &tris, &screen);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        queue.submit(egui_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();
        Ok(())
    }
}
