//! WGPU rendering backend
//!
//! Two pipelines share one uniform buffer and one depth buffer: a triangle
//! list for solids (boxes, neurons, arrow heads) and a line list for arrow
//! shafts. Vertex buffers are created fresh every frame.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use std::sync::Arc;
use wgpu::util::DeviceExt;

use crate::core::scene::Frame;
use crate::core::tessellate::{tessellate, Batches};
use crate::gpu::shaders;

/// Depth attachment format used by every pipeline
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Vertex data for lines and triangles
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            normal: [0.0, 0.0, 1.0],
        }
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal.to_array();
        self
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4, 2 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Uniform buffer holding the camera's view-projection
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new()
    }
}

impl Uniforms {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    pub fn update_view_proj(&mut self, view_proj: Mat4) {
        self.view_proj = view_proj.to_cols_array_2d();
    }
}

/// Rendering pipeline types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineType {
    Lines,
    Triangles,
}

impl PipelineType {
    fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            PipelineType::Lines => wgpu::PrimitiveTopology::LineList,
            PipelineType::Triangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }

    fn label(self) -> &'static str {
        match self {
            PipelineType::Lines => "Line Pipeline",
            PipelineType::Triangles => "Triangle Pipeline",
        }
    }
}

/// WGPU renderer for the network diagram
pub struct WgpuRenderer {
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    pub surface_config: wgpu::SurfaceConfiguration,

    line_pipeline: Option<wgpu::RenderPipeline>,
    triangle_pipeline: Option<wgpu::RenderPipeline>,

    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_bind_group_layout: wgpu::BindGroupLayout,

    uniforms: Uniforms,
}

impl WgpuRenderer {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        surface_config: wgpu::SurfaceConfiguration,
    ) -> Self {
        let uniforms = Uniforms::new();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("uniform_bind_group_layout"),
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        });

        let mut renderer = Self {
            device,
            queue,
            surface_config,
            line_pipeline: None,
            triangle_pipeline: None,
            uniform_buffer,
            uniform_bind_group,
            uniform_bind_group_layout,
            uniforms,
        };
        renderer.ensure_pipeline(PipelineType::Triangles);
        renderer.ensure_pipeline(PipelineType::Lines);
        renderer
    }

    /// Create a vertex buffer from vertex data
    pub fn create_vertex_buffer(&self, vertices: &[Vertex]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
    }

    /// Depth buffer view sized to the current surface
    pub fn create_depth_view(&self) -> wgpu::TextureView {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: self.surface_config.width.max(1),
                height: self.surface_config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Update uniform buffer with a new view-projection
    pub fn update_uniforms(&mut self, view_proj: Mat4) {
        self.uniforms.update_view_proj(view_proj);

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniforms]),
        );
    }

    /// Ensure pipeline exists for the specified type
    pub fn ensure_pipeline(&mut self, pipeline_type: PipelineType) {
        let slot = match pipeline_type {
            PipelineType::Lines => &self.line_pipeline,
            PipelineType::Triangles => &self.triangle_pipeline,
        };
        if slot.is_some() {
            return;
        }
        let pipeline = self.create_pipeline(pipeline_type);
        match pipeline_type {
            PipelineType::Lines => self.line_pipeline = Some(pipeline),
            PipelineType::Triangles => self.triangle_pipeline = Some(pipeline),
        }
    }

    fn pipeline(&self, pipeline_type: PipelineType) -> Option<&wgpu::RenderPipeline> {
        match pipeline_type {
            PipelineType::Lines => self.line_pipeline.as_ref(),
            PipelineType::Triangles => self.triangle_pipeline.as_ref(),
        }
    }

    fn create_pipeline(&self, pipeline_type: PipelineType) -> wgpu::RenderPipeline {
        log::debug!(
            target: "netviz_plot",
            "creating {} for format {:?}",
            pipeline_type.label(),
            self.surface_config.format
        );
        let shader = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Flat Shader"),
                source: wgpu::ShaderSource::Wgsl(shaders::vertex::FLAT.into()),
            });

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Flat Pipeline Layout"),
                bind_group_layouts: &[&self.uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(pipeline_type.label()),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: "vs_main",
                    buffers: &[Vertex::desc()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.surface_config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: pipeline_type.topology(),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Arrow-head cones have an open base; their inside must stay visible
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
    }

    /// Clear color and depth, then draw the frame's geometry
    pub fn render_frame(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        frame: &Frame,
    ) -> RenderStats {
        self.update_uniforms(frame.view_proj);
        let batches = tessellate(&frame.draw_list);

        let triangles = (!batches.triangles.is_empty())
            .then(|| self.create_vertex_buffer(&batches.triangles));
        let lines = (!batches.lines.is_empty()).then(|| self.create_vertex_buffer(&batches.lines));

        let clear = frame.clear_color;
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Network Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.x as f64,
                        g: clear.y as f64,
                        b: clear.z as f64,
                        a: clear.w as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        for (pipeline_type, buffer, count) in [
            (
                PipelineType::Triangles,
                triangles.as_ref(),
                batches.triangles.len(),
            ),
            (PipelineType::Lines, lines.as_ref(), batches.lines.len()),
        ] {
            let (Some(buffer), Some(pipeline)) = (buffer, self.pipeline(pipeline_type)) else {
                continue;
            };
            render_pass.set_pipeline(pipeline);
            render_pass.set_vertex_buffer(0, buffer.slice(..));
            render_pass.draw(0..count as u32, 0..1);
        }
        drop(render_pass);

        RenderStats::from_batches(&batches)
    }
}

/// Geometry submitted for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub triangles: usize,
    pub lines: usize,
}

impl RenderStats {
    pub fn from_batches(batches: &Batches) -> Self {
        Self {
            triangles: batches.triangle_count(),
            lines: batches.line_count(),
        }
    }
}
