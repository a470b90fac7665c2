//! Core scene building and rendering for netviz
//!
//! Layout, primitive recording, the orbit camera and per-frame composition
//! live here, together with the CPU tessellator and the WGPU backend that
//! turns a composed frame into pixels.

pub mod camera;
pub mod fully_connected;
pub mod interaction;
pub mod layout;
pub mod primitives;
pub mod renderer;
pub mod scene;
pub mod tessellate;

pub use camera::{world_to_screen, Camera, CameraState, DragState, Perspective};
pub use interaction::{EventHandler, MouseButton, PointerEvent};
pub use primitives::*;
pub use renderer::{PipelineType, RenderStats, Uniforms, Vertex, WgpuRenderer};
pub use scene::*;
pub use tessellate::{tessellate, Batches};
