//! netviz plot: schematic 3D diagrams of layered neural networks
//!
//! A [`NetworkModel`](network::NetworkModel) is stacked top to bottom, one
//! layer every two units. Box layers are drawn as solids, fully-connected
//! layers as neuron rows wired densely to the row beneath. Frames are
//! composed into a [`DrawList`](core::DrawList) and rendered with WGPU; an
//! orbit camera driven by pointer drags rotates the stack.

// Core architecture (always available, headless)
pub mod core;
pub mod gpu;
pub mod network;
pub mod session;

// Feature-gated modules
#[cfg(feature = "gui")]
pub mod gui;

pub use network::presets::Preset;
pub use network::{Layer, LayerError, LayerKind, NetworkModel, Rgb};
pub use session::Session;

#[cfg(feature = "gui")]
pub use gui::{NetworkWindow, RenderError, WindowConfig};
