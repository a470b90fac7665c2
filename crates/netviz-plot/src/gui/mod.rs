//! Interactive window for the network diagram
//!
//! winit owns the window and event loop, the core renderer draws the
//! scene, and egui paints the layer labels on top.

pub mod label_overlay;
pub mod window;
pub mod window_impl;

pub use label_overlay::{LabelOverlay, PlacedLabel};
pub use window::*;
