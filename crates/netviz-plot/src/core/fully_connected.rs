//! Fully-connected layer rendering
//!
//! Neurons sit in a row along x, zig-zagging in depth for readability. Every
//! neuron connects to every neuron one layer-spacing below, including the one
//! directly beneath it, so a layer of `n` neurons emits `n * n` arrows.

use super::layout::LAYER_SPACING;
use super::primitives::{DrawList, NEURON_RADIUS};
use glam::{Vec3, Vec4};

/// Horizontal distance between neighbouring neurons
pub const NEURON_SPACING: f32 = 1.0;

/// Depth offset applied alternately to even/odd neurons
pub const NEURON_Z_OFFSET: f32 = 0.5;

/// Position of neuron `index` in a row of `count` neurons at height `y`
pub fn neuron_position(y: f32, count: u32, index: u32) -> Vec3 {
    let start_x = -((count.saturating_sub(1)) as f32 * NEURON_SPACING) / 2.0;
    let x = start_x + index as f32 * NEURON_SPACING;
    let z = if index % 2 == 0 {
        -NEURON_Z_OFFSET
    } else {
        NEURON_Z_OFFSET
    };
    Vec3::new(x, y, z)
}

/// All neuron positions for a row at height `y`
pub fn neuron_row(y: f32, count: u32) -> Vec<Vec3> {
    (0..count).map(|i| neuron_position(y, count, i)).collect()
}

/// Draw a row of neurons at `y` plus the dense connector set to the row below
pub fn draw_fully_connected(list: &mut DrawList, y: f32, neuron_count: u32, color: Vec4) {
    let upper = neuron_row(y, neuron_count);
    let lower = neuron_row(y - LAYER_SPACING, neuron_count);

    for &center in &upper {
        list.draw_sphere(center, NEURON_RADIUS, color);
    }
    for &from in &upper {
        for &to in &lower {
            list.draw_arrow(from, to, color);
        }
    }
}
