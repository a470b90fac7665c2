//! Vertical stacking rule for layers

use glam::Vec3;

/// Vertical coordinate of the first (topmost) layer
pub const TOP_Y: f32 = 8.0;

/// Vertical distance between consecutive layers
pub const LAYER_SPACING: f32 = 2.0;

/// Horizontal offset of layer labels from the stack axis
pub const LABEL_OFFSET_X: f32 = 3.0;

/// Vertical coordinate of the layer at `index`
pub fn layer_y(index: usize) -> f32 {
    TOP_Y - index as f32 * LAYER_SPACING
}

/// Center of the layer at `index`; layers share x = z = 0
pub fn layer_center(index: usize) -> Vec3 {
    Vec3::new(0.0, layer_y(index), 0.0)
}

/// Where the label for the layer at `index` is anchored
pub fn label_anchor(index: usize) -> Vec3 {
    Vec3::new(LABEL_OFFSET_X, layer_y(index), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacks_downward_from_top() {
        assert_eq!(layer_y(0), 8.0);
        assert_eq!(layer_y(1), 6.0);
        assert_eq!(layer_y(8), -8.0);
        assert_eq!(layer_y(19), -30.0);
    }

    #[test]
    fn centers_and_anchors_share_height() {
        for i in 0..5 {
            assert_eq!(layer_center(i).y, label_anchor(i).y);
            assert_eq!(layer_center(i).x, 0.0);
            assert_eq!(label_anchor(i).x, LABEL_OFFSET_X);
        }
    }
}
