//! Layer label text drawn with egui over the rendered scene

use crate::core::{world_to_screen, Label};
use egui::{Align2, Color32, Context, FontId, LayerId, Pos2};
use glam::{Mat4, Vec2, Vec4};

/// Default label font size in points
pub const LABEL_FONT_SIZE: f32 = 14.0;

/// A label resolved to egui screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub text: String,
    /// Left end of the text baseline, in egui points
    pub position: Pos2,
    pub color: Color32,
}

/// Paints projected labels onto the egui background layer
#[derive(Debug, Clone)]
pub struct LabelOverlay {
    font: FontId,
}

impl Default for LabelOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelOverlay {
    pub fn new() -> Self {
        Self::with_font_size(LABEL_FONT_SIZE)
    }

    pub fn with_font_size(size: f32) -> Self {
        Self {
            font: FontId::monospace(size),
        }
    }

    /// Project each label anchor into the viewport.
    ///
    /// `surface_size` is in physical pixels; the result is divided by
    /// `pixels_per_point` so egui receives logical coordinates. Anchors
    /// behind the eye are skipped.
    pub fn place(
        &self,
        labels: &[Label],
        view_proj: Mat4,
        surface_size: Vec2,
        pixels_per_point: f32,
    ) -> Vec<PlacedLabel> {
        let ppp = if pixels_per_point > 0.0 {
            pixels_per_point
        } else {
            1.0
        };
        labels
            .iter()
            .filter_map(|label| {
                let screen = world_to_screen(view_proj, label.anchor, surface_size)? / ppp;
                Some(PlacedLabel {
                    text: label.text.clone(),
                    position: Pos2::new(screen.x, screen.y),
                    color: to_color32(label.color),
                })
            })
            .collect()
    }

    pub fn paint(&self, ctx: &Context, labels: &[PlacedLabel]) {
        let painter = ctx.layer_painter(LayerId::background());
        for label in labels {
            painter.text(
                label.position,
                Align2::LEFT_BOTTOM,
                &label.text,
                self.font.clone(),
                label.color,
            );
        }
    }
}

fn to_color32(color: Vec4) -> Color32 {
    let [r, g, b, a] = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0)
        .round()
        .to_array()
        .map(|c| c as u8);
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Camera, CameraState, LABEL_COLOR};
    use glam::Vec3;

    fn label(anchor: Vec3) -> Label {
        Label {
            text: "Conv1".to_string(),
            anchor,
            color: LABEL_COLOR,
        }
    }

    #[test]
    fn target_lands_in_viewport_center() {
        let vp = Camera::new().view_proj_matrix(&CameraState::default());
        let overlay = LabelOverlay::new();
        let placed = overlay.place(&[label(Vec3::ZERO)], vp, Vec2::new(800.0, 600.0), 2.0);
        assert_eq!(placed.len(), 1);
        assert!((placed[0].position.x - 200.0).abs() < 1e-3);
        assert!((placed[0].position.y - 150.0).abs() < 1e-3);
        assert_eq!(placed[0].color, Color32::WHITE);
    }

    #[test]
    fn labels_sit_right_of_stack() {
        let vp = Camera::new().view_proj_matrix(&CameraState::default());
        let placed = LabelOverlay::new().place(
            &[label(Vec3::new(3.0, 8.0, 0.0))],
            vp,
            Vec2::new(800.0, 600.0),
            1.0,
        );
        assert!(placed[0].position.x > 400.0);
    }

    #[test]
    fn anchors_behind_eye_are_dropped() {
        let vp = Camera::new().view_proj_matrix(&CameraState::default());
        let placed = LabelOverlay::new().place(
            &[label(Vec3::new(0.0, 30.0, 0.0))],
            vp,
            Vec2::new(800.0, 600.0),
            1.0,
        );
        assert!(placed.is_empty());
    }
}
