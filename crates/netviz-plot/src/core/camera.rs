//! Camera system: a fixed top-down look-at plus drag-driven orbit angles
//!
//! The projection and eye never move. Dragging with the primary button only
//! accumulates pitch/yaw, which are applied on top of the look-at transform.

use crate::core::interaction::{EventHandler, MouseButton, PointerEvent};
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// Degrees of rotation per pixel of pointer travel
pub const ROTATE_SENSITIVITY: f32 = 0.5;

/// Camera projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov: 45.0_f32.to_radians(),
            near: 1.0,
            far: 100.0,
        }
    }
}

/// Fixed viewing camera looking down on the stack
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Perspective,
    pub aspect_ratio: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Top-down view: eye above the origin, screen-up pointing along -z
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 20.0, 0.0),
            target: Vec3::ZERO,
            up: Vec3::NEG_Z,
            projection: Perspective::default(),
            aspect_ratio: 800.0 / 600.0,
        }
    }

    /// Update aspect ratio (call when window resizes)
    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let Perspective { fov, near, far } = self.projection;
        Mat4::perspective_rh(fov, self.aspect_ratio, near, far)
    }

    /// Look-at transform followed by the orbit rotations (pitch about x, then yaw about y)
    pub fn view_matrix(&self, orbit: &CameraState) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
            * Mat4::from_rotation_x(orbit.pitch.to_radians())
            * Mat4::from_rotation_y(orbit.yaw.to_radians())
    }

    pub fn view_proj_matrix(&self, orbit: &CameraState) -> Mat4 {
        self.projection_matrix() * self.view_matrix(orbit)
    }
}

/// Project a world position to screen pixels (origin top-left).
/// Returns `None` for points behind the eye.
pub fn world_to_screen(view_proj: Mat4, world: Vec3, screen_size: Vec2) -> Option<Vec2> {
    let clip = view_proj * world.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.xyz() / clip.w;
    let x = (ndc.x + 1.0) * 0.5 * screen_size.x;
    let y = (1.0 - ndc.y) * 0.5 * screen_size.y;
    let screen = Vec2::new(x, y);
    screen.is_finite().then_some(screen)
}

/// Pointer drag state of the orbit controller
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        last: Vec2,
    },
}

/// Accumulated orbit angles plus the transient drag state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraState {
    /// Rotation about x, degrees. Unbounded.
    pub pitch: f32,
    /// Rotation about y, degrees. Unbounded.
    pub yaw: f32,
    pub drag: DragState,
}

impl CameraState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Start dragging from `position`
    pub fn press(&mut self, position: Vec2) {
        self.drag = DragState::Dragging { last: position };
    }

    /// Stop dragging. The angles keep their values; there is no inertia.
    pub fn release(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Pointer moved. Returns `true` when the angles changed.
    pub fn move_to(&mut self, position: Vec2) -> bool {
        let DragState::Dragging { last } = self.drag else {
            return false;
        };
        let delta = position - last;
        self.yaw += delta.x * ROTATE_SENSITIVITY;
        self.pitch += delta.y * ROTATE_SENSITIVITY;
        self.drag = DragState::Dragging { last: position };
        log::trace!(
            target: "netviz_plot",
            "orbit pitch={} yaw={}",
            self.pitch,
            self.yaw
        );
        delta != Vec2::ZERO
    }
}

impl EventHandler for CameraState {
    fn handle_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Press {
                position,
                button: MouseButton::Left,
            } => {
                self.press(position);
                false
            }
            PointerEvent::Release {
                button: MouseButton::Left,
                ..
            } => {
                self.release();
                false
            }
            PointerEvent::Move { position } => self.move_to(position),
            _ => false,
        }
    }
}
