//! Primitive drawing routines: box, neuron sphere and directed arrow
//!
//! Primitives are recorded as [`DrawCommand`]s into a per-frame [`DrawList`].
//! The list is tessellated and uploaded once per frame; nothing is kept
//! between frames.

use glam::{Quat, Vec3, Vec4};

/// Segments shorter than this are treated as degenerate and not drawn
pub const ARROW_EPSILON: f32 = 1e-4;

/// Arrow heads never exceed this length, nor half the arrow
pub const ARROW_HEAD_MAX_LENGTH: f32 = 0.5;

/// Base radius of every arrow head
pub const ARROW_HEAD_RADIUS: f32 = 0.2;

/// Radius of a neuron sphere
pub const NEURON_RADIUS: f32 = 0.3;

/// Sphere tessellation (longitude slices, latitude stacks)
pub const SPHERE_SLICES: u32 = 16;
pub const SPHERE_STACKS: u32 = 16;

/// Cone tessellation (slices around the axis, stacks along it)
pub const CONE_SLICES: u32 = 12;
pub const CONE_STACKS: u32 = 3;

/// Rotation that carries the cone's local +z axis onto an arrow direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConeOrientation {
    /// Direction is already +z
    Identity,
    /// Rotate `degrees` about an axis in the xy-plane
    AxisAngle { axis: Vec3, degrees: f32 },
    /// Direction is -z; the cross product vanishes so flip about x instead
    FlipX,
}

impl ConeOrientation {
    /// Orientation for a unit direction `u`
    pub fn for_direction(u: Vec3) -> Self {
        let degrees = u.z.clamp(-1.0, 1.0).acos().to_degrees();
        // +z cross u, confined to the xy-plane
        let axis = Vec3::new(-u.y, u.x, 0.0);
        if axis.truncate().length() > ARROW_EPSILON {
            ConeOrientation::AxisAngle { axis, degrees }
        } else if u.z < 0.0 {
            ConeOrientation::FlipX
        } else {
            ConeOrientation::Identity
        }
    }

    pub fn to_quat(self) -> Quat {
        match self {
            ConeOrientation::Identity => Quat::IDENTITY,
            ConeOrientation::AxisAngle { axis, degrees } => {
                Quat::from_axis_angle(axis.normalize(), degrees.to_radians())
            }
            ConeOrientation::FlipX => Quat::from_rotation_x(std::f32::consts::PI),
        }
    }
}

/// A single retained draw operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned solid; `size` is (width, height, depth)
    Cuboid { center: Vec3, size: Vec3, color: Vec4 },
    Sphere { center: Vec3, radius: f32, color: Vec4 },
    /// Straight line (arrow shaft)
    Segment { from: Vec3, to: Vec3, color: Vec4 },
    /// Open cone whose base sits at `base`, extending `length` along the oriented +z
    Cone {
        base: Vec3,
        orientation: ConeOrientation,
        length: f32,
        radius: f32,
        color: Vec4,
    },
}

/// Text the label collaborator should draw near a world position
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Vec3,
    pub color: Vec4,
}

/// Summary counts for a draw list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub cuboids: usize,
    pub spheres: usize,
    pub segments: usize,
    pub cones: usize,
    pub labels: usize,
}

/// Per-frame list of draw commands and label requests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    labels: Vec<Label>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.labels.is_empty()
    }

    /// Closed six-faced box centered at `center`
    pub fn draw_box(&mut self, center: Vec3, width: f32, height: f32, depth: f32, color: Vec4) {
        self.commands.push(DrawCommand::Cuboid {
            center,
            size: Vec3::new(width, height, depth),
            color,
        });
    }

    /// Neuron sphere
    pub fn draw_sphere(&mut self, center: Vec3, radius: f32, color: Vec4) {
        self.commands.push(DrawCommand::Sphere {
            center,
            radius,
            color,
        });
    }

    /// Directed connector: a shaft plus a cone head at `to`.
    /// Zero-length connectors draw nothing.
    pub fn draw_arrow(&mut self, from: Vec3, to: Vec3, color: Vec4) {
        let d = to - from;
        let length = d.length();
        if !length.is_finite() || length < ARROW_EPSILON {
            return;
        }

        let head_length = ARROW_HEAD_MAX_LENGTH.min(0.5 * length);
        let u = d / length;
        let shaft_end = from + u * (length - head_length);

        self.commands.push(DrawCommand::Segment {
            from,
            to: shaft_end,
            color,
        });
        self.commands.push(DrawCommand::Cone {
            base: shaft_end,
            orientation: ConeOrientation::for_direction(u),
            length: head_length,
            radius: ARROW_HEAD_RADIUS,
            color,
        });
    }

    /// Queue a text label
    pub fn draw_label(&mut self, text: impl Into<String>, anchor: Vec3, color: Vec4) {
        self.labels.push(Label {
            text: text.into(),
            anchor,
            color,
        });
    }

    pub fn stats(&self) -> DrawStats {
        let mut stats = DrawStats {
            labels: self.labels.len(),
            ..DrawStats::default()
        };
        for command in &self.commands {
            match command {
                DrawCommand::Cuboid { .. } => stats.cuboids += 1,
                DrawCommand::Sphere { .. } => stats.spheres += 1,
                DrawCommand::Segment { .. } => stats.segments += 1,
                DrawCommand::Cone { .. } => stats.cones += 1,
            }
        }
        stats
    }
}

/// Corner positions of a box's faces in emission order:
/// front, back, left, right, top, bottom.
///
/// Each quad winds counter-clockwise when seen from outside the box.
pub fn box_faces(center: Vec3, size: Vec3) -> [[Vec3; 4]; 6] {
    let h = size * 0.5;
    let c = center;
    let v = |sx: f32, sy: f32, sz: f32| c + Vec3::new(sx * h.x, sy * h.y, sz * h.z);
    [
        // front
        [v(-1.0, -1.0, 1.0), v(1.0, -1.0, 1.0), v(1.0, 1.0, 1.0), v(-1.0, 1.0, 1.0)],
        // back
        [v(-1.0, -1.0, -1.0), v(-1.0, 1.0, -1.0), v(1.0, 1.0, -1.0), v(1.0, -1.0, -1.0)],
        // left
        [v(-1.0, -1.0, -1.0), v(-1.0, -1.0, 1.0), v(-1.0, 1.0, 1.0), v(-1.0, 1.0, -1.0)],
        // right
        [v(1.0, -1.0, -1.0), v(1.0, 1.0, -1.0), v(1.0, 1.0, 1.0), v(1.0, -1.0, 1.0)],
        // top
        [v(-1.0, 1.0, -1.0), v(-1.0, 1.0, 1.0), v(1.0, 1.0, 1.0), v(1.0, 1.0, -1.0)],
        // bottom
        [v(-1.0, -1.0, -1.0), v(1.0, -1.0, -1.0), v(1.0, -1.0, 1.0), v(-1.0, -1.0, 1.0)],
    ]
}

/// Outward normals matching [`box_faces`]
pub const BOX_FACE_NORMALS: [Vec3; 6] = [
    Vec3::Z,
    Vec3::NEG_Z,
    Vec3::NEG_X,
    Vec3::X,
    Vec3::Y,
    Vec3::NEG_Y,
];
