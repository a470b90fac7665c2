//! CPU tessellation of draw commands into GPU vertex batches

use super::primitives::{
    box_faces, DrawCommand, DrawList, BOX_FACE_NORMALS, CONE_SLICES, CONE_STACKS, SPHERE_SLICES,
    SPHERE_STACKS,
};
use super::renderer::Vertex;
use glam::{Quat, Vec3, Vec4};
use std::f32::consts::{PI, TAU};

/// Vertices grouped by primitive topology
#[derive(Debug, Clone, Default)]
pub struct Batches {
    /// Triangle list
    pub triangles: Vec<Vertex>,
    /// Line list
    pub lines: Vec<Vertex>,
}

impl Batches {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }
}

/// Tessellate every command in `list`
pub fn tessellate(list: &DrawList) -> Batches {
    let mut batches = Batches::default();
    for command in list.commands() {
        tessellate_command(command, &mut batches);
    }
    log::trace!(
        target: "netviz_plot",
        "tessellated {} commands into {} triangles, {} lines",
        list.commands().len(),
        batches.triangle_count(),
        batches.line_count()
    );
    batches
}

fn tessellate_command(command: &DrawCommand, out: &mut Batches) {
    match *command {
        DrawCommand::Cuboid {
            center,
            size,
            color,
        } => push_box(&mut out.triangles, center, size, color),
        DrawCommand::Sphere {
            center,
            radius,
            color,
        } => push_sphere(&mut out.triangles, center, radius, color),
        DrawCommand::Segment { from, to, color } => {
            out.lines.push(Vertex::new(from, color));
            out.lines.push(Vertex::new(to, color));
        }
        DrawCommand::Cone {
            base,
            orientation,
            length,
            radius,
            color,
        } => push_cone(
            &mut out.triangles,
            base,
            orientation.to_quat(),
            length,
            radius,
            color,
        ),
    }
}

fn shaded(position: Vec3, normal: Vec3, color: Vec4) -> Vertex {
    Vertex::new(position, color).with_normal(normal)
}

/// Two triangles per quad: (a, b, c) and (a, c, d)
fn push_quad(out: &mut Vec<Vertex>, quad: [Vertex; 4]) {
    let [a, b, c, d] = quad;
    out.extend_from_slice(&[a, b, c, a, c, d]);
}

fn push_box(out: &mut Vec<Vertex>, center: Vec3, size: Vec3, color: Vec4) {
    for (face, normal) in box_faces(center, size).iter().zip(BOX_FACE_NORMALS) {
        push_quad(out, face.map(|p| shaded(p, normal, color)));
    }
}

fn push_sphere(out: &mut Vec<Vertex>, center: Vec3, radius: f32, color: Vec4) {
    // Unit-sphere point at stack `i` (from +z down to -z) and slice `j`
    let unit = |i: u32, j: u32| {
        let phi = PI * i as f32 / SPHERE_STACKS as f32;
        let theta = TAU * j as f32 / SPHERE_SLICES as f32;
        Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
    };
    let vertex = |n: Vec3| shaded(center + n * radius, n, color);

    for i in 0..SPHERE_STACKS {
        for j in 0..SPHERE_SLICES {
            push_quad(
                out,
                [
                    vertex(unit(i, j)),
                    vertex(unit(i + 1, j)),
                    vertex(unit(i + 1, j + 1)),
                    vertex(unit(i, j + 1)),
                ],
            );
        }
    }
}

/// Open cone along local +z: base radius `radius` at z = 0, apex at z = `length`
fn push_cone(
    out: &mut Vec<Vertex>,
    base: Vec3,
    rotation: Quat,
    length: f32,
    radius: f32,
    color: Vec4,
) {
    let vertex = |k: u32, j: u32| {
        let t = k as f32 / CONE_STACKS as f32;
        let theta = TAU * j as f32 / CONE_SLICES as f32;
        let (sin, cos) = theta.sin_cos();
        let r = radius * (1.0 - t);
        let local = Vec3::new(cos * r, sin * r, length * t);
        let normal = Vec3::new(cos * length, sin * length, radius).normalize_or_zero();
        shaded(base + rotation * local, rotation * normal, color)
    };

    for k in 0..CONE_STACKS {
        for j in 0..CONE_SLICES {
            push_quad(
                out,
                [vertex(k, j), vertex(k, j + 1), vertex(k + 1, j + 1), vertex(k + 1, j)],
            );
        }
    }
}
