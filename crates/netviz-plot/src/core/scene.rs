//! Per-frame scene composition
//!
//! Walks the network in model order and records every layer, connector and
//! label into a fresh [`DrawList`], together with the view-projection for the
//! current orbit angles.

use super::camera::{Camera, CameraState};
use super::fully_connected::draw_fully_connected;
use super::layout::{label_anchor, layer_center, layer_y};
use super::primitives::DrawList;
use crate::network::{LayerKind, NetworkModel};
use glam::{Mat4, Vec4};

/// Color of label text and of the connectors between layer centers
pub const LABEL_COLOR: Vec4 = Vec4::ONE;

/// Background cleared at the start of each frame
pub const CLEAR_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub view_proj: Mat4,
    pub clear_color: Vec4,
    pub draw_list: DrawList,
}

/// Record the whole network into `list`
pub fn draw_network(list: &mut DrawList, network: &NetworkModel) {
    for (index, layer) in network.iter().enumerate() {
        let y = layer_y(index);
        let center = layer_center(index);

        if index > 0 {
            list.draw_arrow(layer_center(index - 1), center, LABEL_COLOR);
        }

        let color = layer.color().to_vec4();
        match layer.kind() {
            LayerKind::Box {
                width,
                height,
                depth,
            } => list.draw_box(center, width, height, depth, color),
            LayerKind::FullyConnected { neuron_count } => {
                draw_fully_connected(list, y, neuron_count, color)
            }
        }

        list.draw_label(layer.label(), label_anchor(index), LABEL_COLOR);
    }
}

/// Build the frame for the given network and orbit state
pub fn compose_frame(network: &NetworkModel, camera: &Camera, state: &CameraState) -> Frame {
    let mut draw_list = DrawList::new();
    draw_network(&mut draw_list, network);
    Frame {
        view_proj: camera.view_proj_matrix(state),
        clear_color: CLEAR_COLOR,
        draw_list,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::primitives::DrawCommand;
    use crate::network::{presets, Layer, Rgb};
    use glam::Vec3;

    #[test]
    fn first_layer_has_no_incoming_connector() {
        let mut net = NetworkModel::new("one");
        net.push(Layer::boxed(1.0, 1.0, 1.0, Rgb::WHITE, "Only").unwrap());
        let mut list = DrawList::new();
        draw_network(&mut list, &net);
        assert_eq!(list.commands().len(), 1);
        assert_eq!(list.labels().len(), 1);
        assert_eq!(list.labels()[0].anchor, Vec3::new(3.0, 8.0, 0.0));
    }

    #[test]
    fn connector_precedes_layer() {
        let mut net = NetworkModel::new("two");
        net.push(Layer::boxed(1.0, 1.0, 1.0, Rgb::WHITE, "A").unwrap());
        net.push(Layer::boxed(1.0, 1.0, 1.0, Rgb::new(1.0, 0.0, 0.0), "B").unwrap());
        let mut list = DrawList::new();
        draw_network(&mut list, &net);

        let kinds: Vec<&str> = list
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::Cuboid { .. } => "box",
                DrawCommand::Sphere { .. } => "sphere",
                DrawCommand::Segment { .. } => "segment",
                DrawCommand::Cone { .. } => "cone",
            })
            .collect();
        assert_eq!(kinds, vec!["box", "segment", "cone", "box"]);

        match list.commands()[1] {
            DrawCommand::Segment { from, color, .. } => {
                assert_eq!(from, Vec3::new(0.0, 8.0, 0.0));
                assert_eq!(color, LABEL_COLOR);
            }
            ref other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_network_draws_nothing() {
        let frame = compose_frame(
            &NetworkModel::new("empty"),
            &Camera::new(),
            &CameraState::new(),
        );
        assert!(frame.draw_list.is_empty());
    }

    #[test]
    fn alexnet_counts() {
        let net = presets::alexnet();
        let mut list = DrawList::new();
        draw_network(&mut list, &net);
        let stats = list.stats();
        assert_eq!(stats.cuboids, 6);
        assert_eq!(stats.spheres, 15);
        // 8 inter-layer connectors + 3 dense layers of 25
        assert_eq!(stats.cones, 8 + 3 * 25);
        assert_eq!(stats.labels, 9);
    }
}
