//! End-to-end scene composition tests
//!
//! Builds networks through the public API, composes frames and checks the
//! recorded geometry:
//! - preset contents
//! - connector counts for dense layers
//! - arrow head orientation
//! - frame reproducibility and orbit behaviour

use glam::{Vec2, Vec3, Vec4};
use netviz_plot::core::{
    tessellate, Camera, CameraState, ConeOrientation, DrawCommand, DrawList, EventHandler,
    MouseButton, PointerEvent,
};
use netviz_plot::network::{LayerKind, MAX_LAYERS};
use netviz_plot::{Layer, NetworkModel, Preset, Rgb, Session};

const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);

fn cone_orientations(list: &DrawList) -> Vec<ConeOrientation> {
    list.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Cone { orientation, .. } => Some(*orientation),
            _ => None,
        })
        .collect()
}

#[test]
fn alexnet_preset_shape() {
    let net = Preset::AlexNet.build();
    assert_eq!(net.len(), 9);

    let first = &net.layers()[0];
    assert_eq!(first.label(), "Input");
    assert_eq!(first.color(), Rgb::WHITE);
    assert_eq!(first.kind().box_size(), Some(Vec3::new(2.0, 1.0, 2.0)));

    for layer in &net.layers()[6..] {
        assert_eq!(layer.kind(), LayerKind::FullyConnected { neuron_count: 5 });
    }
    assert_eq!(net.layers()[8].label(), "FC8");
}

#[test]
fn models_only_hold_valid_layers() {
    let empty = LayerKind::FullyConnected { neuron_count: 0 };
    assert!(Layer::new(empty, Rgb::WHITE, "FC").is_err());
    assert!(Layer::boxed(-1.0, f32::NAN, 2.0, Rgb::WHITE, "Box").is_err());

    let mut net = NetworkModel::new("checked");
    net.push(Layer::fully_connected(0, Rgb::WHITE, "FC"));
    assert_eq!(
        net.layers()[0].kind(),
        LayerKind::FullyConnected { neuron_count: 1 }
    );

    for preset in Preset::ALL {
        assert!(preset.build().iter().all(|l| l.kind().validate().is_ok()));
    }
}

#[test]
fn preset_layer_counts() {
    let counts: Vec<usize> = Preset::ALL.iter().map(|p| p.build().len()).collect();
    assert_eq!(counts, vec![9, 9, 7]);
    assert_eq!(Preset::ResNet18.build().layers()[6].label(), "FinalFC");
}

#[test]
fn coincident_arrow_records_nothing() {
    let mut list = DrawList::new();
    let p = Vec3::new(1.0, 2.0, 3.0);
    list.draw_arrow(p, p, GREEN);
    list.draw_arrow(p, p + Vec3::splat(1e-6), GREEN);
    assert!(list.is_empty());
    assert!(tessellate(&list).triangles.is_empty());
}

#[test]
fn dense_layer_emits_square_connector_count() {
    for n in [1u32, 2, 5, 7] {
        let mut net = NetworkModel::new("dense");
        net.push(Layer::fully_connected(n, Rgb::new(1.0, 1.0, 0.0), "FC"));
        let session = Session::new(net);
        let stats = session.frame_stats();
        assert_eq!(stats.spheres, n as usize);
        assert_eq!(stats.cones, (n * n) as usize);
        assert_eq!(stats.segments, (n * n) as usize);
    }
}

#[test]
fn axis_fallbacks() {
    let mut list = DrawList::new();
    list.draw_arrow(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0), GREEN);
    list.draw_arrow(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0), GREEN);
    list.draw_arrow(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), GREEN);

    let orientations = cone_orientations(&list);
    assert_eq!(orientations[0], ConeOrientation::FlipX);
    assert_eq!(orientations[1], ConeOrientation::Identity);
    match orientations[2] {
        ConeOrientation::AxisAngle { axis, degrees } => {
            assert!((degrees - 90.0).abs() < 1e-4);
            assert_eq!(axis, Vec3::new(0.0, 1.0, 0.0));
        }
        other => panic!("expected axis-angle, got {other:?}"),
    }
}

#[test]
fn cone_rotation_maps_z_onto_direction() {
    let dir = Vec3::new(1.0, -2.0, 0.5).normalize();
    let q = ConeOrientation::for_direction(dir).to_quat();
    assert!((q * Vec3::Z - dir).length() < 1e-5);
}

#[test]
fn same_state_same_frame() {
    let net = Preset::Vgg16.build();
    let camera = Camera::new();
    let mut state = CameraState::new();
    state.press(Vec2::new(10.0, 10.0));
    state.move_to(Vec2::new(40.0, -5.0));

    let a = netviz_plot::core::compose_frame(&net, &camera, &state);
    let b = netviz_plot::core::compose_frame(&net, &camera, &state);
    assert_eq!(a, b);
    assert_eq!(tessellate(&a.draw_list).triangles, tessellate(&b.draw_list).triangles);
}

#[test]
fn drag_then_release() {
    let mut session = Session::new(Preset::AlexNet.build());
    session.handle_event(PointerEvent::Press {
        position: Vec2::new(100.0, 100.0),
        button: MouseButton::Left,
    });
    session.handle_event(PointerEvent::Move {
        position: Vec2::new(110.0, 105.0),
    });
    session.handle_event(PointerEvent::Release {
        position: Vec2::new(110.0, 105.0),
        button: MouseButton::Left,
    });
    session.handle_event(PointerEvent::Move {
        position: Vec2::new(500.0, 500.0),
    });
    assert_eq!(session.camera_state.yaw, 5.0);
    assert_eq!(session.camera_state.pitch, 2.5);
}

#[test]
fn oversized_network_truncates() {
    let net: NetworkModel = (0..MAX_LAYERS + 5)
        .map(|i| Layer::boxed(1.0, 1.0, 1.0, Rgb::WHITE, format!("Layer {i}")).unwrap())
        .collect();
    assert_eq!(net.len(), MAX_LAYERS);
    assert_eq!(net.layers()[MAX_LAYERS - 1].label(), "Layer 19");

    let stats = Session::new(net).frame_stats();
    assert_eq!(stats.cuboids, MAX_LAYERS);
    assert_eq!(stats.labels, MAX_LAYERS);
}

#[test]
fn connectors_use_label_color() {
    let frame = Session::new(Preset::ResNet18.build()).compose_frame();
    let first_segment = frame
        .draw_list
        .commands()
        .iter()
        .find_map(|c| match c {
            DrawCommand::Segment { color, .. } => Some(*color),
            _ => None,
        });
    assert_eq!(first_segment, Some(Vec4::ONE));
    assert_eq!(frame.clear_color, Vec4::new(0.0, 0.0, 0.0, 1.0));
}
