//! Predefined schematic architectures
//!
//! Dimensions are illustrative only; they convey relative shrinkage of the
//! feature maps rather than the real tensor shapes.

use super::{Layer, LayerKind, NetworkModel, Rgb};

/// Built-in architecture selectable from the setup menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    AlexNet,
    Vgg16,
    ResNet18,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::AlexNet, Preset::Vgg16, Preset::ResNet18];

    /// Menu choice (1-based) for this preset
    pub fn menu_index(self) -> u32 {
        match self {
            Preset::AlexNet => 1,
            Preset::Vgg16 => 2,
            Preset::ResNet18 => 3,
        }
    }

    pub fn from_menu_index(choice: i64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| i64::from(p.menu_index()) == choice)
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::AlexNet => "AlexNet",
            Preset::Vgg16 => "VGG16",
            Preset::ResNet18 => "ResNet18",
        }
    }

    pub fn build(self) -> NetworkModel {
        match self {
            Preset::AlexNet => alexnet(),
            Preset::Vgg16 => vgg16(),
            Preset::ResNet18 => resnet18(),
        }
    }
}

/// One row of a preset table: label, geometry, RGB
type LayerSpec = (&'static str, LayerKind, [f32; 3]);

const fn square(side: f32, height: f32) -> LayerKind {
    LayerKind::Box {
        width: side,
        height,
        depth: side,
    }
}

const DENSE: LayerKind = LayerKind::FullyConnected { neuron_count: 5 };

// The conv stages cycle through the same palette in every preset.
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];
const CYAN: [f32; 3] = [0.0, 1.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const ORANGE: [f32; 3] = [1.0, 0.5, 0.0];
const GREY: [f32; 3] = [0.5, 0.5, 0.5];

const ALEXNET: [LayerSpec; 9] = [
    ("Input", square(2.0, 1.0), WHITE),
    ("Conv1", square(2.0, 1.0), RED),
    ("Conv2", square(1.8, 1.0), GREEN),
    ("Conv3", square(1.6, 1.0), BLUE),
    ("Conv4", square(1.4, 1.0), MAGENTA),
    ("Conv5", square(1.2, 1.0), CYAN),
    ("FC6", DENSE, YELLOW),
    ("FC7", DENSE, ORANGE),
    ("FC8", DENSE, GREY),
];

const VGG16: [LayerSpec; 9] = [
    ("Input", square(3.0, 2.0), WHITE),
    ("ConvBlock1", square(3.0, 1.5), RED),
    ("ConvBlock2", square(2.8, 1.5), GREEN),
    ("ConvBlock3", square(2.6, 1.5), BLUE),
    ("ConvBlock4", square(2.4, 1.5), MAGENTA),
    ("ConvBlock5", square(2.2, 1.5), CYAN),
    ("FC1", DENSE, YELLOW),
    ("FC2", DENSE, ORANGE),
    ("FC3", DENSE, GREY),
];

const RESNET18: [LayerSpec; 7] = [
    ("Input", square(3.0, 2.0), WHITE),
    ("InitialConv", square(3.0, 1.5), RED),
    ("ResBlock1", square(2.8, 1.5), GREEN),
    ("ResBlock2", square(2.6, 1.5), BLUE),
    ("ResBlock3", square(2.4, 1.5), MAGENTA),
    ("ResBlock4", square(2.2, 1.5), CYAN),
    ("FinalFC", DENSE, YELLOW),
];

fn from_table(name: &str, table: &[LayerSpec]) -> NetworkModel {
    let mut model = NetworkModel::new(name);
    for &(label, kind, [r, g, b]) in table {
        match Layer::new(kind, Rgb::new(r, g, b), label) {
            Ok(layer) => {
                model.push(layer);
            }
            Err(err) => log::warn!(
                target: "netviz_plot",
                "skipping layer '{label}' of preset {name}: {err}"
            ),
        }
    }
    model
}

pub fn alexnet() -> NetworkModel {
    from_table(Preset::AlexNet.name(), &ALEXNET)
}

pub fn vgg16() -> NetworkModel {
    from_table(Preset::Vgg16.name(), &VGG16)
}

pub fn resnet18() -> NetworkModel {
    from_table(Preset::ResNet18.name(), &RESNET18)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(label: &str, w: f32, h: f32, rgb: [f32; 3]) -> (String, LayerKind, [f32; 3]) {
        let kind = LayerKind::Box {
            width: w,
            height: h,
            depth: w,
        };
        (label.to_string(), kind, rgb)
    }

    fn dense(label: &str, rgb: [f32; 3]) -> (String, LayerKind, [f32; 3]) {
        let kind = LayerKind::FullyConnected { neuron_count: 5 };
        (label.to_string(), kind, rgb)
    }

    fn layers_of(net: &NetworkModel) -> Vec<(String, LayerKind, [f32; 3])> {
        net.iter()
            .map(|l| (l.label().to_string(), l.kind(), l.color().to_array()))
            .collect()
    }

    #[test]
    fn menu_indices_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(
                Preset::from_menu_index(preset.menu_index() as i64),
                Some(preset)
            );
        }
        assert_eq!(Preset::from_menu_index(4), None);
        assert_eq!(Preset::from_menu_index(-1), None);
    }

    #[test]
    fn alexnet_layers() {
        let expected = vec![
            boxed("Input", 2.0, 1.0, [1.0, 1.0, 1.0]),
            boxed("Conv1", 2.0, 1.0, [1.0, 0.0, 0.0]),
            boxed("Conv2", 1.8, 1.0, [0.0, 1.0, 0.0]),
            boxed("Conv3", 1.6, 1.0, [0.0, 0.0, 1.0]),
            boxed("Conv4", 1.4, 1.0, [1.0, 0.0, 1.0]),
            boxed("Conv5", 1.2, 1.0, [0.0, 1.0, 1.0]),
            dense("FC6", [1.0, 1.0, 0.0]),
            dense("FC7", [1.0, 0.5, 0.0]),
            dense("FC8", [0.5, 0.5, 0.5]),
        ];
        assert_eq!(layers_of(&alexnet()), expected);
    }

    #[test]
    fn vgg16_layers() {
        let expected = vec![
            boxed("Input", 3.0, 2.0, [1.0, 1.0, 1.0]),
            boxed("ConvBlock1", 3.0, 1.5, [1.0, 0.0, 0.0]),
            boxed("ConvBlock2", 2.8, 1.5, [0.0, 1.0, 0.0]),
            boxed("ConvBlock3", 2.6, 1.5, [0.0, 0.0, 1.0]),
            boxed("ConvBlock4", 2.4, 1.5, [1.0, 0.0, 1.0]),
            boxed("ConvBlock5", 2.2, 1.5, [0.0, 1.0, 1.0]),
            dense("FC1", [1.0, 1.0, 0.0]),
            dense("FC2", [1.0, 0.5, 0.0]),
            dense("FC3", [0.5, 0.5, 0.5]),
        ];
        assert_eq!(layers_of(&vgg16()), expected);
    }

    #[test]
    fn resnet18_layers() {
        let expected = vec![
            boxed("Input", 3.0, 2.0, [1.0, 1.0, 1.0]),
            boxed("InitialConv", 3.0, 1.5, [1.0, 0.0, 0.0]),
            boxed("ResBlock1", 2.8, 1.5, [0.0, 1.0, 0.0]),
            boxed("ResBlock2", 2.6, 1.5, [0.0, 0.0, 1.0]),
            boxed("ResBlock3", 2.4, 1.5, [1.0, 0.0, 1.0]),
            boxed("ResBlock4", 2.2, 1.5, [0.0, 1.0, 1.0]),
            dense("FinalFC", [1.0, 1.0, 0.0]),
        ];
        assert_eq!(layers_of(&resnet18()), expected);
    }

    #[test]
    fn build_dispatches_by_preset() {
        assert_eq!(Preset::AlexNet.build(), alexnet());
        assert_eq!(Preset::Vgg16.build().name(), "VGG16");
        assert_eq!(Preset::ResNet18.build(), resnet18());
    }
}
