//! Network data model
//!
//! An ordered, bounded sequence of schematic layers. Insertion order is
//! stacking order: the first layer is drawn topmost.

pub mod presets;

use glam::{Vec3, Vec4};

/// Maximum number of layers a network can hold
pub const MAX_LAYERS: usize = 20;

/// Maximum label length in characters
pub const MAX_LABEL_LEN: usize = 63;

/// RGB color with every channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    r: f32,
    g: f32,
    b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Create a color, clamping each channel into [0, 1]. NaN maps to 0.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
        }
    }

    pub fn r(&self) -> f32 {
        self.r
    }

    pub fn g(&self) -> f32 {
        self.g
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Opaque RGBA form used by the renderer
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, 1.0)
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Variant-specific geometry of a layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerKind {
    /// Input/convolution stage drawn as a solid box
    Box { width: f32, height: f32, depth: f32 },
    /// Dense stage drawn as a row of neurons
    FullyConnected { neuron_count: u32 },
}

/// A layer whose geometry breaks its variant's constraints
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LayerError {
    #[error("box dimensions must be finite and positive, got {width} x {height} x {depth}")]
    InvalidBox { width: f32, height: f32, depth: f32 },
    #[error("a fully-connected layer needs at least one neuron")]
    NoNeurons,
}

impl LayerKind {
    /// Check box dimensions are finite and positive and the neuron count is non-zero
    pub fn validate(&self) -> Result<(), LayerError> {
        match *self {
            LayerKind::Box {
                width,
                height,
                depth,
            } => {
                let positive = |v: f32| v.is_finite() && v > 0.0;
                if positive(width) && positive(height) && positive(depth) {
                    Ok(())
                } else {
                    Err(LayerError::InvalidBox {
                        width,
                        height,
                        depth,
                    })
                }
            }
            LayerKind::FullyConnected { neuron_count: 0 } => Err(LayerError::NoNeurons),
            LayerKind::FullyConnected { .. } => Ok(()),
        }
    }

    pub fn is_fully_connected(&self) -> bool {
        matches!(self, LayerKind::FullyConnected { .. })
    }

    /// Box dimensions as a vector (width, height, depth)
    pub fn box_size(&self) -> Option<Vec3> {
        match *self {
            LayerKind::Box {
                width,
                height,
                depth,
            } => Some(Vec3::new(width, height, depth)),
            LayerKind::FullyConnected { .. } => None,
        }
    }
}

/// One schematic network stage. Only constructed with valid geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    color: Rgb,
    label: String,
}

impl Layer {
    pub fn new(kind: LayerKind, color: Rgb, label: impl Into<String>) -> Result<Self, LayerError> {
        kind.validate()?;
        Ok(Self {
            kind,
            color,
            label: truncate_label(label.into()),
        })
    }

    /// Box layer; every dimension must be finite and positive
    pub fn boxed(
        width: f32,
        height: f32,
        depth: f32,
        color: Rgb,
        label: impl Into<String>,
    ) -> Result<Self, LayerError> {
        Self::new(
            LayerKind::Box {
                width,
                height,
                depth,
            },
            color,
            label,
        )
    }

    /// Fully-connected layer. The neuron count is raised to at least one.
    pub fn fully_connected(neuron_count: u32, color: Rgb, label: impl Into<String>) -> Self {
        Self {
            kind: LayerKind::FullyConnected {
                neuron_count: neuron_count.max(1),
            },
            color,
            label: truncate_label(label.into()),
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

fn truncate_label(mut label: String) -> String {
    if let Some((idx, _)) = label.char_indices().nth(MAX_LABEL_LEN) {
        label.truncate(idx);
    }
    label
}

/// Append-only network with a fixed capacity of [`MAX_LAYERS`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkModel {
    name: String,
    layers: Vec<Layer>,
}

impl NetworkModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: Vec::with_capacity(MAX_LAYERS),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a layer. Returns `false` and drops the layer once the network is full.
    pub fn push(&mut self, layer: Layer) -> bool {
        if self.is_full() {
            log::debug!(
                target: "netviz_plot",
                "network '{}' at capacity, dropping layer '{}'",
                self.name,
                layer.label()
            );
            return false;
        }
        self.layers.push(layer);
        true
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.layers.len() >= MAX_LAYERS
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }
}

impl FromIterator<Layer> for NetworkModel {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        let mut model = NetworkModel::new("network");
        for layer in iter {
            if !model.push(layer) {
                break;
            }
        }
        model
    }
}

/// Clamp a requested layer count to the network capacity
pub fn clamp_layer_count(requested: usize) -> usize {
    requested.min(MAX_LAYERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_channels_are_clamped() {
        let c = Rgb::new(-0.5, 0.25, 7.0);
        assert_eq!(c.to_array(), [0.0, 0.25, 1.0]);
        assert_eq!(Rgb::new(f32::NAN, 1.0, 1.0).r(), 0.0);
    }

    #[test]
    fn long_labels_are_truncated() {
        let layer = Layer::boxed(1.0, 1.0, 1.0, Rgb::WHITE, "x".repeat(100)).unwrap();
        assert_eq!(layer.label().chars().count(), MAX_LABEL_LEN);

        let layer = Layer::boxed(1.0, 1.0, 1.0, Rgb::WHITE, "é".repeat(80)).unwrap();
        assert_eq!(layer.label().chars().count(), MAX_LABEL_LEN);
    }

    #[test]
    fn push_beyond_capacity_truncates() {
        let mut model = NetworkModel::new("big");
        for i in 0..(MAX_LAYERS + 5) {
            model.push(Layer::fully_connected(2, Rgb::WHITE, format!("Layer {i}")));
        }
        assert_eq!(model.len(), MAX_LAYERS);
        assert!(model.is_full());
        assert_eq!(model.layers().last().unwrap().label(), "Layer 19");
    }

    #[test]
    fn collect_stops_at_capacity() {
        let model: NetworkModel = (0..50)
            .map(|i| Layer::boxed(1.0, 1.0, 1.0, Rgb::WHITE, format!("L{i}")).unwrap())
            .collect();
        assert_eq!(model.len(), MAX_LAYERS);
    }

    #[test]
    fn neuron_count_is_at_least_one() {
        let layer = Layer::fully_connected(0, Rgb::WHITE, "FC");
        assert_eq!(layer.kind(), LayerKind::FullyConnected { neuron_count: 1 });
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let empty = LayerKind::FullyConnected { neuron_count: 0 };
        assert_eq!(
            Layer::new(empty, Rgb::WHITE, "FC"),
            Err(LayerError::NoNeurons)
        );
        for dims in [
            (-1.0, 1.0, 2.0),
            (1.0, f32::NAN, 2.0),
            (1.0, 1.0, 0.0),
            (f32::INFINITY, 1.0, 1.0),
        ] {
            let (w, h, d) = dims;
            assert!(
                matches!(
                    Layer::boxed(w, h, d, Rgb::WHITE, "Box"),
                    Err(LayerError::InvalidBox { .. })
                ),
                "{dims:?} accepted"
            );
        }
        assert!(Layer::boxed(0.5, 1.0, 2.0, Rgb::WHITE, "Box").is_ok());
    }

    #[test]
    fn layer_count_clamp() {
        assert_eq!(clamp_layer_count(3), 3);
        assert_eq!(clamp_layer_count(21), MAX_LAYERS);
    }
}
