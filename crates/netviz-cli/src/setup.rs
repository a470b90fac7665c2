//! Console setup: preset menu and custom layer entry
//!
//! Numbers may be separated by whitespace, commas or both. Malformed or
//! out-of-range entries print a short message and ask again; end of input
//! aborts setup.

use log::debug;
use netviz_plot::network::{
    clamp_layer_count, Layer, LayerError, LayerKind, NetworkModel, Rgb, MAX_LAYERS,
};
use netviz_plot::Preset;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Upper bound on neurons per dense layer; each layer draws n² connectors
pub const MAX_NEURONS: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input ended before setup was complete")]
    EndOfInput,
    #[error(transparent)]
    Layer(#[from] LayerError),
}

/// Result of the top-level menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Preset(Preset),
    Custom,
}

impl MenuChoice {
    /// 1-3 select a preset; every other number means custom entry
    pub fn from_number(choice: i64) -> Self {
        Preset::from_menu_index(choice)
            .map(MenuChoice::Preset)
            .unwrap_or(MenuChoice::Custom)
    }
}

/// Split `line` on whitespace and commas and parse exactly `count` values
pub fn parse_numbers<T: FromStr>(line: &str, count: usize) -> Option<Vec<T>> {
    let values = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<T>().ok())
        .collect::<Option<Vec<T>>>()?;
    (values.len() == count).then_some(values)
}

/// Interactive prompt over any line reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show the menu and build the chosen network
    pub fn run(&mut self) -> Result<NetworkModel, SetupError> {
        match self.menu()? {
            MenuChoice::Preset(preset) => {
                debug!("selected preset {}", preset.name());
                Ok(preset.build())
            }
            MenuChoice::Custom => self.custom_network(),
        }
    }

    pub fn menu(&mut self) -> Result<MenuChoice, SetupError> {
        writeln!(self.output, "Choose network option:")?;
        for preset in Preset::ALL {
            writeln!(
                self.output,
                "{}. Predefined: {}",
                preset.menu_index(),
                preset.name()
            )?;
        }
        writeln!(self.output, "4. Custom")?;
        let [choice] = self.ask::<i64, 1>("Enter choice (1-4): ", |_| None)?;
        Ok(MenuChoice::from_number(choice))
    }

    /// Prompt for every layer of a custom network
    pub fn custom_network(&mut self) -> Result<NetworkModel, SetupError> {
        let prompt = format!("Enter the number of layers (max {MAX_LAYERS}): ");
        let [requested] = self.ask::<i64, 1>(&prompt, |&[n]| {
            (n < 0).then_some("the layer count cannot be negative")
        })?;
        let count = clamp_layer_count(requested as usize);
        if count < requested as usize {
            writeln!(self.output, "Only the first {MAX_LAYERS} layers will be used.")?;
        }
        writeln!(
            self.output,
            "Note: You may separate numbers with spaces or commas."
        )?;

        let mut network = NetworkModel::new("Custom");
        for i in 0..count {
            let layer = self.custom_layer(i)?;
            network.push(layer);
        }
        Ok(network)
    }

    fn custom_layer(&mut self, index: usize) -> Result<Layer, SetupError> {
        let prompt = format!("Layer {index}: Enter type (0 for box, 1 for fully-connected): ");
        let [kind] = self.ask::<i64, 1>(&prompt, |_| None)?;
        let label = format!("Layer {index}");

        let kind = if kind == 0 {
            let [width, height, depth] =
                self.ask::<f32, 3>("Enter width, height, depth for box: ", |dims| {
                    dims.iter()
                        .any(|v| !v.is_finite() || *v <= 0.0)
                        .then_some("box dimensions must be positive")
                })?;
            LayerKind::Box {
                width,
                height,
                depth,
            }
        } else {
            let [n] = self.ask::<i64, 1>(
                "Enter number of neurons for fully-connected layer: ",
                |&[n]| {
                    (n < 1 || n > i64::from(MAX_NEURONS))
                        .then_some("the neuron count must be between 1 and 100")
                },
            )?;
            LayerKind::FullyConnected {
                neuron_count: n as u32,
            }
        };

        let [r, g, b] = self.ask::<f32, 3>(
            "Enter color (r, g, b, each between 0 and 1): ",
            |rgb| {
                rgb.iter()
                    .any(|v| v.is_nan())
                    .then_some("color components must be numbers")
            },
        )?;
        Ok(Layer::new(kind, Rgb::new(r, g, b), label)?)
    }

    /// Print `prompt` and read `N` numbers, asking again until they parse
    /// and `reject` returns `None`
    fn ask<T, const N: usize>(
        &mut self,
        prompt: &str,
        reject: impl Fn(&[T; N]) -> Option<&'static str>,
    ) -> Result<[T; N], SetupError>
    where
        T: FromStr,
    {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let line = self.read_line()?;
            let Some(values) = parse_numbers::<T>(&line, N) else {
                writeln!(self.output, "Please enter {N} number(s).")?;
                continue;
            };
            let Ok(values) = <[T; N]>::try_from(values) else {
                continue;
            };
            match reject(&values) {
                Some(reason) => writeln!(self.output, "Invalid input: {reason}.")?,
                None => return Ok(values),
            }
        }
    }

    fn read_line(&mut self) -> Result<String, SetupError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SetupError::EndOfInput);
        }
        Ok(line)
    }
}
