//! netviz - schematic 3D viewer for layered neural networks
//!
//! Picks a network from a preset or the interactive console menu and shows it
//! in a window with a drag-to-orbit camera.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use netviz_logging::{LogFormat, LoggingOptions};
use netviz_plot::{NetworkModel, NetworkWindow, Preset, Session};
use std::io;
use std::path::PathBuf;

mod config;
mod describe;
mod setup;

use config::{ConfigLoader, LogLevel, NetvizConfig};
use setup::Prompter;

#[derive(Parser)]
#[command(
    name = "netviz",
    version,
    about = "Schematic 3D viewer for layered neural networks",
    long_about = r#"
netviz draws a neural network as a vertical stack of layers: convolution
stages as solid boxes, dense stages as rows of neurons wired to the row
beneath. Drag with the left mouse button to orbit the view.

Without --preset an interactive menu offers AlexNet, VGG16, ResNet18 or a
custom network entered layer by layer.

Examples:
  netviz                          # Interactive menu
  netviz --preset vgg16           # Open VGG16 directly
  netviz describe --preset alexnet  # Print the network without a window
  netviz --generate-config > .netviz.yaml
"#,
    after_help = r#"
Environment Variables:
  NETVIZ_CONFIG=<path>        Path to configuration file
  NETVIZ_WIDTH=800            Window width in pixels
  NETVIZ_HEIGHT=600           Window height in pixels
  NETVIZ_VSYNC=1              Present with vsync
  NETVIZ_LOG_LEVEL=info       Log level (error, warn, info, debug, trace)
  NETVIZ_LOG=<filter>         Log filter directives (RUST_LOG takes precedence)
"#
)]
struct Cli {
    /// Network to show instead of asking on the console
    #[arg(long, value_enum, global = true)]
    preset: Option<PresetArg>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Set log level
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Log output format (text or json)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    generate_config: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Print the network and frame statistics without opening a window
    Describe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    Alexnet,
    Vgg16,
    Resnet18,
    /// Enter layers on the console
    Custom,
}

impl PresetArg {
    fn preset(self) -> Option<Preset> {
        match self {
            PresetArg::Alexnet => Some(Preset::AlexNet),
            PresetArg::Vgg16 => Some(Preset::Vgg16),
            PresetArg::Resnet18 => Some(Preset::ResNet18),
            PresetArg::Custom => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.generate_config {
        println!("{}", ConfigLoader::generate_sample_config());
        return Ok(());
    }

    let mut config = load_configuration(&cli)?;
    apply_cli_overrides(&mut config, &cli);

    let _logging = netviz_logging::init_logging(LoggingOptions {
        level: config.logging.level.as_str().to_string(),
        format: config.logging.format,
    });
    info!("netviz v{} starting", env!("CARGO_PKG_VERSION"));
    debug!("Configuration loaded: {config:?}");

    let network = resolve_network(cli.preset)?;

    match cli.command {
        Some(Commands::Describe) => {
            describe::describe(&network, &mut io::stdout().lock())
                .context("failed to write description")?;
            Ok(())
        }
        None => show_window(network, &config),
    }
}

fn load_configuration(cli: &Cli) -> Result<NetvizConfig> {
    match &cli.config {
        Some(path) => ConfigLoader::load_explicit(path),
        None => ConfigLoader::load(),
    }
}

fn apply_cli_overrides(config: &mut NetvizConfig, cli: &Cli) {
    if let Some(width) = cli.width {
        config.window.width = width;
    }
    if let Some(height) = cli.height {
        config.window.height = height;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
}

fn resolve_network(preset: Option<PresetArg>) -> Result<NetworkModel> {
    if let Some(preset) = preset.and_then(PresetArg::preset) {
        return Ok(preset.build());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    let network = match preset {
        Some(PresetArg::Custom) => prompter.custom_network(),
        _ => prompter.run(),
    };
    network.context("network setup failed")
}

fn show_window(network: NetworkModel, config: &NetvizConfig) -> Result<()> {
    let session = Session::new(network);
    let window = pollster::block_on(NetworkWindow::new(
        config.window.to_window_config(),
        session,
    ))
    .context("failed to open the network window")?;
    window.run().context("window event loop failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_win() {
        let cli = Cli::parse_from([
            "netviz",
            "--width",
            "1024",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ]);
        let mut config = NetvizConfig::default();
        apply_cli_overrides(&mut config, &cli);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn preset_flag_is_global() {
        let cli = Cli::parse_from(["netviz", "describe", "--preset", "resnet18"]);
        assert_eq!(cli.preset, Some(PresetArg::Resnet18));
        assert!(matches!(cli.command, Some(Commands::Describe)));
        let network = resolve_network(cli.preset).unwrap();
        assert_eq!(network.len(), 7);
    }
}
