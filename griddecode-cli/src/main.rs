use clap::Parser;
use griddecode::{Activation, Anchor, DecodeConfig, Decoder, GridShape};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Griddecode CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ActivationConfig {
    Raw,
    PreActivated,
}

impl From<ActivationConfig> for Activation {
    fn from(value: ActivationConfig) -> Self {
        match value {
            ActivationConfig::Raw => Activation::Raw,
            ActivationConfig::PreActivated => Activation::PreActivated,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GridShapeJson {
    grid_width: usize,
    grid_height: usize,
    anchor_count: usize,
    class_count: usize,
}

impl From<GridShapeJson> for GridShape {
    fn from(value: GridShapeJson) -> Self {
        Self {
            grid_width: value.grid_width,
            grid_height: value.grid_height,
            anchor_count: value.anchor_count,
            class_count: value.class_count,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DecodeConfigJson {
    image_width: f32,
    image_height: f32,
    confidence_threshold: f32,
    nms_iou_threshold: f32,
    nms_limit: usize,
    activation: ActivationConfig,
    parallel: bool,
}

impl Default for DecodeConfigJson {
    fn default() -> Self {
        let cfg = DecodeConfig::default();
        Self {
            image_width: cfg.image_width,
            image_height: cfg.image_height,
            confidence_threshold: cfg.confidence_threshold,
            nms_iou_threshold: cfg.nms_iou_threshold,
            nms_limit: cfg.nms_limit,
            activation: ActivationConfig::Raw,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Config {
    tensor_path: String,
    output_path: Option<String>,
    grid: GridShapeJson,
    anchors: Vec<(f32, f32)>,
    labels: Vec<String>,
    #[serde(default)]
    decode: DecodeConfigJson,
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    confidence: f32,
    label: String,
}

#[derive(Debug, Serialize)]
struct Output {
    detections: Vec<DetectionRecord>,
}

/// Loads a tensor from a JSON float array (`.json`) or raw little-endian
/// f32 bytes (anything else).
fn load_tensor(path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    } else {
        let bytes = fs::read(path)?;
        if bytes.len() % 4 != 0 {
            return Err(format!(
                "raw tensor file length {} is not a multiple of 4",
                bytes.len()
            )
            .into());
        }
        Ok(bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("griddecode=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.tensor_path.is_empty() {
        return Err("tensor_path must be set in the config".into());
    }

    let tensor = load_tensor(Path::new(&config.tensor_path))?;

    let anchors = config
        .anchors
        .iter()
        .map(|&(width, height)| Anchor { width, height })
        .collect();
    let decoder = Decoder::new(config.grid.into(), anchors, config.labels)?.with_config(
        DecodeConfig {
            image_width: config.decode.image_width,
            image_height: config.decode.image_height,
            confidence_threshold: config.decode.confidence_threshold,
            nms_iou_threshold: config.decode.nms_iou_threshold,
            nms_limit: config.decode.nms_limit,
            activation: config.decode.activation.into(),
            parallel: config.decode.parallel,
        },
    );

    let detections = decoder.run(&tensor)?;
    let output = Output {
        detections: detections
            .into_iter()
            .map(|detection| DetectionRecord {
                x: detection.rect.x,
                y: detection.rect.y,
                width: detection.rect.width,
                height: detection.rect.height,
                confidence: detection.confidence,
                label: detection.label,
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
