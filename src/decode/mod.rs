//! Decoding of raw detector output into labeled detections.
//!
//! The scan submodule walks every `(row, col, anchor)` triple and emits
//! confidence-filtered candidates; [`Decoder`] drives the full pipeline of
//! scan, greedy suppression and clipping to the image bounds.

#[cfg(feature = "rayon")]
pub(crate) mod rayon;
pub(crate) mod scan;

use crate::candidate::nms::nms;
use crate::candidate::Detection;
use crate::tensor::{GridShape, TensorView};
use crate::trace::{trace_event, trace_span};
use crate::util::{DecodeError, DecodeResult};

/// Whether the tensor still carries raw network outputs or values already
/// activated on the network side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Activation {
    /// Apply sigmoid to the center offsets and objectness, `exp` scaled by
    /// the anchor prior to the sizes, and softmax across the class channels.
    #[default]
    Raw,
    /// Read values back verbatim; sizes are already cell-dimension
    /// multiples with the anchor prior baked in.
    PreActivated,
}

/// Anchor prior in cell units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Width in cell units.
    pub width: f32,
    /// Height in cell units.
    pub height: f32,
}

/// Pipeline configuration for a decode call.
#[derive(Clone, Copy, Debug)]
pub struct DecodeConfig {
    /// Source image width in pixels.
    pub image_width: f32,
    /// Source image height in pixels.
    pub image_height: f32,
    /// Gate applied independently to objectness and the winning class score.
    pub confidence_threshold: f32,
    /// Overlap above which a lower-confidence box is suppressed.
    pub nms_iou_threshold: f32,
    /// Maximum number of boxes returned; zero yields an empty result.
    pub nms_limit: usize,
    /// Activation handling for the raw tensor.
    pub activation: Activation,
    /// Decode rows in parallel (requires the `rayon` feature; ignored
    /// otherwise).
    pub parallel: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            image_width: 416.0,
            image_height: 416.0,
            confidence_threshold: 0.3,
            nms_iou_threshold: 0.5,
            nms_limit: 10,
            activation: Activation::Raw,
            parallel: false,
        }
    }
}

/// Validated decode pipeline over a fixed grid shape, anchor set and label
/// table.
///
/// Construction checks anchor and label counts against the shape;
/// thresholds are checked once per call before any per-cell work. The
/// decoder holds no per-call state, so one instance can serve any number of
/// tensors of the same shape.
#[derive(Clone, Debug)]
pub struct Decoder {
    shape: GridShape,
    anchors: Vec<Anchor>,
    labels: Vec<String>,
    config: DecodeConfig,
}

impl Decoder {
    /// Creates a decoder with the default configuration.
    pub fn new(shape: GridShape, anchors: Vec<Anchor>, labels: Vec<String>) -> DecodeResult<Self> {
        if anchors.len() != shape.anchor_count {
            return Err(DecodeError::AnchorCountMismatch {
                expected: shape.anchor_count,
                got: anchors.len(),
            });
        }
        if labels.len() != shape.class_count {
            return Err(DecodeError::LabelCountMismatch {
                expected: shape.class_count,
                got: labels.len(),
            });
        }
        Ok(Self {
            shape,
            anchors,
            labels,
            config: DecodeConfig::default(),
        })
    }

    /// Replaces the pipeline configuration.
    pub fn with_config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the grid shape the decoder expects.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Returns the anchor priors in tensor order.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Returns the class labels in channel order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Cell size in pixels, using real division of the image dimensions.
    pub(crate) fn cell_size(&self) -> (f32, f32) {
        (
            self.config.image_width / self.shape.grid_width as f32,
            self.config.image_height / self.shape.grid_height as f32,
        )
    }

    /// Runs the full pipeline: candidate scan, suppression, clipping.
    ///
    /// The result is ordered by NMS acceptance, highest confidence first,
    /// and every box is clipped to `[0, image_width] x [0, image_height]`.
    pub fn run(&self, data: &[f32]) -> DecodeResult<Vec<Detection>> {
        let candidates = self.candidates(data)?;

        let _span = trace_span!("nms", candidates = candidates.len()).entered();
        let kept = nms(candidates, self.config.nms_iou_threshold, self.config.nms_limit);
        trace_event!("nms_kept", count = kept.len());

        Ok(kept
            .into_iter()
            .map(|mut detection| {
                detection.rect = detection
                    .rect
                    .clip_to(self.config.image_width, self.config.image_height);
                detection
            })
            .collect())
    }

    /// Scans the grid and returns confidence-filtered candidates in
    /// row-major scan order, without suppression or clipping.
    pub fn candidates(&self, data: &[f32]) -> DecodeResult<Vec<Detection>> {
        self.validate_config()?;
        let tensor = TensorView::new(data, self.shape)?;

        let _span = trace_span!(
            "decode_scan",
            cells = self.shape.channel_stride(),
            anchors = self.shape.anchor_count
        )
        .entered();

        #[cfg(feature = "rayon")]
        {
            if self.config.parallel {
                let out = self::rayon::scan_rows_par(self, tensor);
                trace_event!("candidates", count = out.len());
                return Ok(out);
            }
        }

        let out = scan::scan_rows(self, tensor, 0, self.shape.grid_height);
        trace_event!("candidates", count = out.len());
        Ok(out)
    }

    fn validate_config(&self) -> DecodeResult<()> {
        check_threshold("confidence_threshold", self.config.confidence_threshold)?;
        check_threshold("nms_iou_threshold", self.config.nms_iou_threshold)?;
        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f32) -> DecodeResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(DecodeError::ThresholdOutOfRange { name, value });
    }
    Ok(())
}
