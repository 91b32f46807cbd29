//! Griddecode turns the flat output tensor of a grid-based object detector
//! into a clean, deduplicated list of labeled bounding boxes.
//!
//! The pipeline is a pure function over an immutable tensor: a grid/anchor
//! scan with configurable activation handling, independent objectness and
//! class-score gating, greedy IoU non-maximum suppression and clipping to
//! the image bounds. Optional row-parallel decoding is available via the
//! `rayon` feature.

mod candidate;
pub mod decode;
pub mod tensor;
mod trace;
pub mod util;

pub use candidate::nms::nms;
pub use candidate::{Detection, Rect};
pub use decode::{Activation, Anchor, DecodeConfig, Decoder};
pub use tensor::{GridShape, TensorView};
pub use util::math::{sigmoid, softmax_in_place};
pub use util::{DecodeError, DecodeResult};
