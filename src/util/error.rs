//! Error types for griddecode.

use thiserror::Error;

/// Result alias for decode operations.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Errors surfaced while validating decode inputs.
///
/// Validation runs once, before any per-cell work; a tensor and
/// configuration that pass these checks cannot fail later in the scan,
/// suppression or clipping stages.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// Tensor length disagrees with the length implied by the grid shape.
    #[error("tensor length mismatch: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Length implied by the grid shape.
        expected: usize,
        /// Actual tensor length.
        got: usize,
    },
    /// Anchor prior count disagrees with the grid shape.
    #[error("anchor count mismatch: expected {expected}, got {got}")]
    AnchorCountMismatch {
        /// `anchor_count` declared by the grid shape.
        expected: usize,
        /// Number of anchor priors supplied.
        got: usize,
    },
    /// Label count disagrees with the grid shape.
    #[error("label count mismatch: expected {expected}, got {got}")]
    LabelCountMismatch {
        /// `class_count` declared by the grid shape.
        expected: usize,
        /// Number of labels supplied.
        got: usize,
    },
    /// A threshold lies outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    ThresholdOutOfRange {
        /// Name of the offending configuration field.
        name: &'static str,
        /// Value that failed the range check.
        value: f32,
    },
}
