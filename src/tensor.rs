//! Flat tensor views over grid-detector output.
//!
//! A grid detector emits one channel-major f32 sequence: for each anchor the
//! `5 + class_count` channels (`tx, ty, tw, th, tc, class_0..`) are stored
//! one after another, and within a channel the values are row-major over the
//! grid cells. `TensorView` checks the length once at construction and
//! exposes coordinate access over the flat slice.

use crate::util::{DecodeError, DecodeResult};

/// Grid geometry of a detector output tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    /// Number of cells along the x axis.
    pub grid_width: usize,
    /// Number of cells along the y axis.
    pub grid_height: usize,
    /// Number of anchor boxes predicted per cell.
    pub anchor_count: usize,
    /// Number of object classes.
    pub class_count: usize,
}

impl GridShape {
    /// Channels per anchor block: `tx, ty, tw, th, tc` plus one per class.
    pub fn channels_per_anchor(&self) -> usize {
        5 + self.class_count
    }

    /// Values per channel, one per grid cell.
    pub fn channel_stride(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Total tensor length implied by this shape.
    pub fn len(&self) -> usize {
        self.channel_stride() * self.channels_per_anchor() * self.anchor_count
    }

    /// Whether the shape implies an empty tensor.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat offset of `(anchor, channel, row, col)`.
    ///
    /// Coordinates outside the shape are a caller bug, not a recoverable
    /// condition; they are checked with debug assertions only.
    #[inline]
    pub fn offset(&self, anchor: usize, channel: usize, row: usize, col: usize) -> usize {
        debug_assert!(anchor < self.anchor_count);
        debug_assert!(channel < self.channels_per_anchor());
        debug_assert!(row < self.grid_height);
        debug_assert!(col < self.grid_width);
        let stride = self.channel_stride();
        let anchor_base = stride * self.channels_per_anchor() * anchor;
        anchor_base + stride * channel + row * self.grid_width + col
    }
}

/// Borrowed channel-major view of a raw detector output tensor.
#[derive(Clone, Copy)]
pub struct TensorView<'a> {
    data: &'a [f32],
    shape: GridShape,
}

impl<'a> TensorView<'a> {
    /// Wraps a flat slice, checking its length against the shape.
    pub fn new(data: &'a [f32], shape: GridShape) -> DecodeResult<Self> {
        let expected = shape.len();
        if data.len() != expected {
            return Err(DecodeError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Returns the grid shape of the view.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Returns the backing slice.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Value at `(anchor, channel, row, col)`.
    #[inline]
    pub fn at(&self, anchor: usize, channel: usize, row: usize, col: usize) -> f32 {
        self.data[self.shape.offset(anchor, channel, row, col)]
    }
}

#[cfg(test)]
mod tests {
    use super::{GridShape, TensorView};
    use crate::util::DecodeError;

    fn shape_2x2() -> GridShape {
        GridShape {
            grid_width: 2,
            grid_height: 2,
            anchor_count: 2,
            class_count: 3,
        }
    }

    #[test]
    fn shape_length_matches_layout() {
        let shape = shape_2x2();
        assert_eq!(shape.channels_per_anchor(), 8);
        assert_eq!(shape.channel_stride(), 4);
        assert_eq!(shape.len(), 64);
    }

    #[test]
    fn offsets_are_channel_major_row_major() {
        let shape = shape_2x2();
        // First anchor, first channel, cell (0, 0) is the very first value.
        assert_eq!(shape.offset(0, 0, 0, 0), 0);
        // Next cell in the same row follows immediately.
        assert_eq!(shape.offset(0, 0, 0, 1), 1);
        // Next row starts after grid_width values.
        assert_eq!(shape.offset(0, 0, 1, 0), 2);
        // Next channel starts after a full grid.
        assert_eq!(shape.offset(0, 1, 0, 0), 4);
        // Second anchor starts after its full channel block.
        assert_eq!(shape.offset(1, 0, 0, 0), 32);
    }

    #[test]
    fn view_rejects_wrong_length() {
        let shape = shape_2x2();
        let data = vec![0.0f32; 63];
        let err = TensorView::new(&data, shape).err().unwrap();
        assert_eq!(
            err,
            DecodeError::ShapeMismatch {
                expected: 64,
                got: 63,
            }
        );
    }

    #[test]
    fn view_reads_back_poked_values() {
        let shape = shape_2x2();
        let mut data = vec![0.0f32; shape.len()];
        data[shape.offset(1, 4, 1, 0)] = 0.75;
        let view = TensorView::new(&data, shape).unwrap();
        assert_eq!(view.at(1, 4, 1, 0), 0.75);
        assert_eq!(view.at(0, 4, 1, 0), 0.0);
    }
}
