//! Detection candidates and box geometry.

pub mod nms;

/// Axis-aligned box in pixel space, stored as top-left corner plus extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Signed area of the rect.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Intersection-over-union with another rect.
    ///
    /// Rects with non-positive area report zero overlap, so degenerate boxes
    /// neither suppress nor get suppressed during NMS.
    pub fn iou(&self, other: &Rect) -> f32 {
        let area_a = self.area();
        let area_b = other.area();
        if area_a <= 0.0 || area_b <= 0.0 {
            return 0.0;
        }
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        let inter = (right - left).max(0.0) * (bottom - top).max(0.0);
        inter / (area_a + area_b - inter)
    }

    /// Clips the rect to `[0, image_width] x [0, image_height]`.
    ///
    /// A negative top-left corner shrinks the extent before clamping to
    /// zero; overflow past the far edge shrinks the extent. If clipping
    /// would leave a non-positive extent the rect is returned unchanged;
    /// dropping such boxes is the caller's policy.
    pub fn clip_to(&self, image_width: f32, image_height: f32) -> Rect {
        let mut out = *self;
        if out.x < 0.0 {
            out.width += out.x;
            out.x = 0.0;
        }
        if out.y < 0.0 {
            out.height += out.y;
            out.y = 0.0;
        }
        if out.x + out.width > image_width {
            out.width = image_width - out.x;
        }
        if out.y + out.height > image_height {
            out.height = image_height - out.y;
        }
        if out.width <= 0.0 || out.height <= 0.0 {
            return *self;
        }
        out
    }
}

/// A labeled, confidence-scored detection in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Bounding box in pixel coordinates.
    pub rect: Rect,
    /// Winning class score.
    pub confidence: f32,
    /// Index of the winning class.
    pub class_index: usize,
    /// Name of the winning class.
    pub label: String,
}

/// Sorts detections by descending confidence.
///
/// The sort is stable, so equal confidences keep their input order and the
/// downstream greedy suppression stays deterministic.
pub(crate) fn sort_by_confidence_desc(detections: &mut [Detection]) {
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}
