//! Activation math shared by the decode stages.

/// Logistic sigmoid, `1 / (1 + e^-v)`.
#[inline]
pub fn sigmoid(v: f32) -> f32 {
    1.0 / (1.0 + (-v).exp())
}

/// In-place softmax over a score vector.
///
/// The maximum is subtracted before exponentiating, so the result sums to 1
/// within floating-point tolerance for any finite input, including vectors
/// with large-magnitude elements.
pub fn softmax_in_place(values: &mut [f32]) {
    if values.is_empty() {
        return;
    }
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0f32;
    for value in values.iter_mut() {
        *value = (*value - max).exp();
        sum += *value;
    }
    if sum > 0.0 {
        for value in values.iter_mut() {
            *value /= sum;
        }
    }
}
