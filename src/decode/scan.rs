//! Sequential candidate scan over the detection grid.

use crate::candidate::{Detection, Rect};
use crate::tensor::TensorView;
use crate::util::math::{sigmoid, softmax_in_place};

use super::{Activation, Decoder};

// Channel order within an anchor block.
const CH_TX: usize = 0;
const CH_TY: usize = 1;
const CH_TW: usize = 2;
const CH_TH: usize = 3;
const CH_TC: usize = 4;
const CH_CLASS0: usize = 5;

/// Scans grid rows `row0..row1` and collects candidates in scan order.
///
/// Objectness gates each `(row, col, anchor)` triple before anything else is
/// read, so the class channels of rejected cells are never touched. The
/// winning class score must clear the same threshold independently and is
/// what the emitted detection reports as its confidence.
pub(crate) fn scan_rows(
    decoder: &Decoder,
    tensor: TensorView<'_>,
    row0: usize,
    row1: usize,
) -> Vec<Detection> {
    let shape = tensor.shape();
    let (cell_width, cell_height) = decoder.cell_size();
    let threshold = decoder.config().confidence_threshold;
    let activation = decoder.config().activation;

    let mut out = Vec::new();
    let mut scores = vec![0.0f32; shape.class_count];

    for cy in row0..row1 {
        for cx in 0..shape.grid_width {
            for b in 0..shape.anchor_count {
                let raw_tc = tensor.at(b, CH_TC, cy, cx);
                let objectness = match activation {
                    Activation::Raw => sigmoid(raw_tc),
                    Activation::PreActivated => raw_tc,
                };
                if objectness < threshold {
                    continue;
                }

                let (dx, dy, dw, dh) = match activation {
                    Activation::Raw => {
                        let anchor = decoder.anchors()[b];
                        (
                            sigmoid(tensor.at(b, CH_TX, cy, cx)),
                            sigmoid(tensor.at(b, CH_TY, cy, cx)),
                            tensor.at(b, CH_TW, cy, cx).exp() * anchor.width,
                            tensor.at(b, CH_TH, cy, cx).exp() * anchor.height,
                        )
                    }
                    Activation::PreActivated => (
                        tensor.at(b, CH_TX, cy, cx),
                        tensor.at(b, CH_TY, cy, cx),
                        tensor.at(b, CH_TW, cy, cx),
                        tensor.at(b, CH_TH, cy, cx),
                    ),
                };

                for (c, slot) in scores.iter_mut().enumerate() {
                    *slot = tensor.at(b, CH_CLASS0 + c, cy, cx);
                }
                if activation == Activation::Raw {
                    softmax_in_place(&mut scores);
                }

                let (class_index, top_score) = arg_max(&scores);
                if top_score < threshold {
                    continue;
                }

                let center_x = (cx as f32 + dx) * cell_width;
                let center_y = (cy as f32 + dy) * cell_height;
                let width = dw * cell_width;
                let height = dh * cell_height;

                out.push(Detection {
                    rect: Rect {
                        x: center_x - width / 2.0,
                        y: center_y - height / 2.0,
                        width,
                        height,
                    },
                    confidence: top_score,
                    class_index,
                    label: decoder.labels()[class_index].clone(),
                });
            }
        }
    }

    out
}

fn arg_max(scores: &[f32]) -> (usize, f32) {
    let mut best = 0usize;
    let mut best_score = f32::NEG_INFINITY;
    for (index, &score) in scores.iter().enumerate() {
        if score > best_score {
            best = index;
            best_score = score;
        }
    }
    (best, best_score)
}
