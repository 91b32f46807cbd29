//! Row-parallel candidate scan (feature-gated).
//!
//! Each grid row decodes into a private buffer; the buffers are
//! concatenated in row order, so the output is identical to the sequential
//! scan and the downstream stable sort sees the same tie-break order.

use rayon::prelude::*;

use crate::candidate::Detection;
use crate::tensor::TensorView;

use super::scan::scan_rows;
use super::Decoder;

pub(crate) fn scan_rows_par(decoder: &Decoder, tensor: TensorView<'_>) -> Vec<Detection> {
    let rows = tensor.shape().grid_height;
    let row_results: Vec<Vec<Detection>> = (0..rows)
        .into_par_iter()
        .map(|cy| scan_rows(decoder, tensor, cy, cy + 1))
        .collect();

    let mut out = Vec::new();
    for mut row in row_results {
        out.append(&mut row);
    }
    out
}
