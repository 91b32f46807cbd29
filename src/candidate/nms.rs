//! Greedy non-maximum suppression over detection candidates.

use super::{sort_by_confidence_desc, Detection};

/// Reduces a candidate list to at most `limit` boxes, no two of which
/// overlap beyond `iou_threshold`.
///
/// Candidates are sorted by descending confidence (stable, so ties keep
/// their input order) and accepted greedily: each accepted box deactivates
/// every later candidate whose IoU with it exceeds the threshold. The output
/// keeps acceptance order, highest confidence first. A `limit` of zero or an
/// empty input yields an empty result.
pub fn nms(mut candidates: Vec<Detection>, iou_threshold: f32, limit: usize) -> Vec<Detection> {
    if limit == 0 || candidates.is_empty() {
        return Vec::new();
    }
    sort_by_confidence_desc(&mut candidates);

    // Active flags live in a plain arena alongside the sorted list; the
    // live counter lets the inner scan stop once nothing is left.
    let mut active = vec![true; candidates.len()];
    let mut live = candidates.len();
    let mut kept: Vec<Detection> = Vec::with_capacity(limit.min(candidates.len()));

    for i in 0..candidates.len() {
        if !active[i] {
            continue;
        }
        kept.push(candidates[i].clone());
        if kept.len() == limit {
            break;
        }
        active[i] = false;
        live -= 1;
        for j in (i + 1)..candidates.len() {
            if live == 0 {
                break;
            }
            if !active[j] {
                continue;
            }
            if candidates[i].rect.iou(&candidates[j].rect) > iou_threshold {
                active[j] = false;
                live -= 1;
            }
        }
        if live == 0 {
            break;
        }
    }

    kept
}
