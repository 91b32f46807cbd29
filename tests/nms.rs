use griddecode::{nms, Detection, Rect};

fn det(x: f32, y: f32, width: f32, height: f32, confidence: f32) -> Detection {
    Detection {
        rect: Rect {
            x,
            y,
            width,
            height,
        },
        confidence,
        class_index: 0,
        label: "obj".to_string(),
    }
}

#[test]
fn identical_rects_keep_only_the_strongest() {
    let candidates = vec![
        det(10.0, 10.0, 50.0, 50.0, 0.8),
        det(10.0, 10.0, 50.0, 50.0, 0.9),
    ];
    let kept = nms(candidates, 0.5, 10);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].confidence, 0.9);
}

#[test]
fn limit_keeps_the_top_confidences() {
    let candidates = vec![
        det(0.0, 0.0, 10.0, 10.0, 0.5),
        det(100.0, 0.0, 10.0, 10.0, 0.9),
        det(200.0, 0.0, 10.0, 10.0, 0.7),
        det(300.0, 0.0, 10.0, 10.0, 0.8),
        det(400.0, 0.0, 10.0, 10.0, 0.6),
    ];
    let kept = nms(candidates, 0.5, 3);
    assert_eq!(kept.len(), 3);
    let confidences: Vec<f32> = kept.iter().map(|d| d.confidence).collect();
    assert_eq!(confidences, vec![0.9, 0.8, 0.7]);
}

#[test]
fn ties_keep_input_order() {
    let mut first = det(0.0, 0.0, 10.0, 10.0, 0.7);
    first.class_index = 1;
    let mut second = det(100.0, 0.0, 10.0, 10.0, 0.7);
    second.class_index = 2;
    let kept = nms(vec![first, second], 0.5, 10);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].class_index, 1);
    assert_eq!(kept[1].class_index, 2);
}

#[test]
fn overlap_exactly_at_threshold_is_not_suppressed() {
    // Identical rects have IoU 1.0; a threshold of 1.0 means only overlap
    // strictly above it suppresses, so both survive.
    let candidates = vec![
        det(10.0, 10.0, 50.0, 50.0, 0.9),
        det(10.0, 10.0, 50.0, 50.0, 0.8),
    ];
    let kept = nms(candidates, 1.0, 10);
    assert_eq!(kept.len(), 2);
}

#[test]
fn degenerate_boxes_are_never_suppressed() {
    let candidates = vec![
        det(10.0, 10.0, 50.0, 50.0, 0.9),
        // Zero-width box nested inside the strong one.
        det(20.0, 20.0, 0.0, 30.0, 0.5),
    ];
    let kept = nms(candidates, 0.3, 10);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[1].confidence, 0.5);
}

#[test]
fn zero_limit_yields_empty_result() {
    let candidates = vec![det(0.0, 0.0, 10.0, 10.0, 0.9)];
    assert!(nms(candidates, 0.5, 0).is_empty());
}

#[test]
fn empty_input_yields_empty_result() {
    assert!(nms(Vec::new(), 0.5, 10).is_empty());
}

#[test]
fn chain_of_overlaps_suppresses_transitively_overlapping_boxes_only() {
    // a overlaps b heavily, b overlaps c heavily, but a and c are disjoint;
    // greedy acceptance keeps a and c.
    let a = det(0.0, 0.0, 20.0, 10.0, 0.9);
    let b = det(10.0, 0.0, 20.0, 10.0, 0.8);
    let c = det(22.0, 0.0, 20.0, 10.0, 0.7);
    let kept = nms(vec![a, b, c], 0.3, 10);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].confidence, 0.9);
    assert_eq!(kept[1].confidence, 0.7);
}
