use super::{LayoutItem, Rect, WeightedItem};

/// Dimensions below this are treated as degenerate and not subdivided.
const MIN_DIM: f64 = 1e-6;

/// Squarified treemap layout: partition the rectangle `(x, y, w, h)` among
/// `items` so that each item's area is proportional to its weight and the
/// worst tile aspect ratio stays close to 1:1.
///
/// Returns an empty list when there is nothing to draw: no items, a
/// non-positive dimension, or a non-positive weight sum. Never fails.
///
/// Non-positive weights are expected to be filtered by the caller (see
/// `market::retain_positive`); any that slip through are dropped here.
pub fn squarify<T>(
    mut items: Vec<WeightedItem<T>>,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
) -> Vec<LayoutItem<T>> {
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }

    items.retain(|item| item.weight > 0.0);
    if items.is_empty() {
        return Vec::new();
    }

    let total_weight: f64 = items.iter().map(|item| item.weight).sum();
    if total_weight <= 0.0 {
        return Vec::new();
    }

    // Descending weight order is what makes the greedy strip growth work:
    // every strip is a prefix, so its max area is the first element and its
    // min area the last, and the worst-aspect metric is O(1) per candidate.
    items.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    let total_area = f64::from(w) * f64::from(h);
    let scale = total_area / total_weight;

    let mut remaining: Vec<(f64, T)> = items
        .into_iter()
        .map(|item| (item.weight * scale, item.payload))
        .collect();

    let mut result = Vec::with_capacity(remaining.len());
    let mut rx = f64::from(x);
    let mut ry = f64::from(y);
    let mut rw = f64::from(w);
    let mut rh = f64::from(h);

    while !remaining.is_empty() {
        if rw <= MIN_DIM || rh <= MIN_DIM {
            tracing::debug!(
                "Degenerate remainder ({:.2e}x{:.2e}), dropping {} items",
                rw,
                rh,
                remaining.len()
            );
            break;
        }

        // A lone item always receives the entire remaining rectangle. The
        // arithmetic below would converge to the same box, but doing it
        // exactly keeps the single-item case free of float drift.
        if remaining.len() == 1 {
            if let Some((_, payload)) = remaining.pop() {
                result.push(LayoutItem {
                    rect: Rect::new(rx as f32, ry as f32, rw as f32, rh as f32),
                    payload,
                });
            }
            break;
        }

        // "Wide" rectangles take a vertical strip from the left edge,
        // "tall" ones a horizontal strip from the top. The strip runs
        // along the short side.
        let wide = rw >= rh;
        let short = if wide { rh } else { rw };

        // Grow the strip greedily: stop at the first point where adding the
        // next item makes the worst aspect ratio in the strip larger.
        let max_area = remaining[0].0;
        let mut strip_sum = max_area;
        let mut strip_len = 1;
        let mut worst = worst_aspect(max_area, max_area, strip_sum, short);

        while strip_len < remaining.len() {
            let next_area = remaining[strip_len].0;
            let candidate = worst_aspect(max_area, next_area, strip_sum + next_area, short);
            if candidate > worst {
                break;
            }
            strip_sum += next_area;
            worst = candidate;
            strip_len += 1;
        }

        let thickness = strip_sum / short;

        // Lay the strip: equal thickness, lengths proportional to area.
        let mut offset = 0.0;
        for (area, payload) in remaining.drain(0..strip_len) {
            let length = area / thickness;
            if !length.is_finite() || length <= 0.0 {
                tracing::warn!(
                    "Squarify: invalid strip member (length={}, thickness={}, area={}), skipping",
                    length,
                    thickness,
                    area
                );
                continue;
            }

            let rect = if wide {
                Rect::new(
                    rx as f32,
                    (ry + offset) as f32,
                    thickness as f32,
                    length as f32,
                )
            } else {
                Rect::new(
                    (rx + offset) as f32,
                    ry as f32,
                    length as f32,
                    thickness as f32,
                )
            };
            result.push(LayoutItem { rect, payload });
            offset += length;
        }

        // Shrink the remaining space by the strip's thickness.
        if wide {
            rx += thickness;
            rw = (rw - thickness).max(0.0);
        } else {
            ry += thickness;
            rh = (rh - thickness).max(0.0);
        }
    }

    result
}

/// Worst (max) aspect ratio any member of a strip would get if the strip
/// were laid out now along a side of length `side`. Because strips are
/// prefixes of a descending-sorted list, only the max area, min area and
/// sum are needed.
fn worst_aspect(max_area: f64, min_area: f64, sum: f64, side: f64) -> f64 {
    if sum <= 0.0 || side <= 0.0 || min_area <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let a = (side_sq * max_area) / sum_sq;
    let b = sum_sq / (side_sq * min_area);
    a.max(b)
}

#[cfg(test)]
mod tests {
    use super::super::{Rect, WeightedItem};
    use super::squarify;

    fn items(weights: &[f64]) -> Vec<WeightedItem<usize>> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| WeightedItem::new(w, i))
            .collect()
    }

    fn aspect(r: Rect) -> f32 {
        if r.w <= 0.0 || r.h <= 0.0 {
            return f32::MAX;
        }
        (r.w / r.h).max(r.h / r.w)
    }

    fn overlap(a: Rect, b: Rect) -> f32 {
        let x = (a.x + a.w).min(b.x + b.w) - a.x.max(b.x);
        let y = (a.y + a.h).min(b.y + b.h) - a.y.max(b.y);
        if x > 0.0 && y > 0.0 {
            x * y
        } else {
            0.0
        }
    }

    #[test]
    fn single_item_receives_entire_rect() {
        let out = squarify(vec![WeightedItem::new(42.0, "acme")], 3.0, 7.0, 1920.0, 1080.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].payload, "acme");
        let r = out[0].rect;
        assert!((r.x - 3.0).abs() < 1e-6);
        assert!((r.y - 7.0).abs() < 1e-6);
        assert!((r.w - 1920.0).abs() < 1e-6);
        assert!((r.h - 1080.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_inputs_return_empty() {
        assert!(squarify(items(&[]), 0.0, 0.0, 100.0, 100.0).is_empty());
        assert!(squarify(items(&[1.0, 2.0]), 0.0, 0.0, 0.0, 100.0).is_empty());
        assert!(squarify(items(&[1.0, 2.0]), 0.0, 0.0, 100.0, 0.0).is_empty());
        assert!(squarify(items(&[0.0, 0.0, 0.0]), 0.0, 0.0, 100.0, 100.0).is_empty());
        assert!(squarify(items(&[-5.0, -1.0]), 0.0, 0.0, 100.0, 100.0).is_empty());
    }

    #[test]
    fn layout_preserves_total_area() {
        let weights = [400.0, 300.0, 200.0, 100.0, 50.0, 25.0, 12.0, 6.0];
        let out = squarify(items(&weights), 0.0, 0.0, 900.0, 500.0);
        assert_eq!(out.len(), weights.len());
        let total: f64 = out
            .iter()
            .map(|t| f64::from(t.rect.w) * f64::from(t.rect.h))
            .sum();
        assert!((total - 450_000.0).abs() < 1.0, "total area was {total}");
    }

    #[test]
    fn siblings_do_not_overlap() {
        let weights = [900.0, 500.0, 300.0, 200.0, 100.0, 50.0];
        let out = squarify(items(&weights), 10.0, 20.0, 640.0, 480.0);
        for i in 0..out.len() {
            for j in (i + 1)..out.len() {
                let ov = overlap(out[i].rect, out[j].rect);
                assert!(
                    ov < 0.01,
                    "tiles {} and {} overlap by {ov}px²",
                    out[i].payload,
                    out[j].payload
                );
            }
        }
    }

    #[test]
    fn every_payload_survives_layout() {
        let weights = [5.0, 4.0, 3.0, 2.0, 1.0];
        let out = squarify(items(&weights), 0.0, 0.0, 300.0, 300.0);
        let mut seen: Vec<usize> = out.iter().map(|t| t.payload).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn areas_are_proportional_to_weights() {
        let weights = [100.0, 50.0, 25.0];
        let out = squarify(items(&weights), 0.0, 0.0, 700.0, 400.0);
        let total = 700.0_f32 * 400.0;
        for tile in &out {
            let expected = total * (weights[tile.payload] / 175.0) as f32;
            let got = tile.rect.area();
            assert!(
                (got - expected).abs() < 0.5,
                "payload {} got {got}px², expected {expected}px²",
                tile.payload
            );
        }
    }

    #[test]
    fn no_worse_than_naive_single_strip() {
        // A single strip along the short side gives every item the full
        // 500px height; squarify must never do worse than that.
        let weights = [400.0, 300.0, 200.0, 100.0, 50.0, 25.0, 12.0, 6.0];
        let total: f64 = weights.iter().sum();
        let (vw, vh) = (900.0_f64, 500.0_f64);
        let naive_worst = weights
            .iter()
            .map(|w| {
                let width = vw * w / total;
                (width / vh).max(vh / width)
            })
            .fold(0.0_f64, f64::max);

        let out = squarify(items(&weights), 0.0, 0.0, vw as f32, vh as f32);
        let squarified_worst = out
            .iter()
            .map(|t| f64::from(aspect(t.rect)))
            .fold(0.0_f64, f64::max);
        assert!(
            squarified_worst <= naive_worst + 1e-6,
            "squarified worst {squarified_worst} vs naive {naive_worst}"
        );
    }

    #[test]
    fn mixed_sign_weights_keep_positive_items_only() {
        let out = squarify(
            vec![
                WeightedItem::new(10.0, "keep"),
                WeightedItem::new(0.0, "zero"),
                WeightedItem::new(-3.0, "neg"),
            ],
            0.0,
            0.0,
            100.0,
            100.0,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].payload, "keep");
    }

    #[test]
    fn tiny_rect_produces_tiny_tiles_without_panicking() {
        let out = squarify(items(&[3.0, 2.0, 1.0]), 0.0, 0.0, 0.001, 0.001);
        let total: f32 = out.iter().map(|t| t.rect.area()).sum();
        assert!(total <= 0.001 * 0.001 + 1e-9);
    }
}
