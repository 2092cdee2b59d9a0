/// Weights below this are clamped before the power function so zero or
/// negative inputs never produce NaN/zero tiles.
const WEIGHT_CLAMP: f64 = 0.1;

/// Viewports smaller than this (px²) get a raised visibility floor because
/// the absolute pixel budget per tile is tighter.
const SMALL_VIEWPORT_AREA: f32 = 250_000.0;

/// Dampening tuning for one weight set. Both knobs scale with item count:
/// small universes need stronger compression and a higher floor because each
/// item's sliver risk is individually worse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampenParams {
    /// Power-law exponent in (0, 1); smaller = more aggressive compression.
    pub exponent: f64,
    /// Minimum share of the largest dampened weight every item keeps.
    pub min_area_ratio: f64,
}

impl DampenParams {
    /// Schedule by item count.
    pub fn for_count(count: usize) -> Self {
        if count <= 35 {
            Self {
                exponent: 0.35,
                min_area_ratio: 0.12,
            }
        } else if count <= 105 {
            Self {
                exponent: 0.40,
                min_area_ratio: 0.06,
            }
        } else {
            Self {
                exponent: 0.45,
                min_area_ratio: 0.03,
            }
        }
    }

    /// Schedule by item count, with the floor raised on small viewports.
    pub fn for_count_in_viewport(count: usize, viewport_area: f32) -> Self {
        let mut params = Self::for_count(count);
        if viewport_area < SMALL_VIEWPORT_AREA {
            params.min_area_ratio = (params.min_area_ratio * 1.5).min(0.2);
        }
        params
    }
}

/// Compress the dynamic range of raw market-cap weights and enforce a
/// visibility floor.
///
/// Step 1 clamps each weight to a small positive minimum and raises it to
/// `exponent`. Step 2 raises every value to at least `min_area_ratio` of the
/// set's maximum, so the smallest tile keeps a readable share of the largest
/// tile's area no matter how skewed the raw distribution is.
///
/// Output has the same length and order as the input; an empty input yields
/// an empty output.
pub fn dampen_weights(weights: &[f64], exponent: f64, min_area_ratio: f64) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let mut dampened: Vec<f64> = weights
        .iter()
        .map(|&w| w.max(WEIGHT_CLAMP).powf(exponent))
        .collect();

    let max_damp = dampened.iter().copied().fold(0.0_f64, f64::max);
    let floor = max_damp * min_area_ratio;
    for value in &mut dampened {
        if *value < floor {
            *value = floor;
        }
    }

    dampened
}
