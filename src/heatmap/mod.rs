pub mod labels;

use compact_str::CompactString;

use crate::layout::{dampen_weights, squarify, DampenParams, Rect, WeightedItem};
use crate::market::{Instrument, Sector, SubSector};

/// Tuning for the three-level heatmap composition.
#[derive(Debug, Clone)]
pub struct HeatmapConfig {
    /// Height of the sector label bar (px)
    pub sector_label_h: f32,
    /// Height of the sub-sector label bar (px)
    pub sub_label_h: f32,
    /// Inset padding inside each sector, below its label bar (px)
    pub padding: f32,
    /// Minimum sector inner area (px²) to lay out children at all;
    /// below this the sector is a single unlabeled block
    pub min_inner_area: f32,
    /// Minimum sector inner area (px²) to show sub-sector nesting;
    /// below this all the sector's instruments form one flat group
    pub min_nesting_area: f32,
    pub sector_font_size: f32,
    pub sub_font_size: f32,
    pub tile_font_size: f32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            sector_label_h: 22.0,
            sub_label_h: 16.0,
            padding: 2.0,
            min_inner_area: 600.0,
            min_nesting_area: 8_000.0, // desktop tuning
            sector_font_size: 12.0,
            sub_font_size: 11.0,
            tile_font_size: 11.0,
        }
    }
}

/// Leaf tile: one instrument's rectangle plus resolved ancestor names.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentTile {
    pub rect: Rect,
    pub id: CompactString,
    pub weight: f64,
    pub change: f64,
    pub sector: CompactString,
    pub sub_sector: CompactString,
    /// Ticker text to draw, already fitted/truncated; None when hidden
    pub label: Option<CompactString>,
}

/// A sub-sector's rectangle and its instrument tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct SubSectorRect {
    pub rect: Rect,
    /// None for the flattened group a sector gets below the nesting threshold
    pub name: Option<CompactString>,
    pub label: Option<CompactString>,
    pub tiles: Vec<InstrumentTile>,
}

/// A sector's rectangle, its label bar geometry and its sub-sector boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorRect {
    pub rect: Rect,
    /// Interior left after the label bar and padding
    pub inner: Rect,
    pub name: CompactString,
    pub label: Option<CompactString>,
    pub sub_sectors: Vec<SubSectorRect>,
}

/// Compose the full three-level heatmap layout for a viewport.
///
/// Pure and stateless: every call recomputes the whole tree from scratch,
/// so it is safe to invoke on every resize event and data refresh. Returns
/// an empty list for a zero-area viewport or when no sector carries
/// positive weight.
pub fn compose_layout(
    sectors: &[Sector],
    viewport_w: f32,
    viewport_h: f32,
    config: &HeatmapConfig,
) -> Vec<SectorRect> {
    if viewport_w <= 0.0 || viewport_h <= 0.0 {
        return Vec::new();
    }
    let viewport_area = viewport_w * viewport_h;

    // Level 1: sectors over the full viewport. Weights are recomputed from
    // the instruments actually present rather than trusting stored totals.
    let eligible: Vec<(&Sector, f64)> = sectors
        .iter()
        .map(|s| (s, sector_weight(s)))
        .filter(|(_, w)| *w > 0.0)
        .collect();
    if eligible.is_empty() {
        return Vec::new();
    }

    tracing::info!(
        "Composing heatmap: {} sectors in {:.0}x{:.0} viewport",
        eligible.len(),
        viewport_w,
        viewport_h
    );

    let placed = squarify(
        dampened_items(eligible, viewport_area),
        0.0,
        0.0,
        viewport_w,
        viewport_h,
    );

    placed
        .into_iter()
        .map(|item| compose_sector(item.payload, item.rect, viewport_area, config))
        .collect()
}

/// Lay out one sector box: label bar, padding, then level 2 and 3.
fn compose_sector(
    sector: &Sector,
    outer: Rect,
    viewport_area: f32,
    config: &HeatmapConfig,
) -> SectorRect {
    let inner = outer.cut_top(config.sector_label_h).inset(config.padding);

    // Too small to show anything inside: a bare colored block.
    if inner.area() < config.min_inner_area {
        return SectorRect {
            rect: outer,
            inner,
            name: sector.name.clone(),
            label: None,
            sub_sectors: Vec::new(),
        };
    }

    let label = labels::fit_label(
        &sector.name,
        outer.w,
        config.sector_label_h,
        config.sector_font_size,
    );

    let nested = sector.sub_sectors.len() > 1 && inner.area() >= config.min_nesting_area;
    let sub_sectors = if nested {
        compose_sub_sectors(sector, inner, viewport_area, config)
    } else {
        if sector.sub_sectors.len() > 1 {
            tracing::debug!(
                "Sector '{}': inner area {:.0}px² below nesting threshold, flattening {} sub-sectors",
                sector.name,
                inner.area(),
                sector.sub_sectors.len()
            );
        }
        vec![compose_flat_group(sector, inner, viewport_area, config)]
    };

    SectorRect {
        rect: outer,
        inner,
        name: sector.name.clone(),
        label,
        sub_sectors,
    }
}

/// Level 2: squarify sub-sectors into the sector's inner area, each with its
/// own (smaller) label bar when the box can carry one.
fn compose_sub_sectors(
    sector: &Sector,
    inner: Rect,
    viewport_area: f32,
    config: &HeatmapConfig,
) -> Vec<SubSectorRect> {
    let eligible: Vec<(&SubSector, f64)> = sector
        .sub_sectors
        .iter()
        .map(|sub| (sub, sub_weight(sub)))
        .filter(|(_, w)| *w > 0.0)
        .collect();

    let placed = squarify(
        dampened_items(eligible, viewport_area),
        inner.x,
        inner.y,
        inner.w,
        inner.h,
    );

    placed
        .into_iter()
        .map(|item| {
            let sub = item.payload;
            let box_rect = item.rect;

            // Reserve a label bar only when it leaves usable tile space and
            // at least a truncated name fits.
            let label = if box_rect.h >= 2.0 * config.sub_label_h {
                labels::fit_label(&sub.name, box_rect.w, config.sub_label_h, config.sub_font_size)
            } else {
                None
            };
            let tile_area = if label.is_some() {
                box_rect.cut_top(config.sub_label_h)
            } else {
                box_rect
            };

            let instruments: Vec<(&Instrument, &CompactString)> = sub
                .instruments
                .iter()
                .map(|inst| (inst, &sub.name))
                .collect();
            let tiles = compose_tiles(instruments, tile_area, &sector.name, viewport_area, config);

            SubSectorRect {
                rect: box_rect,
                name: Some(sub.name.clone()),
                label,
                tiles,
            }
        })
        .collect()
}

/// Below the nesting threshold every instrument of the sector is laid out as
/// one flat group covering the whole inner area. Tiles still carry their
/// true sub-sector names.
fn compose_flat_group(
    sector: &Sector,
    inner: Rect,
    viewport_area: f32,
    config: &HeatmapConfig,
) -> SubSectorRect {
    let instruments: Vec<(&Instrument, &CompactString)> = sector
        .sub_sectors
        .iter()
        .flat_map(|sub| sub.instruments.iter().map(move |inst| (inst, &sub.name)))
        .collect();
    let tiles = compose_tiles(instruments, inner, &sector.name, viewport_area, config);

    SubSectorRect {
        rect: inner,
        name: None,
        label: None,
        tiles,
    }
}

/// Level 3: instruments into leaf tiles.
fn compose_tiles(
    instruments: Vec<(&Instrument, &CompactString)>,
    area: Rect,
    sector_name: &CompactString,
    viewport_area: f32,
    config: &HeatmapConfig,
) -> Vec<InstrumentTile> {
    let pairs: Vec<((&Instrument, &CompactString), f64)> = instruments
        .into_iter()
        .filter(|(inst, _)| inst.weight > 0.0)
        .map(|pair| {
            let weight = pair.0.weight;
            (pair, weight)
        })
        .collect();
    let dampened = dampened_items(pairs, viewport_area);

    squarify(dampened, area.x, area.y, area.w, area.h)
        .into_iter()
        .map(|item| {
            let (inst, sub_name) = item.payload;
            let label =
                labels::fit_label(&inst.id, item.rect.w, item.rect.h, config.tile_font_size);
            InstrumentTile {
                rect: item.rect,
                id: inst.id.clone(),
                weight: inst.weight,
                change: inst.change,
                sector: sector_name.clone(),
                sub_sector: sub_name.clone(),
                label,
            }
        })
        .collect()
}

/// Dampen a weighted payload set with the count/viewport schedule and wrap
/// it for the squarify engine.
fn dampened_items<T>(pairs: Vec<(T, f64)>, viewport_area: f32) -> Vec<WeightedItem<T>> {
    let params = DampenParams::for_count_in_viewport(pairs.len(), viewport_area);
    let weights: Vec<f64> = pairs.iter().map(|(_, w)| *w).collect();
    let dampened = dampen_weights(&weights, params.exponent, params.min_area_ratio);
    pairs
        .into_iter()
        .zip(dampened)
        .map(|((payload, _), weight)| WeightedItem::new(weight, payload))
        .collect()
}

fn sector_weight(sector: &Sector) -> f64 {
    sector.sub_sectors.iter().map(sub_weight).sum()
}

fn sub_weight(sub: &SubSector) -> f64 {
    sub.instruments
        .iter()
        .filter(|inst| inst.weight > 0.0)
        .map(|inst| inst.weight)
        .sum()
}
