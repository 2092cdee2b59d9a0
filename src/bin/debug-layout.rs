/// Diagnostic tool to verify rows → hierarchy → heatmap layout pipeline
use heatmap_rs::heatmap::{compose_layout, HeatmapConfig};
use heatmap_rs::market::{self, InstrumentRow};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("heatmap_rs=debug".parse()?),
        )
        .init();

    let (viewport_w, viewport_h) = parse_viewport();

    println!("=== DIAGNOSTIC: Hierarchy → Heatmap Layout Pipeline ===");
    println!("Viewport: {viewport_w:.0}x{viewport_h:.0}");

    let rows = sample_rows();
    println!("\n[1] Feed rows: {}", rows.len());

    let sectors = market::build_sectors(&rows);
    println!(
        "\n[2] Hierarchy built: {} sectors, {} instruments",
        sectors.len(),
        sectors.iter().map(|s| s.instrument_count()).sum::<usize>()
    );
    for sector in &sectors {
        println!(
            "    '{}' - weight {:.0}, {} sub-sectors, {} instruments",
            sector.name,
            sector.total_weight,
            sector.sub_sectors.len(),
            sector.instrument_count()
        );
    }

    let config = HeatmapConfig::default();
    let layout = compose_layout(&sectors, viewport_w, viewport_h, &config);
    println!("\n[3] Layout computed: {} sector rects", layout.len());

    println!("\n[4] Sector boxes:");
    for sr in &layout {
        println!(
            "    '{}' - {:.0}x{:.0} at ({:.0}, {:.0}), label={:?}, {} groups",
            sr.name,
            sr.rect.w,
            sr.rect.h,
            sr.rect.x,
            sr.rect.y,
            sr.label,
            sr.sub_sectors.len()
        );
    }

    // Top 10 largest tiles
    let mut tiles: Vec<_> = layout
        .iter()
        .flat_map(|sr| sr.sub_sectors.iter().flat_map(|sub| sub.tiles.iter()))
        .collect();
    tiles.sort_by(|a, b| b.rect.area().partial_cmp(&a.rect.area()).unwrap_or(std::cmp::Ordering::Equal));

    println!("\n[5] Top 10 largest tiles:");
    for (i, tile) in tiles.iter().take(10).enumerate() {
        println!(
            "    [{}] {} ({} / {}) - {:.0}x{:.0} ({:.0}px²) change {:+.2}%",
            i,
            tile.id,
            tile.sector,
            tile.sub_sector,
            tile.rect.w,
            tile.rect.h,
            tile.rect.area(),
            tile.change
        );
    }

    // Anomaly checks: coverage of sector boxes, overlap between siblings
    println!("\n[6] Checking for anomalies:");
    let viewport_area = viewport_w * viewport_h;
    let sector_area: f32 = layout.iter().map(|sr| sr.rect.area()).sum();
    println!("    Sector box area: {sector_area:.0}px²");
    println!("    Viewport area:   {viewport_area:.0}px²");
    println!("    Coverage: {:.1}%", sector_area / viewport_area * 100.0);

    let mut overlaps = 0;
    for i in 0..layout.len() {
        for j in (i + 1)..layout.len() {
            let a = layout[i].rect;
            let b = layout[j].rect;
            let x = (a.x + a.w).min(b.x + b.w) - a.x.max(b.x);
            let y = (a.y + a.h).min(b.y + b.h) - a.y.max(b.y);
            if x > 0.01 && y > 0.01 {
                overlaps += 1;
            }
        }
    }
    println!("    Overlapping sector pairs: {overlaps}");

    let labeled = tiles.iter().filter(|t| t.label.is_some()).count();
    println!("\n[7] Tile label count: {} (out of {})", labeled, tiles.len());

    Ok(())
}

fn parse_viewport() -> (f32, f32) {
    let mut args = std::env::args().skip(1);
    let w = args.next().and_then(|a| a.parse().ok()).unwrap_or(1280.0);
    let h = args.next().and_then(|a| a.parse().ok()).unwrap_or(720.0);
    (w, h)
}

/// A small synthetic market feed with the skew a real one has: a couple of
/// mega-caps and a long tail.
fn sample_rows() -> Vec<InstrumentRow> {
    let mut rows = vec![
        InstrumentRow::new("Technology", "Semiconductors", "NVDA", 3_400_000.0, 2.41),
        InstrumentRow::new("Technology", "Semiconductors", "AVGO", 800_000.0, 1.02),
        InstrumentRow::new("Technology", "Semiconductors", "AMD", 230_000.0, -0.87),
        InstrumentRow::new("Technology", "Software", "MSFT", 3_100_000.0, 0.55),
        InstrumentRow::new("Technology", "Software", "ORCL", 480_000.0, -0.12),
        InstrumentRow::new("Technology", "Software", "CRM", 270_000.0, 1.33),
        InstrumentRow::new("Technology", "Hardware", "AAPL", 3_500_000.0, -0.31),
        InstrumentRow::new("Financials", "Banks", "JPM", 620_000.0, 0.18),
        InstrumentRow::new("Financials", "Banks", "BAC", 310_000.0, -0.44),
        InstrumentRow::new("Financials", "Payments", "V", 560_000.0, 0.71),
        InstrumentRow::new("Financials", "Payments", "MA", 440_000.0, 0.66),
        InstrumentRow::new("Energy", "Oil & Gas", "XOM", 470_000.0, -1.25),
        InstrumentRow::new("Energy", "Oil & Gas", "CVX", 280_000.0, -0.98),
        InstrumentRow::new("Health Care", "Pharma", "LLY", 730_000.0, 1.85),
        InstrumentRow::new("Health Care", "Pharma", "JNJ", 380_000.0, 0.09),
        InstrumentRow::new("Health Care", "Insurers", "UNH", 260_000.0, -2.10),
    ];

    // Long tail of small caps in one crowded sub-sector
    for i in 0..40 {
        rows.push(InstrumentRow::new(
            "Technology",
            "Software",
            &format!("SML{i:02}"),
            1_500.0 + 37.0 * f64::from(i),
            (f64::from(i % 7) - 3.0) * 0.4,
        ));
    }
    rows
}
