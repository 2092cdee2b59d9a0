pub mod aggregate;
pub mod hierarchy;

use std::collections::HashMap;

use compact_str::CompactString;

pub use aggregate::{aggregate_weights, retain_positive, sort_by_weight};
pub use hierarchy::{Instrument, Sector, SubSector};

/// One row of a flat instrument feed, as delivered by a market-data source.
#[derive(Debug, Clone)]
pub struct InstrumentRow {
    pub sector: CompactString,
    pub sub_sector: CompactString,
    pub id: CompactString,
    pub weight: f64,
    pub change: f64,
}

impl InstrumentRow {
    pub fn new(sector: &str, sub_sector: &str, id: &str, weight: f64, change: f64) -> Self {
        Self {
            sector: CompactString::new(sector),
            sub_sector: CompactString::new(sub_sector),
            id: CompactString::new(id),
            weight,
            change,
        }
    }
}

/// Build the sector → sub-sector → instrument hierarchy from a flat row
/// list. Groups preserve first-seen order, then the whole tree is filtered
/// to positive weights, aggregated bottom-up, and sorted heaviest-first.
pub fn build_sectors(rows: &[InstrumentRow]) -> Vec<Sector> {
    if rows.is_empty() {
        return Vec::new();
    }

    let mut sectors: Vec<Sector> = Vec::new();
    let mut sector_index: HashMap<CompactString, usize> = HashMap::new();
    // (sector index, sub-sector name) → sub-sector index
    let mut sub_index: HashMap<(usize, CompactString), usize> = HashMap::new();

    for row in rows {
        let si = *sector_index.entry(row.sector.clone()).or_insert_with(|| {
            sectors.push(Sector::new(&row.sector, Vec::new()));
            sectors.len() - 1
        });
        let key = (si, row.sub_sector.clone());
        let bi = *sub_index.entry(key).or_insert_with(|| {
            sectors[si]
                .sub_sectors
                .push(SubSector::new(&row.sub_sector, Vec::new()));
            sectors[si].sub_sectors.len() - 1
        });
        sectors[si].sub_sectors[bi]
            .instruments
            .push(Instrument::new(&row.id, row.weight, row.change));
    }

    retain_positive(&mut sectors);
    aggregate_weights(&mut sectors);
    sort_by_weight(&mut sectors);

    tracing::info!(
        "Built hierarchy from {} rows: {} sectors, {} instruments",
        rows.len(),
        sectors.len(),
        sectors.iter().map(Sector::instrument_count).sum::<usize>()
    );

    sectors
}

#[cfg(test)]
mod tests {
    use super::{build_sectors, InstrumentRow};

    #[test]
    fn groups_rows_by_sector_and_sub_sector() {
        let rows = vec![
            InstrumentRow::new("Tech", "Semis", "CHIP", 100.0, 1.0),
            InstrumentRow::new("Energy", "Oil", "CRUD", 80.0, -0.5),
            InstrumentRow::new("Tech", "Software", "SAAS", 60.0, 0.4),
            InstrumentRow::new("Tech", "Semis", "FAB", 50.0, 0.1),
        ];
        let sectors = build_sectors(&rows);
        assert_eq!(sectors.len(), 2);

        let tech = sectors.iter().find(|s| s.name == "Tech").unwrap();
        assert_eq!(tech.sub_sectors.len(), 2);
        assert_eq!(tech.instrument_count(), 3);
        assert!((tech.total_weight - 210.0).abs() < 1e-9);

        // Sorted heaviest-first after aggregation
        assert_eq!(tech.sub_sectors[0].name, "Semis");
        assert_eq!(tech.sub_sectors[0].instruments[0].id, "CHIP");
    }

    #[test]
    fn empty_and_all_filtered_inputs_yield_no_sectors() {
        assert!(build_sectors(&[]).is_empty());
        let rows = vec![InstrumentRow::new("Tech", "Semis", "DUST", 0.0, 0.0)];
        assert!(build_sectors(&rows).is_empty());
    }
}
