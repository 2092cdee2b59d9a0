use super::hierarchy::Sector;

/// Drop every instrument with a non-positive weight, then every sub-sector
/// and sector left without instruments.
///
/// This is the single filtering pass for bad weights: layout downstream
/// assumes positive weights, and the squarify engine's own drop of
/// non-positive items is a backstop, not the mechanism.
pub fn retain_positive(sectors: &mut Vec<Sector>) {
    let before: usize = sectors.iter().map(Sector::instrument_count).sum();

    for sector in sectors.iter_mut() {
        for sub in &mut sector.sub_sectors {
            sub.instruments.retain(|inst| inst.weight > 0.0);
        }
        sector.sub_sectors.retain(|sub| !sub.instruments.is_empty());
    }
    sectors.retain(|sector| !sector.sub_sectors.is_empty());

    let after: usize = sectors.iter().map(Sector::instrument_count).sum();
    if after < before {
        tracing::debug!(
            "Filtered {} non-positive-weight instruments ({} remain)",
            before - after,
            after
        );
    }
}

/// Recompute every `total_weight` bottom-up from the instruments actually
/// present. Layout never trusts caller-supplied totals, since callers may
/// have filtered children after computing them.
pub fn aggregate_weights(sectors: &mut [Sector]) {
    for sector in sectors.iter_mut() {
        let mut sector_total = 0.0;
        for sub in &mut sector.sub_sectors {
            sub.total_weight = sub
                .instruments
                .iter()
                .filter(|inst| inst.weight > 0.0)
                .map(|inst| inst.weight)
                .sum();
            sector_total += sub.total_weight;
        }
        sector.total_weight = sector_total;
    }
}

/// Sort sub-sectors within each sector, and instruments within each
/// sub-sector, by weight descending. The squarify engine re-sorts its own
/// input, but descending order keeps diagnostics and rendering stable.
pub fn sort_by_weight(sectors: &mut [Sector]) {
    for sector in sectors.iter_mut() {
        sector
            .sub_sectors
            .sort_by(|a, b| b.total_weight.total_cmp(&a.total_weight));
        for sub in &mut sector.sub_sectors {
            sub.instruments
                .sort_by(|a, b| b.weight.total_cmp(&a.weight));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::hierarchy::{Instrument, Sector, SubSector};
    use super::{aggregate_weights, retain_positive, sort_by_weight};

    fn sample() -> Vec<Sector> {
        vec![Sector::new(
            "Technology",
            vec![
                SubSector::new(
                    "Semiconductors",
                    vec![
                        Instrument::new("CHIP", 100.0, 1.2),
                        Instrument::new("FAB", 40.0, -0.3),
                        Instrument::new("DUST", 0.0, 0.0),
                    ],
                ),
                SubSector::new("Software", vec![Instrument::new("SAAS", 60.0, 2.1)]),
                SubSector::new("Defunct", vec![Instrument::new("GONE", -5.0, 0.0)]),
            ],
        )]
    }

    #[test]
    fn retain_positive_prunes_instruments_and_empty_groups() {
        let mut sectors = sample();
        retain_positive(&mut sectors);
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].sub_sectors.len(), 2);
        assert_eq!(sectors[0].sub_sectors[0].instruments.len(), 2);
        assert_eq!(sectors[0].instrument_count(), 3);
    }

    #[test]
    fn aggregate_recomputes_totals_from_children() {
        let mut sectors = sample();
        retain_positive(&mut sectors);
        aggregate_weights(&mut sectors);
        assert!((sectors[0].total_weight - 200.0).abs() < 1e-9);
        assert!((sectors[0].sub_sectors[0].total_weight - 140.0).abs() < 1e-9);
        assert!((sectors[0].sub_sectors[1].total_weight - 60.0).abs() < 1e-9);
    }

    #[test]
    fn sort_orders_heaviest_first() {
        let mut sectors = vec![Sector::new(
            "Mixed",
            vec![
                SubSector::new("Light", vec![Instrument::new("A", 1.0, 0.0)]),
                SubSector::new(
                    "Heavy",
                    vec![
                        Instrument::new("B", 2.0, 0.0),
                        Instrument::new("C", 9.0, 0.0),
                    ],
                ),
            ],
        )];
        aggregate_weights(&mut sectors);
        sort_by_weight(&mut sectors);
        assert_eq!(sectors[0].sub_sectors[0].name, "Heavy");
        assert_eq!(sectors[0].sub_sectors[0].instruments[0].id, "C");
    }
}
