use compact_str::CompactString;

/// One financial instrument: the leaf of the heatmap hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    /// Ticker or listing id, e.g. "NVDA"
    pub id: CompactString,
    /// Market capitalization (or any positive weight the caller chooses)
    pub weight: f64,
    /// Price change over the selected period (signed, e.g. percent)
    pub change: f64,
}

impl Instrument {
    pub fn new(id: &str, weight: f64, change: f64) -> Self {
        Self {
            id: CompactString::new(id),
            weight,
            change,
        }
    }
}

/// A sub-sector grouping instruments, e.g. "Semiconductors".
#[derive(Debug, Clone, PartialEq)]
pub struct SubSector {
    pub name: CompactString,
    /// Aggregated weight of the instruments below. Callers may supply their
    /// own figure; `aggregate_weights` recomputes it from the children.
    pub total_weight: f64,
    pub instruments: Vec<Instrument>,
}

impl SubSector {
    pub fn new(name: &str, instruments: Vec<Instrument>) -> Self {
        Self {
            name: CompactString::new(name),
            total_weight: 0.0,
            instruments,
        }
    }
}

/// A top-level sector grouping sub-sectors, e.g. "Technology".
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub name: CompactString,
    pub total_weight: f64,
    pub sub_sectors: Vec<SubSector>,
}

impl Sector {
    pub fn new(name: &str, sub_sectors: Vec<SubSector>) -> Self {
        Self {
            name: CompactString::new(name),
            total_weight: 0.0,
            sub_sectors,
        }
    }

    /// Total number of instruments across all sub-sectors.
    pub fn instrument_count(&self) -> usize {
        self.sub_sectors.iter().map(|s| s.instruments.len()).sum()
    }
}
