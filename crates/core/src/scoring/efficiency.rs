use crate::domain::keyword::CompetitionIndex;
use crate::scoring::ramp;

/// One band of a demand/supply curve: ratios in `[from, to)` map linearly onto `[start, end)`.
#[derive(Debug, Clone, Copy)]
struct Band {
    from: f64,
    to: f64,
    start: f64,
    end: f64,
}

/// Five-band ratio curve shared by the full and quick efficiency scorers.
#[derive(Debug, Clone, Copy)]
struct RatioCurve {
    bands: &'static [Band],
    floor: f64,
}

impl RatioCurve {
    fn fraction(&self, ratio: f64) -> f64 {
        if ratio >= 1.0 {
            return 1.0;
        }
        self.bands
            .iter()
            .find(|b| ratio >= b.from)
            .map_or(self.floor, |b| ramp(ratio, b.from, b.to, b.start, b.end))
    }
}

const FULL_CURVE: RatioCurve = RatioCurve {
    bands: &[
        Band {
            from: 0.3,
            to: 1.0,
            start: 0.7,
            end: 1.0,
        },
        Band {
            from: 0.1,
            to: 0.3,
            start: 0.45,
            end: 0.7,
        },
        Band {
            from: 0.01,
            to: 0.1,
            start: 0.15,
            end: 0.45,
        },
        Band {
            from: 0.001,
            to: 0.01,
            start: 0.05,
            end: 0.15,
        },
    ],
    floor: 0.02,
};

const QUICK_CURVE: RatioCurve = RatioCurve {
    bands: &[
        Band {
            from: 0.3,
            to: 1.0,
            start: 0.6,
            end: 1.0,
        },
        Band {
            from: 0.1,
            to: 0.3,
            start: 0.35,
            end: 0.6,
        },
        Band {
            from: 0.01,
            to: 0.1,
            start: 0.1,
            end: 0.35,
        },
    ],
    floor: 0.05,
};

/// Stand-in content count for quick scoring, inferred from the catalog's competition index.
pub fn estimated_content_count(index: CompetitionIndex) -> u64 {
    match index {
        CompetitionIndex::High => 50_000,
        CompetitionIndex::Medium | CompetitionIndex::Unknown => 10_000,
        CompetitionIndex::Low => 2_000,
    }
}

/// Demand (searches) over live supply (indexed content count).
pub fn full_efficiency_score(total_searches: u64, total_content: u64, weight: f64) -> f64 {
    if total_searches == 0 || total_content == 0 {
        return weight * 0.3;
    }
    let ratio = total_searches as f64 / total_content as f64;
    weight * FULL_CURVE.fraction(ratio)
}

/// Demand over the estimated supply for the given competition index.
pub fn quick_efficiency_score(total_searches: u64, index: CompetitionIndex, weight: f64) -> f64 {
    if total_searches == 0 {
        return weight * 0.1;
    }
    let ratio = total_searches as f64 / estimated_content_count(index) as f64;
    weight * QUICK_CURVE.fraction(ratio)
}
