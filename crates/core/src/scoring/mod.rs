//! Pure scoring functions. Nothing here performs I/O; every function is deterministic given its
//! inputs (freshness takes "now" explicitly through the `*_at` variants).

pub mod competition;
pub mod efficiency;
pub mod freshness;
pub mod niche;
pub mod quick;
pub mod trend;
pub mod volume;
pub mod weights;

pub use niche::{niche_score, niche_score_at};
pub use quick::{quick_score, QuickScorer};
pub use trend::analyze_trend;
pub use weights::{NicheWeights, QuickWeights, ScoringProfile};

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Linear interpolation from `start` to `end` as `x` moves from `from` to `to`.
pub(crate) fn ramp(x: f64, from: f64, to: f64, start: f64, end: f64) -> f64 {
    start + (end - start) * ((x - from) / (to - from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up_for_positive_scores() {
        assert_eq!(round1(12.25), 12.3);
        assert_eq!(round1(12.24), 12.2);
        assert_eq!(round2(1.005_1), 1.01);
    }

    #[test]
    fn ramp_hits_both_endpoints() {
        assert_eq!(ramp(10.0, 10.0, 100.0, 0.15, 0.3), 0.15);
        assert!((ramp(100.0, 10.0, 100.0, 0.15, 0.3) - 0.3).abs() < 1e-12);
    }
}
