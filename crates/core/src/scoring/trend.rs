use crate::domain::keyword::TrendSeries;
use crate::domain::score::{TrendAnalysis, TrendDirection};

const MIN_POINTS: usize = 3;

/// Ordinary least-squares slope of `ys` against their index positions `0..n`.
pub fn least_squares_slope(ys: &[f64]) -> Option<f64> {
    let n = ys.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in ys.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denom = nf * sum_xx - sum_x * sum_x;
    if denom == 0.0 {
        return None;
    }
    Some((nf * sum_xy - sum_x * sum_y) / denom)
}

/// Classifies a slope and scores it against `weight`.
pub fn classify_slope(slope: f64, weight: f64) -> (TrendDirection, f64) {
    if slope > 2.0 {
        (TrendDirection::Rising, weight * (0.7 + slope / 20.0).min(1.0))
    } else if slope > 0.5 {
        (TrendDirection::Rising, weight * (0.55 + (slope - 0.5) / 3.3))
    } else if slope >= -0.5 {
        (TrendDirection::Stable, weight * 0.5)
    } else if slope >= -2.0 {
        (
            TrendDirection::Declining,
            weight * (0.25 + 0.25 * ((slope + 2.0) / 1.5)),
        )
    } else {
        (TrendDirection::Declining, weight * 0.15)
    }
}

pub fn neutral(weight: f64) -> TrendAnalysis {
    TrendAnalysis {
        score: weight * 0.5,
        slope: 0.0,
        direction: TrendDirection::Stable,
    }
}

/// Trend score for a ratio series. Fewer than three points is treated as no signal.
pub fn analyze_ratios(ratios: &[f64], weight: f64) -> TrendAnalysis {
    if ratios.len() < MIN_POINTS {
        return neutral(weight);
    }
    let Some(slope) = least_squares_slope(ratios) else {
        return neutral(weight);
    };
    let (direction, score) = classify_slope(slope, weight);
    TrendAnalysis {
        score,
        slope,
        direction,
    }
}

pub fn analyze_trend(series: &TrendSeries, weight: f64) -> TrendAnalysis {
    analyze_ratios(&series.ratios(), weight)
}
