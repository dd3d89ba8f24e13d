use crate::scoring::ramp;

const PLATEAU_LOW: u64 = 3_000;
const PLATEAU_HIGH: u64 = 15_000;
const SWEET_LOW: u64 = 1_000;
const SWEET_HIGH: u64 = 30_000;
const BROAD_CEILING: u64 = 100_000;

/// Scores combined monthly searches against the sweet-spot curve, returning a value in
/// `[0, weight]`. Full weight on the 3,000..=15,000 plateau; both tails are penalised.
pub fn volume_score(total_searches: u64, weight: f64) -> f64 {
    if total_searches == 0 {
        return 0.0;
    }

    let t = total_searches as f64;

    if (SWEET_LOW..=SWEET_HIGH).contains(&total_searches) {
        if (PLATEAU_LOW..=PLATEAU_HIGH).contains(&total_searches) {
            return weight;
        }
        if total_searches < PLATEAU_LOW {
            return weight * ramp(t, 1_000.0, 3_000.0, 0.7, 1.0);
        }
        return weight * (0.6 + 0.4 * ((30_000.0 - t) / 15_000.0));
    }

    let ratio = match total_searches {
        0..=9 => 0.05,
        10..=99 => ramp(t, 10.0, 100.0, 0.15, 0.3),
        100..=499 => ramp(t, 100.0, 500.0, 0.3, 0.5),
        500..=999 => ramp(t, 500.0, 1_000.0, 0.5, 0.7),
        _ if total_searches <= BROAD_CEILING => 0.5 * ((100_000.0 - t) / 70_000.0),
        _ => 0.05,
    };
    weight * ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_volume_scores_nothing() {
        for w in [1.0, 20.0, 30.0] {
            assert_eq!(volume_score(0, w), 0.0);
        }
    }

    #[test]
    fn plateau_returns_full_weight() {
        for w in [7.5, 20.0, 30.0] {
            for t in [3_000, 5_000, 9_999, 15_000] {
                assert_eq!(volume_score(t, w), w);
            }
        }
    }

    #[test]
    fn low_volume_ramps() {
        assert!(close(volume_score(5, 20.0), 1.0));
        assert!(close(volume_score(10, 20.0), 3.0));
        assert!(close(volume_score(100, 20.0), 6.0));
        assert!(close(volume_score(500, 20.0), 10.0));
        assert!(close(volume_score(1_000, 20.0), 14.0));
        assert!(close(volume_score(2_000, 20.0), 17.0));
    }

    #[test]
    fn high_volume_decays() {
        assert!(close(volume_score(30_000, 20.0), 12.0));
        assert!(close(volume_score(22_500, 20.0), 16.0));
        // Past the sweet spot the curve restarts from half weight and falls to zero at 100k.
        assert!(close(volume_score(65_000, 20.0), 5.0));
        assert!(close(volume_score(100_000, 20.0), 0.0));
        assert!(close(volume_score(100_001, 20.0), 1.0));
        assert!(close(volume_score(5_000_000, 30.0), 1.5));
    }

    #[test]
    fn stays_within_weight() {
        for t in [1, 9, 10, 99, 450, 999, 2_999, 15_001, 29_999, 30_001, 99_999, 250_000] {
            let s = volume_score(t, 20.0);
            assert!((0.0..=20.0).contains(&s), "t={t} s={s}");
        }
    }
}
