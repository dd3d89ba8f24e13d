use crate::domain::keyword::{KeywordMetric, TrendSeries};
use crate::domain::score::{QuickScoreBreakdown, QuickScoreResult};
use crate::scoring::competition::index_competition_score;
use crate::scoring::efficiency::quick_efficiency_score;
use crate::scoring::round1;
use crate::scoring::trend::{analyze_trend, neutral};
use crate::scoring::volume::volume_score;
use crate::scoring::weights::QuickWeights;

const EXACT_SEED_BONUS: f64 = 5.0;
const ALL_WORDS_BONUS: f64 = 4.0;
const PARTIAL_WORDS_BONUS: f64 = 2.0;

/// Scores every related keyword of one seed. The seed's trend is analysed once at
/// construction and applied uniformly to each candidate.
#[derive(Debug, Clone)]
pub struct QuickScorer {
    weights: QuickWeights,
    trend_approx: f64,
    seed: Option<String>,
}

impl QuickScorer {
    pub fn new(weights: QuickWeights, seed_trend: Option<&TrendSeries>, seed: Option<&str>) -> Self {
        let trend_approx = match seed_trend {
            Some(series) => analyze_trend(series, weights.trend_approx).score,
            None => neutral(weights.trend_approx).score,
        };
        let seed = seed.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        Self {
            weights,
            trend_approx,
            seed,
        }
    }

    pub fn score(&self, metric: &KeywordMetric) -> QuickScoreResult {
        let total = metric.total_searches();
        let w = &self.weights;

        let volume = volume_score(total, w.volume);
        let comp = index_competition_score(metric.competition_index, w.competition);
        let efficiency = quick_efficiency_score(total, metric.competition_index, w.efficiency);
        let bonus = self
            .seed
            .as_deref()
            .map_or(0.0, |seed| relevance_bonus(&metric.keyword, seed));

        QuickScoreResult {
            keyword: metric.keyword.clone(),
            total_searches: total,
            pc_searches: metric.monthly_pc_searches,
            mobile_searches: metric.monthly_mobile_searches,
            competition_index: metric.competition_index,
            quick_score: round1(volume + comp + efficiency + self.trend_approx + bonus),
            breakdown: QuickScoreBreakdown {
                volume_score: round1(volume),
                comp_score: round1(comp),
                efficiency_score: round1(efficiency),
                trend_approx_score: round1(self.trend_approx),
            },
        }
    }
}

/// One-off quick score; prefer [`QuickScorer`] when scoring many keywords for the same seed.
pub fn quick_score(
    metric: &KeywordMetric,
    seed_trend: Option<&TrendSeries>,
    seed: Option<&str>,
    weights: &QuickWeights,
) -> QuickScoreResult {
    QuickScorer::new(*weights, seed_trend, seed).score(metric)
}

fn compact_lower(s: &str) -> String {
    s.split_whitespace().collect::<String>().to_lowercase()
}

/// Bonus (0..=5) for keywords that contain the seed or its words. Added on top of the
/// 100-point budget.
pub fn relevance_bonus(keyword: &str, seed: &str) -> f64 {
    let compact_seed = compact_lower(seed);
    if compact_seed.is_empty() {
        return 0.0;
    }
    if compact_lower(keyword).contains(&compact_seed) {
        return EXACT_SEED_BONUS;
    }

    let keyword = keyword.to_lowercase();

    let words: Vec<String> = seed.split_whitespace().map(str::to_lowercase).collect();
    if words.len() < 2 {
        return 0.0;
    }
    let matched = words.iter().filter(|w| keyword.contains(w.as_str())).count();
    if matched == words.len() {
        ALL_WORDS_BONUS
    } else if matched > 0 {
        PARTIAL_WORDS_BONUS * (matched as f64 / words.len() as f64)
    } else {
        0.0
    }
}
