use crate::domain::keyword::{BlogPost, CompetitionIndex, ContentCompetitionData};
use crate::scoring::ramp;
use std::collections::HashSet;

const SATURATION_SHARE: f64 = 0.55;
const DIVERSITY_SHARE: f64 = 0.45;
const DIVERSITY_TARGET: f64 = 0.7;

/// Maps the indexed content count onto [0, 1]; less content is less saturated.
pub fn saturation_score(total_content: u64) -> f64 {
    let t = total_content as f64;
    match total_content {
        0..=499 => 1.0,
        500..=2_999 => ramp(t, 500.0, 3_000.0, 1.0, 0.85),
        3_000..=9_999 => ramp(t, 3_000.0, 10_000.0, 0.85, 0.65),
        10_000..=49_999 => ramp(t, 10_000.0, 50_000.0, 0.65, 0.45),
        50_000..=199_999 => ramp(t, 50_000.0, 200_000.0, 0.45, 0.25),
        200_000..=999_999 => ramp(t, 200_000.0, 1_000_000.0, 0.25, 0.1),
        _ => 0.1 - (0.08 * ((t - 1_000_000.0) / 9_000_000.0)).min(0.08),
    }
}

/// Bonus in [0, 1] for sampled posts spread across many publishers.
pub fn diversity_bonus(posts: &[BlogPost]) -> f64 {
    if posts.is_empty() {
        return 1.0;
    }
    let publishers: HashSet<&str> = posts.iter().map(|p| p.blogger_link.as_str()).collect();
    let ratio = publishers.len() as f64 / posts.len() as f64;
    if ratio >= DIVERSITY_TARGET {
        1.0
    } else {
        ratio / DIVERSITY_TARGET
    }
}

pub fn competition_score(data: &ContentCompetitionData, weight: f64) -> f64 {
    let combined = saturation_score(data.total_results) * SATURATION_SHARE
        + diversity_bonus(&data.posts) * DIVERSITY_SHARE;
    weight * combined
}

/// Competition proxy for quick scoring, from the catalog's bidding-pressure index.
pub fn index_multiplier(index: CompetitionIndex) -> f64 {
    match index {
        CompetitionIndex::High => 0.2,
        CompetitionIndex::Medium | CompetitionIndex::Unknown => 0.5,
        CompetitionIndex::Low => 1.0,
    }
}

pub fn index_competition_score(index: CompetitionIndex, weight: f64) -> f64 {
    weight * index_multiplier(index)
}
