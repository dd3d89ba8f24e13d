use crate::domain::keyword::{CompetitionIndex, KeywordMetric, TrendPoint, TrendSeries};
use crate::domain::score::TrendDirection;
use crate::ingest::provider::Sources;
use crate::resolver::resolve_volume;
use crate::scoring::analyze_trend;
use crate::scoring::{round1, round2};
use crate::workflow::keyword::lookup_trend;
use crate::workflow::{elapsed_ms, no_candidates_message};
use anyhow::Result;
use futures::future::join_all;
use serde::Serialize;
use std::time::Instant;

const MIN_CANDIDATE_SEARCHES: u64 = 50;
const MAX_CANDIDATES: usize = 30;
const RECENT_POINTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RisingKeyword {
    pub keyword: String,
    pub total_searches: u64,
    pub pc_searches: u64,
    pub mobile_searches: u64,
    pub competition_index: CompetitionIndex,
    pub trend_direction: TrendDirection,
    pub trend_slope: f64,
    pub trend_score: f64,
    pub recent_trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoverSummary {
    pub total_related: usize,
    pub candidates_checked: usize,
    pub rising_found: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoverReport {
    pub seed_keyword: String,
    /// Steepest slope first.
    pub rising_keywords: Vec<RisingKeyword>,
    pub summary: DiscoverSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiscoverOutcome {
    Discovered(DiscoverReport),
    NoCandidates { message: String },
}

/// Related keywords of `seed` whose 12-month interest is rising.
pub async fn discover_trending(sources: &Sources, seed: &str, limit: usize) -> Result<DiscoverOutcome> {
    let started = Instant::now();
    let volume = resolve_volume(sources.catalog.as_ref(), seed).await?;
    let related = volume.related_keywords;
    if related.is_empty() {
        tracing::info!(seed, "no related keywords");
        return Ok(DiscoverOutcome::NoCandidates {
            message: no_candidates_message(seed),
        });
    }

    let candidates: Vec<&KeywordMetric> = related
        .iter()
        .filter(|k| k.total_searches() >= MIN_CANDIDATE_SEARCHES)
        .take(MAX_CANDIDATES)
        .collect();

    let weight = sources.profile.niche.trend;
    let checked = join_all(candidates.iter().map(|metric| async move {
        match lookup_trend(sources, &metric.keyword).await {
            Ok(series) => Some(rising_entry(metric, &series, weight)),
            Err(err) => {
                tracing::warn!(seed, keyword = %metric.keyword, error = %format!("{err:#}"), "trend lookup failed; skipping candidate");
                None
            }
        }
    }))
    .await;

    let mut rising_keywords: Vec<RisingKeyword> = checked
        .into_iter()
        .flatten()
        .filter(|k| k.trend_direction == TrendDirection::Rising)
        .collect();
    rising_keywords.sort_by(|a, b| b.trend_slope.total_cmp(&a.trend_slope));
    rising_keywords.truncate(limit);

    let summary = DiscoverSummary {
        total_related: related.len(),
        candidates_checked: candidates.len(),
        rising_found: rising_keywords.len(),
        duration_ms: elapsed_ms(started),
    };
    tracing::info!(
        seed,
        candidates_checked = summary.candidates_checked,
        rising_found = summary.rising_found,
        duration_ms = summary.duration_ms,
        "trending keywords discovered"
    );

    Ok(DiscoverOutcome::Discovered(DiscoverReport {
        seed_keyword: seed.to_string(),
        rising_keywords,
        summary,
    }))
}

fn rising_entry(metric: &KeywordMetric, series: &TrendSeries, weight: f64) -> RisingKeyword {
    let analysis = analyze_trend(series, weight);
    let recent_trend = series.points[series.points.len().saturating_sub(RECENT_POINTS)..].to_vec();
    RisingKeyword {
        keyword: metric.keyword.clone(),
        total_searches: metric.total_searches(),
        pc_searches: metric.monthly_pc_searches,
        mobile_searches: metric.monthly_mobile_searches,
        competition_index: metric.competition_index,
        trend_direction: analysis.direction,
        trend_slope: round2(analysis.slope),
        trend_score: round1(analysis.score),
        recent_trend,
    }
}
