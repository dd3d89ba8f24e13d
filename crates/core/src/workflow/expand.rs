use crate::domain::keyword::KeywordMetric;
use crate::domain::score::{NicheScoreResult, QuickScoreResult};
use crate::ingest::provider::Sources;
use crate::resolver::resolve_volume;
use crate::scoring::QuickScorer;
use crate::workflow::keyword::score_candidate;
use crate::workflow::{elapsed_ms, no_candidates_message, ApiCallCounts, ApiCalls};
use anyhow::Result;
use futures::future::join_all;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandMetadata {
    pub total_related: usize,
    pub quick_scored: usize,
    pub full_scored: usize,
    pub full_score_failed: usize,
    pub duration_ms: u64,
    pub api_calls: ApiCallCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandReport {
    pub seed_keyword: String,
    /// Every related keyword, best quick score first.
    pub quick_scores: Vec<QuickScoreResult>,
    /// Full scores for the top quick-scored candidates that enriched successfully.
    pub full_scores: Vec<NicheScoreResult>,
    pub metadata: ExpandMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExpandOutcome {
    Expanded(ExpandReport),
    NoCandidates { message: String },
}

/// Seed -> related keywords -> quick score all -> full score the top `full_score_count`.
pub async fn expand_keyword(
    sources: &Sources,
    seed: &str,
    full_score_count: usize,
) -> Result<ExpandOutcome> {
    let started = Instant::now();
    let calls = ApiCalls::default();

    let volume = resolve_volume(sources.catalog.as_ref(), seed).await?;
    calls.search_ad(volume.catalog_lookups);
    let related = volume.related_keywords;
    if related.is_empty() {
        tracing::info!(seed, "no related keywords");
        return Ok(ExpandOutcome::NoCandidates {
            message: no_candidates_message(seed),
        });
    }

    calls.data_lab();
    let seed_trend = match sources.trends.fetch_trend(seed).await {
        Ok(series) => Some(series),
        Err(err) => {
            tracing::warn!(seed, error = %format!("{err:#}"), "seed trend unavailable; using neutral trend");
            None
        }
    };

    let scorer = QuickScorer::new(sources.profile.quick, seed_trend.as_ref(), Some(seed));
    let mut ranked: Vec<(&KeywordMetric, QuickScoreResult)> =
        related.iter().map(|m| (m, scorer.score(m))).collect();
    ranked.sort_by(|a, b| b.1.quick_score.total_cmp(&a.1.quick_score));

    let calls_ref = &calls;
    let attempts = join_all(ranked.iter().take(full_score_count).map(|(metric, _)| async move {
        (metric.keyword.as_str(), score_candidate(sources, metric, calls_ref).await)
    }))
    .await;

    let mut full_scores = Vec::with_capacity(attempts.len());
    let mut full_score_failed = 0;
    for (keyword, attempt) in attempts {
        match attempt {
            Ok(result) => full_scores.push(result),
            Err(err) => {
                full_score_failed += 1;
                tracing::warn!(seed, keyword, error = %format!("{err:#}"), "full score failed; skipping candidate");
            }
        }
    }
    full_scores.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

    let quick_scores: Vec<QuickScoreResult> = ranked.into_iter().map(|(_, q)| q).collect();
    let metadata = ExpandMetadata {
        total_related: related.len(),
        quick_scored: quick_scores.len(),
        full_scored: full_scores.len(),
        full_score_failed,
        duration_ms: elapsed_ms(started),
        api_calls: calls.snapshot(),
    };
    tracing::info!(
        seed,
        total_related = metadata.total_related,
        full_scored = metadata.full_scored,
        full_score_failed = metadata.full_score_failed,
        duration_ms = metadata.duration_ms,
        "keyword expanded"
    );

    Ok(ExpandOutcome::Expanded(ExpandReport {
        seed_keyword: seed.to_string(),
        quick_scores,
        full_scores,
        metadata,
    }))
}
