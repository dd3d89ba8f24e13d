use crate::domain::score::{NicheGrade, NicheScoreResult};
use crate::ingest::provider::Sources;
use crate::workflow::elapsed_ms;
use crate::workflow::keyword::analyze_keyword;
use anyhow::Result;
use futures::future::join_all;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub keyword: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub analyzed: usize,
    pub failed: usize,
    pub best_keyword: Option<String>,
    pub best_score: Option<f64>,
    pub best_grade: Option<NicheGrade>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// Best total score first.
    pub results: Vec<NicheScoreResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BatchFailure>,
    pub summary: BatchSummary,
}

/// Analyzes every keyword concurrently. A failed keyword is reported, not propagated.
pub async fn batch_analyze(sources: &Sources, keywords: &[String]) -> Result<BatchReport> {
    let started = Instant::now();
    let attempts = join_all(keywords.iter().map(|keyword| async move {
        (keyword.as_str(), analyze_keyword(sources, keyword).await)
    }))
    .await;

    let mut results = Vec::with_capacity(attempts.len());
    let mut errors = Vec::new();
    for (keyword, attempt) in attempts {
        match attempt {
            Ok(result) => results.push(result),
            Err(err) => {
                tracing::warn!(keyword, error = %format!("{err:#}"), "batch keyword failed");
                errors.push(BatchFailure {
                    keyword: keyword.to_string(),
                    error: format!("{err:#}"),
                });
            }
        }
    }
    results.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

    let best = results.first();
    let summary = BatchSummary {
        total: keywords.len(),
        analyzed: results.len(),
        failed: errors.len(),
        best_keyword: best.map(|r| r.keyword.clone()),
        best_score: best.map(|r| r.total_score),
        best_grade: best.map(|r| r.grade),
        duration_ms: elapsed_ms(started),
    };
    tracing::info!(
        total = summary.total,
        analyzed = summary.analyzed,
        failed = summary.failed,
        duration_ms = summary.duration_ms,
        "batch analyzed"
    );

    Ok(BatchReport {
        results,
        errors,
        summary,
    })
}
