use crate::domain::keyword::{
    CompetitionIndex, ContentCompetitionData, KeywordMetric, MatchTier, SearchVolumeData,
    TrendSeries,
};
use crate::domain::score::NicheScoreResult;
use crate::ingest::provider::Sources;
use crate::resolver::resolve_volume;
use crate::scoring::niche_score;
use crate::workflow::{elapsed_ms, ApiCalls};
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Instant;

const TOP_RELATED: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedKeyword {
    pub keyword: String,
    pub total_searches: u64,
    pub competition_index: CompetitionIndex,
}

/// Resolved volume for one phrase plus its 20 leading related keywords.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeReport {
    pub keyword: String,
    pub total_monthly_searches: u64,
    pub pc_searches: u64,
    pub mobile_searches: u64,
    pub competition_index: CompetitionIndex,
    pub matched_by: MatchTier,
    pub related_keywords_count: usize,
    pub top_related: Vec<RelatedKeyword>,
}

impl VolumeReport {
    pub fn from_volume(data: &SearchVolumeData) -> Self {
        Self {
            keyword: data.keyword.clone(),
            total_monthly_searches: data.total_monthly_searches,
            pc_searches: data.pc_searches,
            mobile_searches: data.mobile_searches,
            competition_index: data.competition_index,
            matched_by: data.matched_by,
            related_keywords_count: data.related_keywords.len(),
            top_related: data
                .related_keywords
                .iter()
                .take(TOP_RELATED)
                .map(|k| RelatedKeyword {
                    keyword: k.keyword.clone(),
                    total_searches: k.total_searches(),
                    competition_index: k.competition_index,
                })
                .collect(),
        }
    }
}

pub async fn lookup_volume(sources: &Sources, keyword: &str) -> Result<VolumeReport> {
    let data = resolve_volume(sources.catalog.as_ref(), keyword).await?;
    Ok(VolumeReport::from_volume(&data))
}

pub async fn lookup_trend(sources: &Sources, keyword: &str) -> Result<TrendSeries> {
    sources
        .trends
        .fetch_trend(keyword)
        .await
        .with_context(|| format!("trend lookup failed for {keyword:?}"))
}

pub async fn lookup_competition(sources: &Sources, keyword: &str) -> Result<ContentCompetitionData> {
    sources
        .content
        .fetch_content_competition(keyword)
        .await
        .with_context(|| format!("content lookup failed for {keyword:?}"))
}

/// Full niche score for one phrase: volume, trend and content fetched concurrently.
pub async fn analyze_keyword(sources: &Sources, keyword: &str) -> Result<NicheScoreResult> {
    let started = Instant::now();
    let (volume, trend, content) = tokio::try_join!(
        resolve_volume(sources.catalog.as_ref(), keyword),
        lookup_trend(sources, keyword),
        lookup_competition(sources, keyword),
    )?;

    let result = niche_score(&volume, &content, &trend, &sources.profile.niche);
    tracing::info!(
        keyword,
        total_score = result.total_score,
        grade = ?result.grade,
        duration_ms = elapsed_ms(started),
        "keyword analyzed"
    );
    Ok(result)
}

/// Full score for a catalog row that is already known (no volume lookup).
pub(crate) async fn score_candidate(
    sources: &Sources,
    metric: &KeywordMetric,
    calls: &ApiCalls,
) -> Result<NicheScoreResult> {
    let keyword = metric.keyword.as_str();
    calls.data_lab();
    calls.blog_search();
    let (trend, content) = tokio::try_join!(
        lookup_trend(sources, keyword),
        lookup_competition(sources, keyword),
    )?;

    let volume = SearchVolumeData::from_metric(metric);
    Ok(niche_score(&volume, &content, &trend, &sources.profile.niche))
}
