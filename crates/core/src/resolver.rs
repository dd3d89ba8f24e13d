//! Maps a free-text seed phrase onto the best matching catalog row.
//!
//! The catalog is keyed by space-stripped strings, and a concatenated query under-counts
//! multi-word phrases. Stage 1 asks for the compact phrase; only when that volume looks too
//! small to trust (< 100) does stage 2 re-ask with the words comma-joined (broad match) and
//! pick the best row through a tiered match.

use crate::domain::keyword::{KeywordMetric, MatchTier, SearchVolumeData};
use crate::ingest::provider::KeywordCatalog;
use anyhow::{Context, Result};
use std::collections::HashSet;

const CONFIDENT_VOLUME: u64 = 100;

pub fn compact(phrase: &str) -> String {
    phrase.split_whitespace().collect()
}

fn words(phrase: &str) -> Vec<&str> {
    phrase.split_whitespace().collect()
}

/// Tiered stage-2 match: exact compact text, then all words contained, then the row
/// containing the most words if that covers at least half of them (rounded up).
pub fn find_best_match<'a>(
    rows: &'a [KeywordMetric],
    phrase: &str,
) -> Option<(&'a KeywordMetric, MatchTier)> {
    let compact_phrase = compact(phrase);
    let parts = words(phrase);

    if let Some(row) = rows.iter().find(|r| r.keyword == compact_phrase) {
        return Some((row, MatchTier::Stage2Exact));
    }

    if let Some(row) = rows
        .iter()
        .find(|r| parts.iter().all(|p| r.keyword.contains(p)))
    {
        return Some((row, MatchTier::Stage2AllWords));
    }

    if parts.len() > 1 {
        let mut best: Option<(&KeywordMetric, usize)> = None;
        for row in rows {
            let count = parts.iter().filter(|p| row.keyword.contains(*p)).count();
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((row, count));
            }
        }
        let required = parts.len().div_ceil(2);
        if let Some((row, count)) = best {
            if count >= required {
                return Some((row, MatchTier::Stage2Partial));
            }
        }
    }

    None
}

/// Stage-1 rows first, then stage-2 rows whose keyword text was not seen yet.
pub fn merge_related(first: Vec<KeywordMetric>, second: Vec<KeywordMetric>) -> Vec<KeywordMetric> {
    let mut seen: HashSet<String> = first.iter().map(|k| k.keyword.clone()).collect();
    let mut merged = first;
    for row in second {
        if seen.insert(row.keyword.clone()) {
            merged.push(row);
        }
    }
    merged
}

pub async fn resolve_volume(catalog: &dyn KeywordCatalog, phrase: &str) -> Result<SearchVolumeData> {
    let phrase = phrase.trim();
    anyhow::ensure!(!phrase.is_empty(), "keyword must be non-empty");

    let compact_phrase = compact(phrase);
    let stage1 = catalog
        .lookup(&compact_phrase)
        .await
        .with_context(|| format!("keyword lookup failed for {compact_phrase:?}"))?;
    let stage1_match = stage1.iter().find(|k| k.keyword == compact_phrase);
    let stage1_volume = stage1_match.map_or(0, KeywordMetric::total_searches);

    if stage1_volume >= CONFIDENT_VOLUME {
        tracing::debug!(phrase, volume = stage1_volume, "resolved at stage 1");
        let matched = stage1_match.cloned();
        return Ok(SearchVolumeData::from_match(
            phrase,
            matched.as_ref(),
            MatchTier::Stage1Exact,
            stage1,
            1,
        ));
    }

    let parts = words(phrase);
    let mut lookups = 1;
    if parts.len() > 1 {
        let broad = parts.join(",");
        let stage2 = catalog
            .lookup(&broad)
            .await
            .with_context(|| format!("broad keyword lookup failed for {broad:?}"))?;
        lookups += 1;

        if let Some((row, tier)) = find_best_match(&stage2, phrase) {
            let volume = row.total_searches();
            if volume > stage1_volume {
                tracing::debug!(phrase, stage1_volume, volume, ?tier, "resolved at stage 2");
                let row = row.clone();
                return Ok(SearchVolumeData::from_match(
                    phrase,
                    Some(&row),
                    tier,
                    merge_related(stage1, stage2),
                    lookups,
                ));
            }
        }
    }

    let (fallback, tier) = match stage1_match {
        Some(row) => (Some(row.clone()), MatchTier::Stage1Exact),
        None => match stage1.first() {
            Some(row) => (Some(row.clone()), MatchTier::Stage1FirstRow),
            None => (None, MatchTier::None),
        },
    };
    if tier == MatchTier::Stage1FirstRow {
        tracing::debug!(phrase, used = ?fallback.as_ref().map(|r| &r.keyword), "no exact row; using first catalog row");
    }
    Ok(SearchVolumeData::from_match(
        phrase,
        fallback.as_ref(),
        tier,
        stage1,
        lookups,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keyword::CompetitionIndex;
    use crate::testing::{row, FakeCatalog};

    #[tokio::test]
    async fn confident_stage1_skips_broad_lookup() {
        let catalog = FakeCatalog::default().with(
            "가을패션",
            vec![
                row("가을패션", 150, CompetitionIndex::Low),
                row("가을코디", 900, CompetitionIndex::High),
            ],
        );
        let data = resolve_volume(&catalog, "가을 패션").await.unwrap();

        assert_eq!(catalog.asked(), vec!["가을패션"]);
        assert_eq!(data.keyword, "가을 패션");
        assert_eq!(data.total_monthly_searches, 150);
        assert_eq!(data.matched_by, MatchTier::Stage1Exact);
        assert_eq!(data.related_keywords.len(), 2);
        assert_eq!(data.catalog_lookups, 1);
    }

    #[tokio::test]
    async fn weak_stage1_upgrades_to_broad_match_and_merges() {
        let catalog = FakeCatalog::default()
            .with(
                "가을패션",
                vec![
                    row("가을패션", 50, CompetitionIndex::Low),
                    row("가을코디", 300, CompetitionIndex::Medium),
                ],
            )
            .with(
                "가을,패션",
                vec![
                    row("가을코디", 300, CompetitionIndex::Medium),
                    row("가을패션", 500, CompetitionIndex::High),
                    row("패션잡화", 4_000, CompetitionIndex::High),
                ],
            );
        let data = resolve_volume(&catalog, "가을 패션").await.unwrap();

        assert_eq!(catalog.asked(), vec!["가을패션", "가을,패션"]);
        assert_eq!(data.total_monthly_searches, 500);
        assert_eq!(data.competition_index, CompetitionIndex::High);
        assert_eq!(data.matched_by, MatchTier::Stage2Exact);
        assert_eq!(data.catalog_lookups, 2);
        let names: Vec<_> = data.related_keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(names, vec!["가을패션", "가을코디", "패션잡화"]);
    }

    #[tokio::test]
    async fn falls_back_to_stage1_when_broad_match_is_not_better() {
        let catalog = FakeCatalog::default()
            .with("캠핑의자", vec![row("캠핑의자", 80, CompetitionIndex::Low)])
            .with("캠핑,의자", vec![row("캠핑의자", 60, CompetitionIndex::High)]);
        let data = resolve_volume(&catalog, "캠핑 의자").await.unwrap();

        assert_eq!(data.total_monthly_searches, 80);
        assert_eq!(data.competition_index, CompetitionIndex::Low);
        assert_eq!(data.matched_by, MatchTier::Stage1Exact);
        assert_eq!(data.related_keywords.len(), 1);
    }

    #[tokio::test]
    async fn single_word_without_exact_row_uses_first_row() {
        let catalog = FakeCatalog::default().with(
            "텐트",
            vec![
                row("텐트추천", 40, CompetitionIndex::Medium),
                row("원터치텐트", 20, CompetitionIndex::Low),
            ],
        );
        let data = resolve_volume(&catalog, "텐트").await.unwrap();

        assert_eq!(catalog.asked(), vec!["텐트"]);
        assert_eq!(data.matched_by, MatchTier::Stage1FirstRow);
        assert_eq!(data.total_monthly_searches, 40);
        assert_eq!(data.competition_index, CompetitionIndex::Medium);
    }

    #[tokio::test]
    async fn empty_catalog_resolves_to_zero() {
        let catalog = FakeCatalog::default().with("없는말", Vec::new());
        let data = resolve_volume(&catalog, "없는말").await.unwrap();
        assert_eq!(data.matched_by, MatchTier::None);
        assert_eq!(data.total_monthly_searches, 0);
        assert_eq!(data.competition_index, CompetitionIndex::Low);
        assert!(data.related_keywords.is_empty());
    }

    #[tokio::test]
    async fn rejects_blank_phrase_without_lookup() {
        let catalog = FakeCatalog::default();
        assert!(resolve_volume(&catalog, "   ").await.is_err());
        assert!(catalog.asked().is_empty());
    }

    #[tokio::test]
    async fn lookup_failure_propagates() {
        let catalog = FakeCatalog::default();
        assert!(resolve_volume(&catalog, "가을 패션").await.is_err());
    }

    #[test]
    fn match_tiers_in_order() {
        let rows = vec![
            row("여자 가을 코트", 10, CompetitionIndex::Low),
            row("가을 패션 여자", 20, CompetitionIndex::Low),
            row("가을패션여자", 30, CompetitionIndex::Low),
        ];
        let (m, tier) = find_best_match(&rows, "가을 패션 여자").unwrap();
        assert_eq!((m.keyword.as_str(), tier), ("가을패션여자", MatchTier::Stage2Exact));

        let (m, tier) = find_best_match(&rows[..2], "가을 패션 여자").unwrap();
        assert_eq!((m.keyword.as_str(), tier), ("가을 패션 여자", MatchTier::Stage2AllWords));

        let (m, tier) = find_best_match(&rows[..1], "가을 패션 여자").unwrap();
        assert_eq!((m.keyword.as_str(), tier), ("여자 가을 코트", MatchTier::Stage2Partial));
    }

    #[test]
    fn partial_match_needs_half_the_words() {
        let rows = vec![
            row("겨울 코트", 10, CompetitionIndex::Low),
            row("남자 코트", 10, CompetitionIndex::Low),
        ];
        // One of four words is below ceil(4/2).
        assert!(find_best_match(&rows, "가을 패션 남자 셔츠").is_none());
        // One of three words is below ceil(3/2) = 2.
        assert!(find_best_match(&rows, "가을 남자 셔츠").is_none());
        // One of two words meets ceil(2/2) = 1; the first row with the best count wins.
        let (m, _) = find_best_match(&rows, "남자 셔츠").unwrap();
        assert_eq!(m.keyword, "남자 코트");
    }
}
