use crate::domain::keyword::{ContentCompetitionData, SearchVolumeData, TrendSeries};
use crate::domain::score::{NicheDetails, NicheGrade, NicheScoreResult, ScoreBreakdown};
use crate::scoring::competition::competition_score;
use crate::scoring::efficiency::full_efficiency_score;
use crate::scoring::freshness::{average_post_age_days, freshness_score};
use crate::scoring::trend::analyze_trend;
use crate::scoring::volume::volume_score;
use crate::scoring::weights::NicheWeights;
use crate::scoring::{round1, round2};
use chrono::{DateTime, Utc};

pub fn niche_score(
    volume: &SearchVolumeData,
    competition: &ContentCompetitionData,
    trend: &TrendSeries,
    weights: &NicheWeights,
) -> NicheScoreResult {
    niche_score_at(volume, competition, trend, weights, Utc::now())
}

/// Full niche score with an explicit clock for post ages.
pub fn niche_score_at(
    volume: &SearchVolumeData,
    competition: &ContentCompetitionData,
    trend: &TrendSeries,
    weights: &NicheWeights,
    now: DateTime<Utc>,
) -> NicheScoreResult {
    let searches = volume.total_monthly_searches;

    let volume_points = volume_score(searches, weights.volume);
    let competition_points = competition_score(competition, weights.competition);
    let efficiency_points =
        full_efficiency_score(searches, competition.total_results, weights.efficiency);
    let avg_age = average_post_age_days(&competition.posts, now);
    let freshness_points = freshness_score(avg_age, weights.freshness);
    let trend_result = analyze_trend(trend, weights.trend);

    let breakdown = ScoreBreakdown {
        volume_score: round1(volume_points),
        competition_score: round1(competition_points + efficiency_points),
        freshness_score: round1(freshness_points),
        trend_score: round1(trend_result.score),
    };
    let total_score = round1(breakdown.sum());

    NicheScoreResult {
        keyword: volume.keyword.clone(),
        total_score,
        grade: NicheGrade::from_score(total_score),
        breakdown,
        details: NicheDetails {
            search_volume: searches,
            total_content: competition.total_results,
            avg_post_age_days: avg_age.unwrap_or(0.0).round() as i64,
            trend_direction: trend_result.direction,
            trend_slope: round2(trend_result.slope),
        },
        analyzed_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keyword::{BlogPost, CompetitionIndex, MatchTier, TrendPoint};
    use crate::domain::score::TrendDirection;
    use chrono::TimeZone;

    fn volume(total: u64) -> SearchVolumeData {
        SearchVolumeData {
            keyword: "캠핑 의자".to_string(),
            total_monthly_searches: total,
            pc_searches: total / 4,
            mobile_searches: total - total / 4,
            competition_index: CompetitionIndex::Medium,
            related_keywords: Vec::new(),
            matched_by: MatchTier::Stage1Exact,
            catalog_lookups: 1,
        }
    }

    fn competition(total: u64, dates: &[&str]) -> ContentCompetitionData {
        ContentCompetitionData {
            keyword: "캠핑 의자".to_string(),
            total_results: total,
            posts: dates
                .iter()
                .enumerate()
                .map(|(i, d)| BlogPost {
                    title: format!("post {i}"),
                    link: format!("https://blog.naver.com/p{i}/1"),
                    description: String::new(),
                    blogger_name: format!("p{i}"),
                    blogger_link: format!("blog.naver.com/p{i}"),
                    post_date: (*d).to_string(),
                })
                .collect(),
        }
    }

    fn trend(ratios: &[f64]) -> TrendSeries {
        TrendSeries::monthly(
            "캠핑 의자",
            ratios
                .iter()
                .enumerate()
                .map(|(i, r)| TrendPoint {
                    period: format!("2025-{:02}-01", i + 1),
                    ratio: *r,
                })
                .collect(),
        )
    }

    #[test]
    fn ideal_keyword_grades_a() {
        // 2026-01-01 00:00 KST.
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 15, 0, 0).unwrap();
        let rising: Vec<f64> = (1..=12).map(|i| f64::from(i) * 8.0).collect();
        let result = niche_score_at(
            &volume(5_000),
            &competition(400, &["20240101", "20240601"]),
            &trend(&rising),
            &NicheWeights::default(),
            now,
        );

        assert_eq!(result.breakdown.volume_score, 20.0);
        // Saturation 1.0, diversity 1.0, efficiency ratio 12.5 => full marks.
        assert_eq!(result.breakdown.competition_score, 45.0);
        assert_eq!(result.breakdown.freshness_score, 15.0);
        assert_eq!(result.breakdown.trend_score, 20.0);
        assert_eq!(result.total_score, 100.0);
        assert_eq!(result.grade, NicheGrade::A);
        assert_eq!(result.details.trend_direction, TrendDirection::Rising);
        assert_eq!(result.details.trend_slope, 8.0);
        assert_eq!(result.details.search_volume, 5_000);
        assert_eq!(result.details.total_content, 400);
        assert_eq!(result.analyzed_at, now);
    }

    #[test]
    fn total_is_sum_of_rounded_breakdown() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let result = niche_score_at(
            &volume(777),
            &competition(123_456, &["20260120", "20260110", "20251201"]),
            &trend(&[40.0, 42.0, 39.0, 41.0, 38.0]),
            &NicheWeights::default(),
            now,
        );
        assert!((result.total_score - round1(result.breakdown.sum())).abs() < 1e-9);
        assert_eq!(result.grade, NicheGrade::from_score(result.total_score));
        for part in [
            result.breakdown.volume_score,
            result.breakdown.freshness_score,
            result.breakdown.trend_score,
        ] {
            assert!(part >= 0.0);
        }
        assert!(result.breakdown.competition_score <= 45.0);
    }

    #[test]
    fn empty_inputs_degrade_to_neutral_parts() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let result = niche_score_at(
            &volume(0),
            &competition(0, &[]),
            &trend(&[]),
            &NicheWeights::default(),
            now,
        );
        assert_eq!(result.breakdown.volume_score, 0.0);
        // Saturation 1.0 + diversity 1.0 on 30 points, efficiency floor 4.5.
        assert_eq!(result.breakdown.competition_score, 34.5);
        assert_eq!(result.breakdown.freshness_score, 7.5);
        assert_eq!(result.breakdown.trend_score, 10.0);
        assert_eq!(result.total_score, 52.0);
        assert_eq!(result.grade, NicheGrade::C);
        assert_eq!(result.details.avg_post_age_days, 0);
        assert_eq!(result.details.trend_direction, TrendDirection::Stable);
    }

    #[test]
    fn honours_alternative_weight_profile() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let weights = NicheWeights {
            volume: 40.0,
            competition: 20.0,
            freshness: 10.0,
            trend: 20.0,
            efficiency: 10.0,
        };
        let result = niche_score_at(
            &volume(10_000),
            &competition(0, &[]),
            &trend(&[]),
            &weights,
            now,
        );
        assert_eq!(result.breakdown.volume_score, 40.0);
        assert_eq!(result.breakdown.competition_score, 23.0);
        assert_eq!(result.breakdown.freshness_score, 5.0);
    }
}
