use crate::domain::keyword::CompetitionIndex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub score: f64,
    pub slope: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NicheGrade {
    A,
    B,
    C,
    D,
    F,
}

impl NicheGrade {
    /// Each band is inclusive at its lower bound.
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            Self::A
        } else if score >= 60.0 {
            Self::B
        } else if score >= 45.0 {
            Self::C
        } else if score >= 30.0 {
            Self::D
        } else {
            Self::F
        }
    }
}

/// Full-score breakdown. `competition_score` already includes the efficiency component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub volume_score: f64,
    pub competition_score: f64,
    pub freshness_score: f64,
    pub trend_score: f64,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> f64 {
        self.volume_score + self.competition_score + self.freshness_score + self.trend_score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NicheDetails {
    pub search_volume: u64,
    pub total_content: u64,
    pub avg_post_age_days: i64,
    pub trend_direction: TrendDirection,
    pub trend_slope: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NicheScoreResult {
    pub keyword: String,
    pub total_score: f64,
    pub grade: NicheGrade,
    pub breakdown: ScoreBreakdown,
    pub details: NicheDetails,
    pub analyzed_at: DateTime<Utc>,
}

/// Quick-score breakdown. The seed relevance bonus is folded into the total only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickScoreBreakdown {
    pub volume_score: f64,
    pub comp_score: f64,
    pub efficiency_score: f64,
    pub trend_approx_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickScoreResult {
    pub keyword: String,
    pub total_searches: u64,
    pub pc_searches: u64,
    pub mobile_searches: u64,
    pub competition_index: CompetitionIndex,
    pub quick_score: f64,
    pub breakdown: QuickScoreBreakdown,
}
