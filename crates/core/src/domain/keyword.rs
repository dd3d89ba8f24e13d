use serde::{Deserialize, Serialize};

/// Advertiser bidding pressure reported by the keyword catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompetitionIndex {
    #[serde(rename = "높음", alias = "HIGH", alias = "high")]
    High,
    #[serde(rename = "중간", alias = "MEDIUM", alias = "medium")]
    Medium,
    #[serde(rename = "낮음", alias = "LOW", alias = "low")]
    Low,
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl CompetitionIndex {
    /// Parses the catalog label. A missing label means the catalog had no bids (LOW).
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Low;
        };
        match label {
            "높음" => Self::High,
            "중간" => Self::Medium,
            "낮음" => Self::Low,
            _ => match label.to_ascii_uppercase().as_str() {
                "HIGH" => Self::High,
                "MEDIUM" => Self::Medium,
                "LOW" => Self::Low,
                _ => Self::Unknown,
            },
        }
    }
}

/// One catalog row returned by a volume lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetric {
    pub keyword: String,
    pub monthly_pc_searches: u64,
    pub monthly_mobile_searches: u64,
    pub monthly_avg_pc_clicks: f64,
    pub monthly_avg_mobile_clicks: f64,
    pub monthly_avg_pc_ctr: f64,
    pub monthly_avg_mobile_ctr: f64,
    pub avg_ad_depth: f64,
    pub competition_index: CompetitionIndex,
}

impl KeywordMetric {
    pub fn total_searches(&self) -> u64 {
        self.monthly_pc_searches + self.monthly_mobile_searches
    }
}

/// Which resolver branch produced a [`SearchVolumeData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Stage1Exact,
    Stage2Exact,
    Stage2AllWords,
    Stage2Partial,
    /// No exact row; the catalog's first row stands in as the best-known estimate.
    Stage1FirstRow,
    /// The catalog returned nothing at all.
    None,
    /// Built directly from an already-known catalog row.
    Catalog,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchVolumeData {
    pub keyword: String,
    pub total_monthly_searches: u64,
    pub pc_searches: u64,
    pub mobile_searches: u64,
    pub competition_index: CompetitionIndex,
    pub related_keywords: Vec<KeywordMetric>,
    pub matched_by: MatchTier,
    pub catalog_lookups: u32,
}

impl SearchVolumeData {
    pub fn from_match(
        keyword: &str,
        matched: Option<&KeywordMetric>,
        matched_by: MatchTier,
        related_keywords: Vec<KeywordMetric>,
        catalog_lookups: u32,
    ) -> Self {
        let pc_searches = matched.map_or(0, |m| m.monthly_pc_searches);
        let mobile_searches = matched.map_or(0, |m| m.monthly_mobile_searches);
        Self {
            keyword: keyword.to_string(),
            total_monthly_searches: pc_searches + mobile_searches,
            pc_searches,
            mobile_searches,
            competition_index: matched.map_or(CompetitionIndex::Low, |m| m.competition_index),
            related_keywords,
            matched_by,
            catalog_lookups,
        }
    }

    /// Volume record for a candidate that is already a catalog row (no related list).
    pub fn from_metric(metric: &KeywordMetric) -> Self {
        Self::from_match(&metric.keyword, Some(metric), MatchTier::Catalog, Vec::new(), 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Month,
    Week,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// "yyyy-mm-dd" start of the period as reported by DataLab.
    pub period: String,
    /// Relative interest in [0, 100].
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub keyword: String,
    pub start_date: String,
    pub end_date: String,
    pub time_unit: TimeUnit,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn monthly(keyword: &str, points: Vec<TrendPoint>) -> Self {
        let start_date = points.first().map(|p| p.period.clone()).unwrap_or_default();
        let end_date = points.last().map(|p| p.period.clone()).unwrap_or_default();
        Self {
            keyword: keyword.to_string(),
            start_date,
            end_date,
            time_unit: TimeUnit::Month,
            points,
        }
    }

    pub fn ratios(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.ratio).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub link: String,
    pub description: String,
    pub blogger_name: String,
    /// Publisher identifier used for diversity.
    pub blogger_link: String,
    /// "yyyymmdd"
    pub post_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCompetitionData {
    pub keyword: String,
    pub total_results: u64,
    pub posts: Vec<BlogPost>,
}
