//! In-memory collaborators for unit tests.

use crate::domain::keyword::{
    BlogPost, CompetitionIndex, ContentCompetitionData, KeywordMetric, TrendPoint, TrendSeries,
};
use crate::ingest::provider::{ContentSource, KeywordCatalog, Sources, TrendSource};
use crate::scoring::ScoringProfile;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub(crate) fn row(keyword: &str, total: u64, index: CompetitionIndex) -> KeywordMetric {
    KeywordMetric {
        keyword: keyword.to_string(),
        monthly_pc_searches: total / 5,
        monthly_mobile_searches: total - total / 5,
        monthly_avg_pc_clicks: 0.0,
        monthly_avg_mobile_clicks: 0.0,
        monthly_avg_pc_ctr: 0.0,
        monthly_avg_mobile_ctr: 0.0,
        avg_ad_depth: 0.0,
        competition_index: index,
    }
}

pub(crate) fn linear_series(keyword: &str, start: f64, step: f64) -> TrendSeries {
    TrendSeries::monthly(
        keyword,
        (0..12_u32)
            .map(|i| TrendPoint {
                period: format!("2025-{:02}-01", i + 1),
                ratio: start + step * f64::from(i),
            })
            .collect(),
    )
}

/// Catalog answering from a fixed hint -> rows table and recording each hint asked.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    pub answers: HashMap<String, Vec<KeywordMetric>>,
    pub asked: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with(mut self, hint: &str, rows: Vec<KeywordMetric>) -> Self {
        self.answers.insert(hint.to_string(), rows);
        self
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl KeywordCatalog for FakeCatalog {
    fn provider_name(&self) -> &'static str {
        "fake_catalog"
    }

    async fn lookup(&self, hint: &str) -> Result<Vec<KeywordMetric>> {
        self.asked.lock().unwrap().push(hint.to_string());
        self.answers
            .get(hint)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no canned answer for {hint}"))
    }
}

/// Trend source with per-keyword series. Unknown keywords get a flat series; failing ones error.
#[derive(Default)]
pub(crate) struct FakeTrends {
    pub series: HashMap<String, TrendSeries>,
    pub failing: HashSet<String>,
}

impl FakeTrends {
    pub fn with(mut self, series: TrendSeries) -> Self {
        self.series.insert(series.keyword.clone(), series);
        self
    }

    pub fn failing(mut self, keyword: &str) -> Self {
        self.failing.insert(keyword.to_string());
        self
    }
}

#[async_trait::async_trait]
impl TrendSource for FakeTrends {
    fn provider_name(&self) -> &'static str {
        "fake_trends"
    }

    async fn fetch_trend(&self, keyword: &str) -> Result<TrendSeries> {
        if self.failing.contains(keyword) {
            anyhow::bail!("DataLab API error (500): boom");
        }
        Ok(self
            .series
            .get(keyword)
            .cloned()
            .unwrap_or_else(|| linear_series(keyword, 50.0, 0.0)))
    }
}

/// Content source returning `total_results` per keyword with a fixed diverse sample.
#[derive(Default)]
pub(crate) struct FakeContent {
    pub totals: HashMap<String, u64>,
    pub failing: HashSet<String>,
}

impl FakeContent {
    pub fn with(mut self, keyword: &str, total: u64) -> Self {
        self.totals.insert(keyword.to_string(), total);
        self
    }

    pub fn failing(mut self, keyword: &str) -> Self {
        self.failing.insert(keyword.to_string());
        self
    }
}

#[async_trait::async_trait]
impl ContentSource for FakeContent {
    fn provider_name(&self) -> &'static str {
        "fake_content"
    }

    async fn fetch_content_competition(&self, keyword: &str) -> Result<ContentCompetitionData> {
        if self.failing.contains(keyword) {
            anyhow::bail!("Search API error (429): quota");
        }
        let posts = (0..10)
            .map(|i| BlogPost {
                title: format!("{keyword} {i}"),
                link: format!("https://blog.naver.com/p{i}/1"),
                description: String::new(),
                blogger_name: format!("p{i}"),
                blogger_link: format!("blog.naver.com/p{i}"),
                post_date: "20240101".to_string(),
            })
            .collect();
        Ok(ContentCompetitionData {
            keyword: keyword.to_string(),
            total_results: self.totals.get(keyword).copied().unwrap_or(20_000),
            posts,
        })
    }
}

pub(crate) fn sources(catalog: FakeCatalog, trends: FakeTrends, content: FakeContent) -> Sources {
    Sources {
        catalog: Arc::new(catalog),
        trends: Arc::new(trends),
        content: Arc::new(content),
        profile: ScoringProfile::default(),
    }
}
