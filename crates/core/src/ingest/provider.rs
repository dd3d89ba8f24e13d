use crate::config::Settings;
use crate::domain::keyword::{ContentCompetitionData, KeywordMetric, TrendSeries};
use crate::ingest::blog::BlogSearchClient;
use crate::ingest::datalab::DataLabClient;
use crate::ingest::http::TransportOptions;
use crate::ingest::searchad::SearchAdClient;
use crate::scoring::ScoringProfile;
use anyhow::Result;
use std::sync::Arc;

/// Keyword catalog with search counts (one call per hint).
#[async_trait::async_trait]
pub trait KeywordCatalog: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn lookup(&self, hint: &str) -> Result<Vec<KeywordMetric>>;
}

/// 12-month search-interest series for one keyword.
#[async_trait::async_trait]
pub trait TrendSource: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_trend(&self, keyword: &str) -> Result<TrendSeries>;
}

/// Indexed content count plus a small sample of competing posts.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_content_competition(&self, keyword: &str) -> Result<ContentCompetitionData>;
}

/// Everything a workflow needs: the three collaborators and the weight profile.
#[derive(Clone)]
pub struct Sources {
    pub catalog: Arc<dyn KeywordCatalog>,
    pub trends: Arc<dyn TrendSource>,
    pub content: Arc<dyn ContentSource>,
    pub profile: ScoringProfile,
}

impl Sources {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let transport = TransportOptions::from_env();
        Ok(Self {
            catalog: Arc::new(SearchAdClient::from_settings(settings, transport)?),
            trends: Arc::new(DataLabClient::from_settings(settings, transport)?),
            content: Arc::new(BlogSearchClient::from_settings(settings, transport)?),
            profile: ScoringProfile::from_env()?,
        })
    }
}
