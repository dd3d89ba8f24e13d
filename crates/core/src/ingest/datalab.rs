use crate::config::Settings;
use crate::domain::keyword::{TimeUnit, TrendPoint, TrendSeries};
use crate::ingest::error::Upstream;
use crate::ingest::http::{send_with_retry, TransportOptions};
use crate::ingest::provider::TrendSource;
use crate::ingest::types::{parse_count, DataLabKeywordGroup, DataLabRequest, DataLabResponse};
use crate::time::kst::trend_window;
use anyhow::{Context, Result};

pub(crate) const DEFAULT_OPENAPI_BASE_URL: &str = "https://openapi.naver.com";
const DATALAB_PATH: &str = "/v1/datalab/search";

#[derive(Debug, Clone)]
pub struct DataLabClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    retries: u32,
}

impl DataLabClient {
    pub fn from_settings(settings: &Settings, transport: TransportOptions) -> Result<Self> {
        let (client_id, client_secret) = settings.require_openapi_credentials()?;
        Ok(Self {
            http: transport.build_client("DataLab")?,
            base_url: openapi_base_url(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            retries: transport.retries,
        })
    }
}

pub(crate) fn openapi_base_url() -> String {
    std::env::var("NAVER_OPENAPI_BASE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_OPENAPI_BASE_URL.to_string())
}

#[async_trait::async_trait]
impl TrendSource for DataLabClient {
    fn provider_name(&self) -> &'static str {
        "naver_datalab"
    }

    async fn fetch_trend(&self, keyword: &str) -> Result<TrendSeries> {
        let (start, end) = trend_window(chrono::Utc::now());
        let body = DataLabRequest {
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
            time_unit: "month",
            keyword_groups: vec![DataLabKeywordGroup {
                group_name: keyword,
                keywords: vec![keyword],
            }],
        };

        let url = format!("{}{}", self.base_url.trim_end_matches('/'), DATALAB_PATH);
        let text = send_with_retry(Upstream::DataLab, self.retries, || {
            Ok(self
                .http
                .post(&url)
                .header("X-Naver-Client-Id", &self.client_id)
                .header("X-Naver-Client-Secret", &self.client_secret)
                .json(&body))
        })
        .await?;

        let parsed = serde_json::from_str::<DataLabResponse>(&text)
            .with_context(|| format!("failed to parse DataLab response: {text}"))?;

        Ok(TrendSeries {
            keyword: keyword.to_string(),
            start_date: body.start_date,
            end_date: body.end_date,
            time_unit: TimeUnit::Month,
            points: into_points(parsed),
        })
    }
}

fn into_points(resp: DataLabResponse) -> Vec<TrendPoint> {
    resp.results
        .into_iter()
        .next()
        .map(|group| {
            group
                .data
                .into_iter()
                .map(|p| TrendPoint {
                    period: p.period,
                    ratio: parse_count(&p.ratio),
                })
                .collect()
        })
        .unwrap_or_default()
}
