use crate::config::Settings;
use crate::domain::keyword::{CompetitionIndex, KeywordMetric};
use crate::ingest::error::Upstream;
use crate::ingest::http::{send_with_retry, TransportOptions};
use crate::ingest::provider::KeywordCatalog;
use crate::ingest::types::{parse_count, KeywordToolResponse, KeywordToolRow};
use anyhow::{Context, Result};
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue};
use sha2::Sha256;

const DEFAULT_BASE_URL: &str = "https://api.searchad.naver.com";
const KEYWORD_TOOL_PATH: &str = "/keywordstool";

#[derive(Debug, Clone)]
pub struct SearchAdClient {
    http: reqwest::Client,
    base_url: String,
    customer_id: String,
    api_key: String,
    secret_key: String,
    retries: u32,
}

impl SearchAdClient {
    pub fn from_settings(settings: &Settings, transport: TransportOptions) -> Result<Self> {
        let (customer_id, api_key, secret_key) = settings.require_searchad_credentials()?;
        let base_url = std::env::var("NAVER_SEARCHAD_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            http: transport.build_client("SearchAd")?,
            base_url,
            customer_id: customer_id.to_string(),
            api_key: api_key.to_string(),
            secret_key: secret_key.to_string(),
            retries: transport.retries,
        })
    }

    fn headers(&self, method: &str, path: &str) -> Result<HeaderMap> {
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        let signature = sign(&timestamp, method, path, &self.secret_key)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "Content-Type",
            HeaderValue::from_static("application/json; charset=UTF-8"),
        );
        headers.insert("X-Timestamp", HeaderValue::from_str(&timestamp)?);
        headers.insert("X-API-KEY", HeaderValue::from_str(&self.api_key)?);
        headers.insert("X-Customer", HeaderValue::from_str(&self.customer_id)?);
        headers.insert("X-Signature", HeaderValue::from_str(&signature)?);
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl KeywordCatalog for SearchAdClient {
    fn provider_name(&self) -> &'static str {
        "naver_searchad"
    }

    async fn lookup(&self, hint: &str) -> Result<Vec<KeywordMetric>> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), KEYWORD_TOOL_PATH);
        let text = send_with_retry(Upstream::SearchAd, self.retries, || {
            Ok(self
                .http
                .get(&url)
                .headers(self.headers("GET", KEYWORD_TOOL_PATH)?)
                .query(&[("hintKeywords", hint), ("showDetail", "1")]))
        })
        .await?;

        let parsed = serde_json::from_str::<KeywordToolResponse>(&text)
            .with_context(|| format!("failed to parse SearchAd keywordstool response: {text}"))?;
        let rows: Vec<KeywordMetric> = parsed.keyword_list.iter().map(into_metric).collect();
        tracing::debug!(hint, rows = rows.len(), "SearchAd lookup");
        Ok(rows)
    }
}

/// base64(HMAC-SHA256(secret, "{timestamp}.{method}.{path}"))
pub fn sign(timestamp: &str, method: &str, path: &str, secret_key: &str) -> Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret_key.as_bytes())
        .context("invalid SearchAd secret key")?;
    mac.update(format!("{timestamp}.{method}.{path}").as_bytes());
    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

fn into_metric(row: &KeywordToolRow) -> KeywordMetric {
    KeywordMetric {
        keyword: row.rel_keyword.clone(),
        monthly_pc_searches: parse_count(&row.monthly_pc_qc_cnt) as u64,
        monthly_mobile_searches: parse_count(&row.monthly_mobile_qc_cnt) as u64,
        monthly_avg_pc_clicks: parse_count(&row.monthly_ave_pc_clk_cnt),
        monthly_avg_mobile_clicks: parse_count(&row.monthly_ave_mobile_clk_cnt),
        monthly_avg_pc_ctr: parse_count(&row.monthly_ave_pc_ctr),
        monthly_avg_mobile_ctr: parse_count(&row.monthly_ave_mobile_ctr),
        avg_ad_depth: parse_count(&row.pl_avg_depth),
        competition_index: CompetitionIndex::from_label(row.comp_idx.as_deref()),
    }
}
