use crate::config::Settings;
use crate::domain::keyword::{BlogPost, ContentCompetitionData};
use crate::ingest::datalab::openapi_base_url;
use crate::ingest::error::Upstream;
use crate::ingest::http::{send_with_retry, TransportOptions};
use crate::ingest::provider::ContentSource;
use crate::ingest::types::{BlogSearchItem, BlogSearchResponse};
use crate::time::kst::parse_post_date;
use anyhow::{Context, Result};
use regex::Regex;
use std::sync::LazyLock;

const BLOG_SEARCH_PATH: &str = "/v1/search/blog.json";
const SAMPLE_SIZE: &str = "10";

#[derive(Debug, Clone)]
pub struct BlogSearchClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    retries: u32,
}

impl BlogSearchClient {
    pub fn from_settings(settings: &Settings, transport: TransportOptions) -> Result<Self> {
        let (client_id, client_secret) = settings.require_openapi_credentials()?;
        Ok(Self {
            http: transport.build_client("Blog Search")?,
            base_url: openapi_base_url(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            retries: transport.retries,
        })
    }
}

#[async_trait::async_trait]
impl ContentSource for BlogSearchClient {
    fn provider_name(&self) -> &'static str {
        "naver_blog_search"
    }

    async fn fetch_content_competition(&self, keyword: &str) -> Result<ContentCompetitionData> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), BLOG_SEARCH_PATH);
        let text = send_with_retry(Upstream::BlogSearch, self.retries, || {
            Ok(self
                .http
                .get(&url)
                .header("X-Naver-Client-Id", &self.client_id)
                .header("X-Naver-Client-Secret", &self.client_secret)
                .query(&[
                    ("query", keyword),
                    ("display", SAMPLE_SIZE),
                    ("start", "1"),
                    ("sort", "sim"),
                ]))
        })
        .await?;

        let parsed = serde_json::from_str::<BlogSearchResponse>(&text)
            .with_context(|| format!("failed to parse blog search response: {text}"))?;
        Ok(into_competition(keyword, parsed))
    }
}

fn into_competition(keyword: &str, resp: BlogSearchResponse) -> ContentCompetitionData {
    let mut posts = Vec::with_capacity(resp.items.len());
    for item in resp.items {
        if parse_post_date(&item.postdate).is_none() {
            tracing::warn!(keyword, postdate = %item.postdate, link = %item.link, "dropping post with malformed date");
            continue;
        }
        posts.push(into_post(item));
    }

    ContentCompetitionData {
        keyword: keyword.to_string(),
        total_results: resp.total,
        posts,
    }
}

fn into_post(item: BlogSearchItem) -> BlogPost {
    BlogPost {
        title: strip_html(&item.title),
        link: item.link,
        description: strip_html(&item.description),
        blogger_name: item.bloggername,
        blogger_link: item.bloggerlink,
        post_date: item.postdate.trim().to_string(),
    }
}

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("invalid html tag regex"));
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&[^;]+;").expect("invalid html entity regex"));

/// Removes tags, then replaces `&...;` entities with a space.
pub fn strip_html(html: &str) -> String {
    let without_tags = TAG.replace_all(html, "");
    ENTITY.replace_all(&without_tags, " ").trim().to_string()
}
