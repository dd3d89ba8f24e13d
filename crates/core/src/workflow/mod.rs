//! Orchestration over the upstream collaborators: resolve, enrich, score.
//!
//! Scoring stays pure; everything here is async, times its run and returns a serializable
//! report. Per-candidate failures are logged and counted, never propagated.

pub mod batch;
pub mod discover;
pub mod expand;
pub mod keyword;

pub use batch::{batch_analyze, BatchReport};
pub use discover::{discover_trending, DiscoverOutcome, DiscoverReport};
pub use expand::{expand_keyword, ExpandOutcome, ExpandReport};
pub use keyword::{analyze_keyword, lookup_competition, lookup_trend, lookup_volume, VolumeReport};

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

pub const MAX_KEYWORD_CHARS: usize = 40;
pub const DEFAULT_FULL_SCORE_COUNT: usize = 10;
pub const MAX_FULL_SCORE_COUNT: usize = 20;
pub const DEFAULT_DISCOVER_LIMIT: usize = 10;
pub const MAX_DISCOVER_LIMIT: usize = 20;
pub const MAX_BATCH_KEYWORDS: usize = 10;

/// Caller supplied an out-of-range argument. Carried inside `anyhow::Error`; surfaces map it
/// to a client error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInput(pub String);

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvalidInput {}

fn invalid(message: String) -> anyhow::Error {
    InvalidInput(message).into()
}

/// Trimmed keyword of 1..=40 characters.
pub fn validate_keyword(keyword: &str) -> anyhow::Result<&str> {
    let keyword = keyword.trim();
    let chars = keyword.chars().count();
    if chars == 0 {
        return Err(invalid("keyword must not be empty".to_string()));
    }
    if chars > MAX_KEYWORD_CHARS {
        return Err(invalid(format!(
            "keyword must be at most {MAX_KEYWORD_CHARS} characters (got {chars})"
        )));
    }
    Ok(keyword)
}

/// `value` within 1..=max, or `default` when absent.
pub fn validate_count(
    name: &str,
    value: Option<usize>,
    default: usize,
    max: usize,
) -> anyhow::Result<usize> {
    let value = value.unwrap_or(default);
    if !(1..=max).contains(&value) {
        return Err(invalid(format!("{name} must be between 1 and {max} (got {value})")));
    }
    Ok(value)
}

pub fn validate_batch(keywords: &[String]) -> anyhow::Result<Vec<String>> {
    if keywords.is_empty() || keywords.len() > MAX_BATCH_KEYWORDS {
        return Err(invalid(format!(
            "keywords must contain 1 to {MAX_BATCH_KEYWORDS} entries (got {})",
            keywords.len()
        )));
    }
    keywords
        .iter()
        .map(|k| validate_keyword(k).map(str::to_string))
        .collect()
}

pub(crate) fn no_candidates_message(seed: &str) -> String {
    format!("No related keywords found for \"{seed}\". Try a more general keyword.")
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Upstream calls that actually went out during one workflow run.
#[derive(Debug, Default)]
pub struct ApiCalls {
    search_ad: AtomicU32,
    data_lab: AtomicU32,
    blog_search: AtomicU32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApiCallCounts {
    pub search_ad: u32,
    pub data_lab: u32,
    pub blog_search: u32,
}

impl ApiCalls {
    pub fn search_ad(&self, n: u32) {
        self.search_ad.fetch_add(n, Ordering::Relaxed);
    }

    pub fn data_lab(&self) {
        self.data_lab.fetch_add(1, Ordering::Relaxed);
    }

    pub fn blog_search(&self) {
        self.blog_search.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ApiCallCounts {
        ApiCallCounts {
            search_ad: self.search_ad.load(Ordering::Relaxed),
            data_lab: self.data_lab.load(Ordering::Relaxed),
            blog_search: self.blog_search.load(Ordering::Relaxed),
        }
    }
}
