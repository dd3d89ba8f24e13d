use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    SearchAd,
    DataLab,
    BlogSearch,
}

impl Upstream {
    pub fn name(self) -> &'static str {
        match self {
            Self::SearchAd => "SearchAd API",
            Self::DataLab => "DataLab API",
            Self::BlogSearch => "Search API",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamError {
    pub api: Upstream,
    pub stage: &'static str,
    pub status: Option<u16>,
    pub body: Option<String>,
}

impl UpstreamError {
    pub fn http(api: Upstream, status: u16, body: String) -> Self {
        Self {
            api,
            stage: "http",
            status: Some(status),
            body: Some(body),
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.body.as_deref()) {
            (Some(status), Some(body)) => {
                write!(f, "{} error ({status}): {body}", self.api.name())
            }
            (Some(status), None) => write!(f, "{} error ({status})", self.api.name()),
            _ => write!(f, "{} error (stage={})", self.api.name(), self.stage),
        }
    }
}

impl std::error::Error for UpstreamError {}
