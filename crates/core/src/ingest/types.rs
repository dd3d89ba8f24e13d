//! Wire shapes of the Naver APIs. Only the fields the core consumes are modelled.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordToolResponse {
    #[serde(default)]
    pub keyword_list: Vec<KeywordToolRow>,
}

/// Counts arrive as numbers or as strings such as `"< 10"` or `"1,234"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordToolRow {
    pub rel_keyword: String,
    #[serde(default)]
    pub monthly_pc_qc_cnt: Value,
    #[serde(default)]
    pub monthly_mobile_qc_cnt: Value,
    #[serde(default)]
    pub monthly_ave_pc_clk_cnt: Value,
    #[serde(default)]
    pub monthly_ave_mobile_clk_cnt: Value,
    #[serde(default)]
    pub monthly_ave_pc_ctr: Value,
    #[serde(default)]
    pub monthly_ave_mobile_ctr: Value,
    #[serde(default)]
    pub pl_avg_depth: Value,
    #[serde(default)]
    pub comp_idx: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLabRequest<'a> {
    pub start_date: String,
    pub end_date: String,
    pub time_unit: &'static str,
    pub keyword_groups: Vec<DataLabKeywordGroup<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLabKeywordGroup<'a> {
    pub group_name: &'a str,
    pub keywords: Vec<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataLabResponse {
    #[serde(default)]
    pub results: Vec<DataLabGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataLabGroup {
    #[serde(default)]
    pub data: Vec<DataLabPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataLabPoint {
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub ratio: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogSearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub items: Vec<BlogSearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogSearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bloggername: String,
    #[serde(default)]
    pub bloggerlink: String,
    #[serde(default)]
    pub postdate: String,
}

/// Lenient numeric parse for catalog fields.
pub fn parse_count(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let t = s.trim();
            if t == "< 10" {
                return 5.0;
            }
            t.replace(',', "").parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    }
}
