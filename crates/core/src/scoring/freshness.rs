use crate::domain::keyword::BlogPost;
use crate::time::kst::post_age_days;
use chrono::{DateTime, Utc};

/// Mean age in days of the sampled posts, ignoring any without a parseable date.
pub fn average_post_age_days(posts: &[BlogPost], now: DateTime<Utc>) -> Option<f64> {
    let ages: Vec<f64> = posts
        .iter()
        .filter_map(|p| post_age_days(&p.post_date, now))
        .collect();
    if ages.is_empty() {
        return None;
    }
    Some(ages.iter().sum::<f64>() / ages.len() as f64)
}

/// Stale competing content is easier to outrank, so an older average scores higher.
pub fn freshness_score(average_age_days: Option<f64>, weight: f64) -> f64 {
    let Some(age) = average_age_days else {
        return weight * 0.5;
    };

    let ratio = if age > 365.0 {
        1.0
    } else if age > 180.0 {
        0.85
    } else if age > 90.0 {
        0.65
    } else if age > 60.0 {
        0.5
    } else if age > 30.0 {
        0.35
    } else {
        0.15
    };
    weight * ratio
}

pub fn freshness_score_at(posts: &[BlogPost], now: DateTime<Utc>, weight: f64) -> f64 {
    freshness_score(average_post_age_days(posts, now), weight)
}
