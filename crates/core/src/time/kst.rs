use chrono::{DateTime, FixedOffset, Months, NaiveDate, TimeZone, Utc};

const KST_OFFSET_SECS: i32 = 9 * 3600;
const SECS_PER_DAY: f64 = 86_400.0;

fn kst() -> Option<FixedOffset> {
    FixedOffset::east_opt(KST_OFFSET_SECS)
}

pub fn today_kst(now_utc: DateTime<Utc>) -> NaiveDate {
    match kst() {
        Some(offset) => now_utc.with_timezone(&offset).date_naive(),
        None => now_utc.date_naive(),
    }
}

/// Parses a blog `postdate` ("yyyymmdd").
pub fn parse_post_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").ok()
}

/// Fractional days between the post date (00:00 KST) and `now_utc`.
pub fn post_age_days(post_date: &str, now_utc: DateTime<Utc>) -> Option<f64> {
    let date = parse_post_date(post_date)?;
    let posted = kst()?
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .single()?;
    let elapsed = now_utc.signed_duration_since(posted.with_timezone(&Utc));
    Some(elapsed.num_seconds() as f64 / SECS_PER_DAY)
}

/// The 12-month window ending today (KST) used for trend lookups.
pub fn trend_window(now_utc: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
    let end = today_kst(now_utc);
    let start = end.checked_sub_months(Months::new(12)).unwrap_or(end);
    (start, end)
}
