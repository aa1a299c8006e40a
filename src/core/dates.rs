//! Date and timestamp normalization for loosely formatted upstream values

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde_json::Value;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d %b %Y %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a date-time string, reading naive values in `local_offset`.
pub fn parse_datetime(raw: &str, local_offset: FixedOffset) -> Option<DateTime<Utc>> {
    let raw = collapse_whitespace(raw);
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, fmt) {
            return local_offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&raw, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return local_offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }
    None
}

/// Parse a date-time string to epoch milliseconds.
pub fn parse_epoch_ms(raw: &str, local_offset: FixedOffset) -> Option<i64> {
    parse_datetime(raw, local_offset).map(|dt| dt.timestamp_millis())
}

/// Canonical UTC calendar date for a heatmap/history value.
///
/// Accepts date strings in any supported layout or an epoch-milliseconds number.
/// Naive strings are taken as UTC.
pub fn utc_calendar_date(raw: &Value) -> Option<NaiveDate> {
    match raw {
        Value::String(s) => parse_datetime(s, utc_offset()).map(|dt| dt.date_naive()),
        Value::Number(n) => {
            let ms = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(ms).single().map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Coerce a JSON number or numeric string to an integer, truncating fractions.
pub fn value_as_i64(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

/// Like [`value_as_i64`] but for possibly fractional quantities.
pub fn value_as_f64(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}
