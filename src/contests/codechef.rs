//! CodeChef contest list: `{future_contests, present_contests, past_contests}`.

use async_trait::async_trait;
use chrono::FixedOffset;
use serde_json::Value;
use tracing::{debug, warn};

use super::{resolve_window, ContestListing, ContestSource, Platform};
use crate::{
    codechef::CodeChefClient,
    core::dates::{parse_epoch_ms, utc_offset, value_as_f64},
    Result,
};

/// CodeChef renders naive timestamps in India Standard Time.
const CODECHEF_UTC_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub fn codechef_offset() -> FixedOffset {
    FixedOffset::east_opt(CODECHEF_UTC_OFFSET_SECS).unwrap_or_else(utc_offset)
}

const CONTEST_BUCKETS: [&str; 3] = ["future_contests", "present_contests", "past_contests"];

fn text(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `<prefix>_iso` as RFC 3339 first, then the naive `<prefix>` in CodeChef time.
fn timestamp(item: &Value, prefix: &str) -> Option<i64> {
    text(item, &format!("{prefix}_iso"))
        .and_then(|raw| parse_epoch_ms(&raw, utc_offset()))
        .or_else(|| text(item, prefix).and_then(|raw| parse_epoch_ms(&raw, codechef_offset())))
}

/// Map one contest record against the site base used for links.
pub fn listing_from(item: &Value, site_base: &str) -> Option<ContestListing> {
    let window = resolve_window(
        timestamp(item, "contest_start_date"),
        timestamp(item, "contest_end_date"),
        item.get("contest_duration").and_then(value_as_f64),
    )?;
    let url = text(item, "contest_code").map(|code| format!("{site_base}/{code}"));

    Some(ContestListing::new(
        Platform::CodeChef,
        text(item, "contest_name"),
        window,
        url,
    ))
}

/// Flatten the three buckets in future, present, past order.
///
/// A payload that is not an object, or a bucket that is not an array, reads as empty.
pub fn parse_contest_list(payload: Value, site_base: &str) -> Vec<ContestListing> {
    let Some(buckets) = payload.as_object() else {
        warn!("CodeChef contest list is not an object; treating it as empty");
        return Vec::new();
    };

    let raw: Vec<&Value> = CONTEST_BUCKETS
        .iter()
        .filter_map(|key| {
            let bucket = buckets.get(*key).filter(|v| !v.is_null())?;
            let items = bucket.as_array();
            if items.is_none() {
                warn!(bucket = *key, "CodeChef contest bucket is not an array; skipping it");
            }
            items
        })
        .flatten()
        .collect();

    let listings: Vec<ContestListing> = raw
        .iter()
        .filter_map(|item| {
            let listing = listing_from(item, site_base);
            if listing.is_none() {
                warn!(code = ?item.get("contest_code"), "dropping CodeChef contest without a start time");
            }
            listing
        })
        .collect();
    debug!(kept = listings.len(), seen = raw.len(), "CodeChef contests parsed");
    listings
}

#[derive(Debug, Clone)]
pub struct CodeChefContests {
    client: CodeChefClient,
}

impl CodeChefContests {
    pub fn new(client: CodeChefClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContestSource for CodeChefContests {
    fn platform(&self) -> Platform {
        Platform::CodeChef
    }

    async fn fetch_contests(&self) -> Result<Vec<ContestListing>> {
        let payload = self
            .client
            .fetcher
            .fetch_json(&self.client.contest_list_url(), &self.client.json_options())
            .await?;
        Ok(parse_contest_list(payload, self.client.site_base()))
    }
}
