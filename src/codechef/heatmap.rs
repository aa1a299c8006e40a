//! Daily submission heatmap.
//!
//! Reads the structured JSON endpoint first and falls back to the stats array
//! embedded in the profile page. Never fails: the worst case is an empty record.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    client::CodeChefClient,
    types::{HeatmapDay, HeatmapRecord},
};
use crate::{
    cli::types::Username,
    core::{
        dates::{utc_calendar_date, value_as_i64},
        literal::parse_literal,
    },
};


static DAILY_STATS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"var\s+userDailySubmissionsStats\s*=\s*(\[[\s\S]*?\]);").expect("static regex")
});

/// Envelope of the structured heatmap endpoint.
#[derive(Debug, Deserialize)]
struct HeatmapEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(rename = "heatMap", default)]
    heat_map: Option<Value>,
}

/// `value` when it is a non-zero integer, otherwise `count`.
fn entry_count(entry: &Value) -> u32 {
    entry
        .get("value")
        .and_then(value_as_i64)
        .filter(|n| *n != 0)
        .or_else(|| entry.get("count").and_then(value_as_i64))
        .map(|n| n.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0)
}

/// Normalize raw `{date, value|count}` entries.
///
/// Entries without a usable date are dropped; repeated dates are merged.
pub fn normalize_entries(raw: &[Value]) -> Vec<HeatmapDay> {
    let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for entry in raw {
        let Some(date) = entry.get("date").and_then(utc_calendar_date) else {
            continue;
        };
        let count = by_date.entry(date).or_insert(0);
        *count = count.saturating_add(entry_count(entry));
    }
    by_date
        .into_iter()
        .map(|(date, count)| HeatmapDay { date, count })
        .collect()
}

/// Build the record. `legacy_raw_count` is the primary source's own entry count,
/// used for `active_days` only when the strict recount finds nothing.
pub fn summarize(heatmap_data: Vec<HeatmapDay>, legacy_raw_count: Option<usize>) -> HeatmapRecord {
    let strict = heatmap_data.iter().filter(|d| d.count > 0).count() as u32;
    let active_days = match legacy_raw_count {
        Some(raw) if strict == 0 && raw > 0 => raw as u32,
        _ => strict,
    };
    let total_submissions = heatmap_data.iter().map(|d| u64::from(d.count)).sum();

    HeatmapRecord {
        active_days,
        total_submissions,
        heatmap_data,
    }
}

/// Interpret the structured endpoint's payload. `None` means "use the fallback".
pub fn parse_primary(payload: &Value) -> Option<HeatmapRecord> {
    let envelope: HeatmapEnvelope = serde_json::from_value(payload.clone()).ok()?;
    if !envelope.success {
        return None;
    }
    let raw = envelope.heat_map?;
    let entries = raw.as_array().filter(|a| !a.is_empty())?;
    let days = normalize_entries(entries);
    if days.is_empty() {
        return None;
    }
    Some(summarize(days, Some(entries.len())))
}

/// Read the stats array assigned in an inline profile-page script.
pub fn parse_embedded(html: &str) -> Option<HeatmapRecord> {
    let literal = DAILY_STATS.captures(html)?.get(1)?.as_str();
    let parsed = match parse_literal(literal) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "embedded heatmap literal rejected");
            return None;
        }
    };
    let entries = parsed.as_array()?;
    Some(summarize(normalize_entries(entries), None))
}

impl CodeChefClient {
    /// Submission heatmap for a user, degrading to an empty record on any failure.
    pub async fn get_heatmap(&self, username: &Username) -> HeatmapRecord {
        match self
            .fetcher
            .fetch_json(&self.heatmap_url(username), &self.json_options())
            .await
        {
            Ok(payload) => {
                if let Some(record) = parse_primary(&payload) {
                    return record;
                }
                debug!(%username, "heatmap endpoint had no usable data, reading profile page");
            }
            Err(e) => warn!(%username, error = %e, "heatmap endpoint failed, reading profile page"),
        }

        match self.fetch_profile_html(username).await {
            Ok(html) => parse_embedded(&html).unwrap_or_else(|| {
                warn!(%username, "no embedded heatmap found");
                HeatmapRecord::default()
            }),
            Err(e) => {
                warn!(%username, error = %e, "heatmap fallback failed");
                HeatmapRecord::default()
            }
        }
    }
}
