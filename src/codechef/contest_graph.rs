//! Rated-contest history from the `all_rating` array embedded in the profile page.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    client::CodeChefClient,
    types::{ContestGraphRecord, ContestHistoryEntry},
};
use crate::{
    cli::types::Username,
    core::{
        dates::{utc_calendar_date, value_as_i64},
        literal::parse_literal,
    },
    Result, TrackerError,
};

#[cfg(test)]
mod tests;

pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract contest graph";

const RATING_VAR: &str = "all_rating";

static SCRIPT: Lazy<Selector> = Lazy::new(|| Selector::parse("script").expect("static selector"));
static ALL_RATING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)all_rating\s*=\s*(\[.*?\]);").expect("static regex"));

fn extraction_failed() -> TrackerError {
    TrackerError::ParseFailure(EXTRACTION_FAILED_MESSAGE.to_string())
}

/// Source text of every `all_rating` assignment, in document order.
fn rating_literals(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&SCRIPT)
        .map(|s| s.text().collect::<String>())
        .filter(|body| body.contains(RATING_VAR))
        .flat_map(|body| {
            ALL_RATING
                .captures_iter(&body)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Map one rating-array element. `None` when a required field is missing or malformed.
pub fn history_entry(item: &Value) -> Option<ContestHistoryEntry> {
    let contest_code = string_field(item, "code").filter(|c| !c.is_empty())?;
    let rating = item.get("rating").and_then(value_as_i64)?;
    let rank = item
        .get("rank")
        .and_then(value_as_i64)
        .filter(|r| *r >= 1)
        .and_then(|r| u32::try_from(r).ok())?;
    let date = item.get("end_date").and_then(utc_calendar_date)?;

    Some(ContestHistoryEntry {
        contest_name: string_field(item, "name").unwrap_or_else(|| contest_code.clone()),
        contest_code,
        rating,
        rank,
        date,
    })
}

/// Parse a profile page into the contest graph.
///
/// Every rating array on the page contributes, in document order. A rejected
/// array is skipped while at least one other parses.
pub fn parse_contest_graph(html: &str) -> Result<ContestGraphRecord> {
    let literals = rating_literals(html);
    if literals.is_empty() {
        warn!("no all_rating script on profile page");
        return Err(extraction_failed());
    }

    let mut arrays = Vec::with_capacity(literals.len());
    for (script, literal) in literals.iter().enumerate() {
        match parse_literal(literal) {
            Ok(Value::Array(items)) => arrays.push(items),
            Ok(_) => warn!(script, "rating literal is not an array"),
            Err(e) => warn!(script, error = %e, "rating literal rejected"),
        }
    }
    if arrays.is_empty() {
        return Err(extraction_failed());
    }
    let items: Vec<Value> = arrays.into_iter().flatten().collect();

    let mut history = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match history_entry(item) {
            Some(entry) => history.push(entry),
            None => warn!(index, "skipping malformed rating entry"),
        }
    }
    debug!(contests = history.len(), "contest graph parsed");

    Ok(ContestGraphRecord::from_history(history))
}

impl CodeChefClient {
    /// Rated-contest history for a user. Any failure surfaces as `ParseFailure`.
    pub async fn get_contest_graph(&self, username: &Username) -> Result<ContestGraphRecord> {
        let html = self.fetch_profile_html(username).await.map_err(|e| {
            warn!(%username, error = %e, "contest graph fetch failed");
            extraction_failed()
        })?;
        parse_contest_graph(&html)
    }
}
