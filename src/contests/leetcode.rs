//! LeetCode contest list via the GraphQL `allContests` query.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{resolve_window, ContestListing, ContestSource, Platform};
use crate::{
    config::TrackerConfig,
    core::{
        dates::{value_as_f64, value_as_i64},
        http::{FetchOptions, Fetcher, DEFAULT_MAX_ATTEMPTS},
    },
    Result, TrackerError,
};

const CONTEST_URL_BASE: &str = "https://leetcode.com/contest";
const ALL_CONTESTS_QUERY: &str = "{ allContests { title titleSlug startTime duration } }";

pub fn listing_from(item: &Value) -> Option<ContestListing> {
    let start = item
        .get("startTime")
        .and_then(value_as_i64)
        .and_then(|s| s.checked_mul(1000));
    let window = resolve_window(start, None, item.get("duration").and_then(value_as_f64))?;
    let url = item
        .get("titleSlug")
        .and_then(Value::as_str)
        .filter(|slug| !slug.is_empty())
        .map(|slug| format!("{CONTEST_URL_BASE}/{slug}"));
    let name = item.get("title").and_then(Value::as_str).map(str::to_string);

    Some(ContestListing::new(Platform::LeetCode, name, window, url))
}

/// GraphQL `errors` without `data` is an upstream failure. Any other
/// unexpected shape reads as an empty list.
pub fn parse_contest_list(payload: Value) -> Result<Vec<ContestListing>> {
    let data = payload.get("data").filter(|d| !d.is_null());
    let errors = payload
        .get("errors")
        .and_then(Value::as_array)
        .filter(|errors| !errors.is_empty());
    if let (None, Some(errors)) = (data, errors) {
        let detail = errors
            .first()
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("no data");
        return Err(TrackerError::Unavailable(format!(
            "LeetCode GraphQL query failed: {detail}"
        )));
    }

    let Some(all_contests) = data
        .and_then(|d| d.get("allContests"))
        .and_then(Value::as_array)
    else {
        warn!("LeetCode response has no allContests list; treating it as empty");
        return Ok(Vec::new());
    };

    let seen = all_contests.len();
    let listings: Vec<ContestListing> = all_contests
        .iter()
        .filter_map(|item| {
            let listing = listing_from(item);
            if listing.is_none() {
                warn!(slug = ?item.get("titleSlug"), "dropping LeetCode contest without a start time");
            }
            listing
        })
        .collect();
    debug!(kept = listings.len(), seen, "LeetCode contests parsed");
    Ok(listings)
}

#[derive(Debug, Clone)]
pub struct LeetCodeContests {
    fetcher: Fetcher,
    api_base: String,
    max_attempts: u32,
}

impl LeetCodeContests {
    pub fn new(fetcher: Fetcher, api_base: &str) -> Self {
        Self {
            fetcher,
            api_base: api_base.trim_end_matches('/').to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn from_config(config: &TrackerConfig, fetcher: Fetcher) -> Self {
        let mut source = Self::new(fetcher, &config.endpoints.leetcode);
        source.max_attempts = config.max_attempts;
        source
    }

    fn graphql_url(&self) -> String {
        format!("{}/graphql", self.api_base)
    }
}

#[async_trait]
impl ContestSource for LeetCodeContests {
    fn platform(&self) -> Platform {
        Platform::LeetCode
    }

    async fn fetch_contests(&self) -> Result<Vec<ContestListing>> {
        let options = FetchOptions::json()
            .with_json_body(json!({ "query": ALL_CONTESTS_QUERY }))
            .with_max_attempts(self.max_attempts);
        let payload = self.fetcher.fetch_json(&self.graphql_url(), &options).await?;
        parse_contest_list(payload)
    }
}
