//! Codeforces contest list via the public `contest.list` method.

use async_trait::async_trait;
use serde_json::Value;
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

const CONTEST_URL_BASE: &str = "https://codeforces.com/contest";

pub fn listing_from(item: &Value) -> Option<ContestListing> {
    let start = item
        .get("startTimeSeconds")
        .and_then(value_as_i64)
        .and_then(|s| s.checked_mul(1000));
    let window = resolve_window(start, None, item.get("durationSeconds").and_then(value_as_f64))?;
    let url = item
        .get("id")
        .and_then(value_as_i64)
        .map(|id| format!("{CONTEST_URL_BASE}/{id}"));
    let name = item.get("name").and_then(Value::as_str).map(str::to_string);

    Some(ContestListing::new(Platform::Codeforces, name, window, url))
}

/// Unwrap `{status, result}`. A status other than `"OK"` is an upstream
/// failure; a missing or non-array `result` reads as an empty list.
pub fn parse_contest_list(payload: Value) -> Result<Vec<ContestListing>> {
    if let Some(status) = payload.get("status").and_then(Value::as_str) {
        if status != "OK" {
            let comment = payload
                .get("comment")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Err(TrackerError::Unavailable(format!(
                "Codeforces API returned {status}: {comment}"
            )));
        }
    }

    let Some(result) = payload.get("result").and_then(Value::as_array) else {
        warn!("Codeforces response has no result list; treating it as empty");
        return Ok(Vec::new());
    };

    let seen = result.len();
    let listings: Vec<ContestListing> = result
        .iter()
        .filter_map(|item| {
            let listing = listing_from(item);
            if listing.is_none() {
                warn!(id = ?item.get("id"), "dropping Codeforces contest without a start time");
            }
            listing
        })
        .collect();
    debug!(kept = listings.len(), seen, "Codeforces contests parsed");
    Ok(listings)
}

#[derive(Debug, Clone)]
pub struct CodeforcesContests {
    fetcher: Fetcher,
    api_base: String,
    max_attempts: u32,
}

impl CodeforcesContests {
    pub fn new(fetcher: Fetcher, api_base: &str) -> Self {
        Self {
            fetcher,
            api_base: api_base.trim_end_matches('/').to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn from_config(config: &TrackerConfig, fetcher: Fetcher) -> Self {
        let mut source = Self::new(fetcher, &config.endpoints.codeforces);
        source.max_attempts = config.max_attempts;
        source
    }

    fn contest_list_url(&self) -> String {
        format!("{}/api/contest.list", self.api_base)
    }
}

#[async_trait]
impl ContestSource for CodeforcesContests {
    fn platform(&self) -> Platform {
        Platform::Codeforces
    }

    async fn fetch_contests(&self) -> Result<Vec<ContestListing>> {
        let options = FetchOptions::json().with_max_attempts(self.max_attempts);
        let payload = self
            .fetcher
            .fetch_json(&self.contest_list_url(), &options)
            .await?;
        parse_contest_list(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_listing_from_contest() {
        let listing = listing_from(&json!({
            "id": 1990,
            "name": "Codeforces Round 960 (Div. 2)",
            "type": "CF",
            "phase": "BEFORE",
            "durationSeconds": 7200,
            "startTimeSeconds": 1721745300
        }))
        .unwrap();

        assert_eq!(listing.start_time, 1_721_745_300_000);
        assert_eq!(listing.end_time, 1_721_752_500_000);
        assert_eq!(listing.duration_minutes, 120);
        assert_eq!(listing.url, "https://codeforces.com/contest/1990");
    }

    #[test]
    fn test_contest_without_start_is_dropped() {
        let listings = parse_contest_list(json!({
            "status": "OK",
            "result": [
                {"id": 1, "name": "Gym", "durationSeconds": 60},
                {"id": 2, "name": "Round", "durationSeconds": 60, "startTimeSeconds": 0}
            ]
        }))
        .unwrap();

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].name, "Round");
        assert_eq!(listings[0].duration_minutes, 1);
    }

    #[test]
    fn test_failed_status_is_an_error() {
        let err = parse_contest_list(json!({"status": "FAILED", "comment": "Call limit exceeded"}))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(err.to_string().contains("Call limit exceeded"));
    }

    #[test]
    fn test_unexpected_shape_reads_as_empty() {
        assert!(parse_contest_list(json!([1, 2])).unwrap().is_empty());
        assert!(parse_contest_list(json!({"status": "OK", "result": {"id": 1}}))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_url_building() {
        let fetcher = Fetcher::new(Default::default()).unwrap();
        let source = CodeforcesContests::new(fetcher, "http://cf.test/");
        assert_eq!(source.contest_list_url(), "http://cf.test/api/contest.list");
        assert_eq!(source.platform(), Platform::Codeforces);
    }
}
