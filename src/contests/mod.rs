//! Contest listings from every platform in one canonical shape.

pub mod aggregator;
pub mod codechef;
pub mod codeforces;
pub mod leetcode;

use std::{fmt, str::FromStr};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

pub use aggregator::ContestAggregator;
pub use codechef::CodeChefContests;
pub use codeforces::CodeforcesContests;
pub use leetcode::LeetCodeContests;


pub const UNNAMED_CONTEST: &str = "Unnamed Contest";
pub const MISSING_URL: &str = "#";

const MS_PER_MINUTE: f64 = 60_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LeetCode,
    Codeforces,
    CodeChef,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Codeforces, Platform::CodeChef, Platform::LeetCode];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::LeetCode => "leetcode",
            Platform::Codeforces => "codeforces",
            Platform::CodeChef => "codechef",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leetcode" | "lc" => Ok(Platform::LeetCode),
            "codeforces" | "cf" => Ok(Platform::Codeforces),
            "codechef" | "cc" => Ok(Platform::CodeChef),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl ContestStatus {
    /// Status of the window `[start, end]` at `now`; both ends are inclusive.
    pub fn at(start_ms: i64, end_ms: i64, now_ms: i64) -> Self {
        if now_ms < start_ms {
            ContestStatus::Upcoming
        } else if now_ms <= end_ms {
            ContestStatus::Ongoing
        } else {
            ContestStatus::Completed
        }
    }

    /// Still worth showing in an upcoming feed.
    pub fn is_open(&self) -> bool {
        matches!(self, ContestStatus::Upcoming | ContestStatus::Ongoing)
    }
}

impl fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContestStatus::Upcoming => "upcoming",
            ContestStatus::Ongoing => "ongoing",
            ContestStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Duration of a contest in milliseconds.
///
/// `end - start` when both are known and ordered, else the upstream duration in
/// seconds when positive, else 0.
pub fn infer_duration_ms(start_ms: Option<i64>, end_ms: Option<i64>, fallback_secs: Option<f64>) -> i64 {
    if let (Some(start), Some(end)) = (start_ms, end_ms) {
        if end >= start {
            return end - start;
        }
    }
    match fallback_secs {
        Some(secs) if secs.is_finite() && secs > 0.0 => (secs * 1000.0).round() as i64,
        _ => 0,
    }
}

/// Resolve a contest's `(start, end)`. A missing start drops the record; a missing or
/// inverted end is rebuilt from the inferred duration.
pub fn resolve_window(
    start_ms: Option<i64>,
    end_ms: Option<i64>,
    fallback_secs: Option<f64>,
) -> Option<(i64, i64)> {
    let start = start_ms?;
    let end = match end_ms {
        Some(end) if end >= start => end,
        _ => start.checked_add(infer_duration_ms(Some(start), end_ms, fallback_secs))?,
    };
    Some((start, end))
}

pub fn duration_minutes(start_ms: i64, end_ms: i64) -> i64 {
    (((end_ms - start_ms) as f64) / MS_PER_MINUTE).round().max(0.0) as i64
}

/// Status-free contest record produced by each platform source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestListing {
    pub name: String,
    pub platform: Platform,
    pub start_time: i64,
    pub end_time: i64,
    pub duration_minutes: i64,
    pub url: String,
}

impl ContestListing {
    /// Build a listing, filling the name and URL defaults.
    pub fn new(
        platform: Platform,
        name: Option<String>,
        (start_time, end_time): (i64, i64),
        url: Option<String>,
    ) -> Self {
        Self {
            name: name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNNAMED_CONTEST.to_string()),
            platform,
            start_time,
            end_time,
            duration_minutes: duration_minutes(start_time, end_time),
            url: url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| MISSING_URL.to_string()),
        }
    }

    /// Attach the status as seen at `now_ms`.
    pub fn at(&self, now_ms: i64) -> NormalizedContest {
        NormalizedContest {
            name: self.name.clone(),
            platform: self.platform,
            start_time: self.start_time,
            end_time: self.end_time,
            duration_minutes: self.duration_minutes,
            duration: format!("{} minutes", self.duration_minutes),
            url: self.url.clone(),
            status: ContestStatus::at(self.start_time, self.end_time, now_ms),
        }
    }
}

/// A listing evaluated at one instant. Never stored: the status goes stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedContest {
    pub name: String,
    pub platform: Platform,
    pub start_time: i64,
    pub end_time: i64,
    pub duration_minutes: i64,
    /// Human-readable duration, e.g. `"120 minutes"`.
    pub duration: String,
    pub url: String,
    pub status: ContestStatus,
}

/// One platform's contest feed.
#[async_trait]
pub trait ContestSource: Send + Sync {
    fn platform(&self) -> Platform;

    /// Every contest the platform lists. Malformed records are dropped and a wrong-shaped
    /// payload reads as empty; transport failures and explicit upstream failures are errors.
    async fn fetch_contests(&self) -> Result<Vec<ContestListing>>;
}
