//! Runtime configuration read from the environment.
//!
//! Every upstream base URL can be redirected (mirrors, test servers) and the
//! fetcher timing can be tuned without recompiling.

use std::{str::FromStr, time::Duration};

use crate::{
    core::http::{RetryPolicy, DEFAULT_BACKOFF_UNIT, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT},
    Result, TrackerError,
};

pub const CODECHEF_URL_ENV_VAR: &str = "CP_TRACKER_CODECHEF_URL";
pub const CODECHEF_API_URL_ENV_VAR: &str = "CP_TRACKER_CODECHEF_API_URL";
pub const CODEFORCES_URL_ENV_VAR: &str = "CP_TRACKER_CODEFORCES_URL";
pub const LEETCODE_URL_ENV_VAR: &str = "CP_TRACKER_LEETCODE_URL";
pub const TIMEOUT_ENV_VAR: &str = "CP_TRACKER_TIMEOUT_SECS";
pub const BACKOFF_ENV_VAR: &str = "CP_TRACKER_BACKOFF_MS";
pub const MAX_ATTEMPTS_ENV_VAR: &str = "CP_TRACKER_MAX_ATTEMPTS";

pub const CODECHEF_BASE_URL: &str = "https://www.codechef.com";
pub const CODECHEF_API_BASE_URL: &str = "https://codechef-api.vercel.app";
pub const CODEFORCES_BASE_URL: &str = "https://codeforces.com";
pub const LEETCODE_BASE_URL: &str = "https://leetcode.com";

/// Upstream locations for every source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// CodeChef site: profile pages and the contest list.
    pub codechef: String,
    /// Third-party CodeChef JSON API used for heatmaps.
    pub codechef_api: String,
    pub codeforces: String,
    pub leetcode: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            codechef: CODECHEF_BASE_URL.to_string(),
            codechef_api: CODECHEF_API_BASE_URL.to_string(),
            codeforces: CODEFORCES_BASE_URL.to_string(),
            leetcode: LEETCODE_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every source at one server, e.g. a mock.
    pub fn all_at(base: &str) -> Self {
        Self {
            codechef: base.to_string(),
            codechef_api: base.to_string(),
            codeforces: base.to_string(),
            leetcode: base.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub endpoints: Endpoints,
    pub retry: RetryPolicy,
    pub max_attempts: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            retry: RetryPolicy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl TrackerConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = |var: &str, default: &str| {
            lookup(var)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let endpoints = Endpoints {
            codechef: url(CODECHEF_URL_ENV_VAR, CODECHEF_BASE_URL),
            codechef_api: url(CODECHEF_API_URL_ENV_VAR, CODECHEF_API_BASE_URL),
            codeforces: url(CODEFORCES_URL_ENV_VAR, CODEFORCES_BASE_URL),
            leetcode: url(LEETCODE_URL_ENV_VAR, LEETCODE_BASE_URL),
        };

        let timeout_secs: u64 = parse_var(&lookup, TIMEOUT_ENV_VAR, DEFAULT_TIMEOUT.as_secs())?;
        let backoff_ms: u64 = parse_var(
            &lookup,
            BACKOFF_ENV_VAR,
            DEFAULT_BACKOFF_UNIT.as_millis() as u64,
        )?;
        let max_attempts: u32 = parse_var(&lookup, MAX_ATTEMPTS_ENV_VAR, DEFAULT_MAX_ATTEMPTS)?;
        if max_attempts == 0 {
            return Err(TrackerError::InvalidConfig {
                var: MAX_ATTEMPTS_ENV_VAR.to_string(),
                value: "0".to_string(),
            });
        }

        Ok(Self {
            endpoints,
            retry: RetryPolicy {
                timeout: Duration::from_secs(timeout_secs),
                backoff_unit: Duration::from_millis(backoff_ms),
            },
            max_attempts,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| TrackerError::InvalidConfig {
                var: var.to_string(),
                value: raw,
            }),
    }
}
