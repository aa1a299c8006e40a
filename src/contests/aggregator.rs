//! All-or-nothing contest feed across every platform source.

use tracing::{debug, warn};

use super::{
    codechef::CodeChefContests, codeforces::CodeforcesContests, leetcode::LeetCodeContests,
    ContestListing, ContestSource, NormalizedContest, Platform,
};
use crate::{
    codechef::CodeChefClient,
    config::TrackerConfig,
    core::{http::Fetcher, join::join_all_or_fail},
    Result,
};


/// Evaluate listings at one instant and order them by start time.
///
/// The sort is stable, so contests starting together keep their input order.
pub fn normalize_all(listings: Vec<ContestListing>, now_ms: i64) -> Vec<NormalizedContest> {
    let mut contests: Vec<NormalizedContest> = listings.iter().map(|l| l.at(now_ms)).collect();
    contests.sort_by_key(|c| c.start_time);
    contests
}

pub struct ContestAggregator {
    sources: Vec<Box<dyn ContestSource>>,
}

impl std::fmt::Debug for ContestAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContestAggregator")
            .field("sources", &self.platforms())
            .finish()
    }
}

impl ContestAggregator {
    /// Sources are concatenated in the order given.
    pub fn new(sources: Vec<Box<dyn ContestSource>>) -> Self {
        Self { sources }
    }

    /// Codeforces, CodeChef, LeetCode.
    pub fn from_config(config: &TrackerConfig, fetcher: Fetcher) -> Self {
        Self::new(vec![
            Box::new(CodeforcesContests::from_config(config, fetcher.clone())),
            Box::new(CodeChefContests::new(CodeChefClient::from_config(
                config,
                fetcher.clone(),
            ))),
            Box::new(LeetCodeContests::from_config(config, fetcher)),
        ])
    }

    pub fn platforms(&self) -> Vec<Platform> {
        self.sources.iter().map(|s| s.platform()).collect()
    }

    /// Every contest from every source, with status as of `now_ms`.
    ///
    /// Fails if any source fails. Sources still in flight are awaited, not cancelled.
    pub async fn fetch_all_contests(&self, now_ms: i64) -> Result<Vec<NormalizedContest>> {
        let feeds = join_all_or_fail(self.sources.iter().map(|source| async move {
            source.fetch_contests().await.map_err(|e| {
                warn!(platform = %source.platform(), error = %e, "contest source failed");
                e
            })
        }))
        .await?;

        let listings: Vec<ContestListing> = feeds.into_iter().flatten().collect();
        debug!(total = listings.len(), "contest feeds merged");
        Ok(normalize_all(listings, now_ms))
    }

    /// Contests that have not finished as of `now_ms`.
    pub async fn upcoming_contests(&self, now_ms: i64) -> Result<Vec<NormalizedContest>> {
        let mut contests = self.fetch_all_contests(now_ms).await?;
        contests.retain(|c| c.status.is_open());
        Ok(contests)
    }
}
