//! One-stop facade over the CodeChef client and the contest aggregator.

use chrono::Utc;

use crate::{
    cli::types::Username,
    codechef::{
        AnalysisReport, CodeChefClient, ContestGraphRecord, HeatmapRecord, ProfileRecord,
    },
    config::TrackerConfig,
    contests::{ContestAggregator, NormalizedContest},
    core::http::Fetcher,
    Result,
};

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug)]
pub struct Tracker {
    codechef: CodeChefClient,
    contests: ContestAggregator,
}

impl Tracker {
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        Ok(Self::with_fetcher(config, Fetcher::new(config.retry)?))
    }

    /// Read [`TrackerConfig`] from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(&TrackerConfig::from_env()?)
    }

    pub fn with_fetcher(config: &TrackerConfig, fetcher: Fetcher) -> Self {
        Self {
            codechef: CodeChefClient::from_config(config, fetcher.clone()),
            contests: ContestAggregator::from_config(config, fetcher),
        }
    }

    pub fn codechef(&self) -> &CodeChefClient {
        &self.codechef
    }

    pub fn contests(&self) -> &ContestAggregator {
        &self.contests
    }

    pub async fn get_profile(&self, username: &Username) -> Result<ProfileRecord> {
        self.codechef.get_profile(username).await
    }

    pub async fn get_heatmap(&self, username: &Username) -> HeatmapRecord {
        self.codechef.get_heatmap(username).await
    }

    pub async fn get_contest_graph(&self, username: &Username) -> Result<ContestGraphRecord> {
        self.codechef.get_contest_graph(username).await
    }

    pub async fn get_analysis(&self, username: &Username) -> Result<AnalysisReport> {
        self.codechef.get_analysis(username).await
    }

    pub async fn analyze_many(
        &self,
        usernames: &[Username],
    ) -> Vec<(Username, Result<AnalysisReport>)> {
        self.codechef.analyze_many(usernames).await
    }

    /// Every contest, with status as of now.
    pub async fn get_all_contests(&self) -> Result<Vec<NormalizedContest>> {
        self.contests.fetch_all_contests(now_ms()).await
    }

    /// Upcoming and ongoing contests as of now.
    pub async fn get_upcoming_contests(&self) -> Result<Vec<NormalizedContest>> {
        self.contests.upcoming_contests(now_ms()).await
    }
}
