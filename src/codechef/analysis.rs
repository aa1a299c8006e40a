//! Per-user analysis over profile, heatmap and contest graph.

use tracing::{debug, warn};

use super::{
    client::CodeChefClient,
    profile::NOT_FOUND_MESSAGE,
    types::{
        Analysis, AnalysisReport, AnalysisSummary, ContestGraphRecord, HeatmapRecord,
        ProfileRecord, Strengths,
    },
};
use crate::{
    cli::types::Username,
    core::join::{settle_all, settle_or_else},
    ErrorKind, Result, TrackerError,
};

#[cfg(test)]
mod tests;

const DAYS_PER_YEAR: f64 = 365.0;
const DEFAULT_CATEGORY: &str = "General";

/// Map a profile failure onto the two kinds the analysis path reports.
pub fn classify_analysis_error(err: TrackerError) -> TrackerError {
    let message = err.to_string();
    let lowered = message.to_lowercase();
    if err.kind() == ErrorKind::NotFound || lowered.contains("404") || lowered.contains("not found")
    {
        TrackerError::NotFound(NOT_FOUND_MESSAGE.to_string())
    } else {
        TrackerError::Unavailable(message)
    }
}

pub fn summarize(
    profile: &ProfileRecord,
    heatmap: &HeatmapRecord,
    graph: &ContestGraphRecord,
) -> AnalysisSummary {
    AnalysisSummary {
        total_problems_solved: profile.problems_solved,
        active_days: heatmap.active_days,
        activity_rate: format!("{:.2}", f64::from(heatmap.active_days) / DAYS_PER_YEAR),
        contests_participated: graph.contests_participated,
        highest_rating: graph.highest_rating,
        best_rank: graph.best_rank.unwrap_or(0),
        rating_trend: graph.rating_trend(),
    }
}

/// Assemble the report from already fetched parts.
pub fn compose(
    username: &str,
    profile: ProfileRecord,
    heatmap: HeatmapRecord,
    graph: ContestGraphRecord,
) -> AnalysisReport {
    let summary = summarize(&profile, &heatmap, &graph);
    let strengths = Strengths {
        strongest_category: DEFAULT_CATEGORY.to_string(),
        problems_solved_in_category: summary.total_problems_solved,
    };

    AnalysisReport {
        analysis: Analysis {
            username: username.to_string(),
            summary,
            strengths,
        },
        profile_info: profile,
        submission_heatmap: heatmap,
        contest_graph: graph,
    }
}

impl CodeChefClient {
    /// Profile is required; the heatmap and contest graph degrade to their zero values.
    pub async fn get_analysis(&self, username: &Username) -> Result<AnalysisReport> {
        let (profile, heatmap, graph) = tokio::join!(
            self.get_profile(username),
            self.get_heatmap(username),
            settle_or_else(self.get_contest_graph(username), |_| {
                ContestGraphRecord::default()
            }),
        );

        let profile = profile.map_err(|e| {
            warn!(%username, error = %e, "analysis aborted, profile unavailable");
            classify_analysis_error(e)
        })?;
        debug!(%username, "analysis inputs gathered");

        Ok(compose(username.as_str(), profile, heatmap, graph))
    }

    /// Analyze several users; each result stands on its own.
    pub async fn analyze_many(
        &self,
        usernames: &[Username],
    ) -> Vec<(Username, Result<AnalysisReport>)> {
        let results = settle_all(usernames.iter().map(|u| self.get_analysis(u))).await;
        usernames.iter().cloned().zip(results).collect()
    }
}
