//! Competitive Programming Tracker Library
//!
//! Scrapes CodeChef profiles and merges contest calendars from CodeChef, Codeforces
//! and LeetCode into one normalized shape, tolerating upstream failures where a
//! degraded answer is still useful.
//!
//! ## Features
//!
//! - **Profile Extraction**: Rating, stars, ranks and problems solved from profile pages
//! - **Submission Heatmap**: JSON endpoint first, embedded page data as fallback
//! - **Contest Graph**: Rated-contest history parsed from the profile page as data
//! - **Analysis**: Per-user summary that survives a missing heatmap or contest graph
//! - **Contest Calendar**: All three platforms merged, sorted and labelled with status
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cp_tracker::{Tracker, TrackerConfig, Username};
//!
//! # async fn example() -> cp_tracker::Result<()> {
//! let tracker = Tracker::new(&TrackerConfig::default())?;
//! let user = Username::new("gennady.korotkevich")?;
//!
//! let report = tracker.get_analysis(&user).await?;
//! println!("{} solved", report.analysis.summary.total_problems_solved);
//!
//! for contest in tracker.get_upcoming_contests().await? {
//!     println!("{} ({})", contest.name, contest.platform);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Upstream locations and retry timing can be overridden:
//! ```bash
//! export CP_TRACKER_TIMEOUT_SECS=30
//! export CP_TRACKER_MAX_ATTEMPTS=5
//! ```

pub mod cli;
pub mod codechef;
pub mod commands;
pub mod config;
pub mod contests;
pub mod core;
pub mod error;
pub mod tracker;

// Re-export commonly used types
pub use cli::types::Username;
pub use codechef::{
    AnalysisReport, AnalysisSummary, CodeChefClient, ContestGraphRecord, HeatmapRecord,
    ProfileRecord,
};
pub use config::{Endpoints, TrackerConfig};
pub use contests::{ContestAggregator, ContestStatus, NormalizedContest, Platform};
pub use error::{ErrorKind, Result, TrackerError};
pub use tracker::Tracker;

/// Log filter directives for the binary, e.g. `cp_tracker=debug`.
pub const LOG_ENV_VAR: &str = "CP_TRACKER_LOG";
