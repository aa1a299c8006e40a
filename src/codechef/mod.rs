//! CodeChef profile scraping and per-user analysis.

pub mod analysis;
pub mod client;
pub mod contest_graph;
pub mod heatmap;
pub mod profile;
pub mod types;

pub use client::CodeChefClient;
pub use types::{
    Analysis, AnalysisReport, AnalysisSummary, ContestGraphRecord, ContestHistoryEntry,
    HeatmapDay, HeatmapRecord, ProfileRecord, Ranks, Strengths,
};
