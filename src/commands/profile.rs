//! Single-user CodeChef commands: profile, heatmap, contest graph

use super::print_json;
use crate::{
    codechef::{ContestGraphRecord, HeatmapRecord, ProfileRecord},
    Result, Tracker, Username,
};

pub fn render_profile(profile: &ProfileRecord) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({}) {}★ rating {} (highest {})",
        profile.display_name,
        profile.username,
        profile.star_count,
        profile.rating_text,
        profile.highest_rating
    )];
    lines.push(format!(
        "ranks: global {} / country {}",
        or_dash(&profile.ranks.global),
        or_dash(&profile.ranks.country)
    ));
    lines.push(format!("problems solved: {}", profile.problems_solved));
    lines
}

pub fn render_heatmap(heatmap: &HeatmapRecord) -> Vec<String> {
    let mut lines = vec![format!(
        "{} active days, {} submissions",
        heatmap.active_days, heatmap.total_submissions
    )];
    lines.extend(
        heatmap
            .heatmap_data
            .iter()
            .filter(|d| d.count > 0)
            .map(|d| format!("{} {}", d.date, d.count)),
    );
    lines
}

pub fn render_contest_graph(graph: &ContestGraphRecord) -> Vec<String> {
    let best_rank = graph
        .best_rank
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut lines = vec![format!(
        "{} rated contests, highest rating {}, best rank {}",
        graph.contests_participated, graph.highest_rating, best_rank
    )];
    lines.extend(graph.contest_history.iter().map(|c| {
        format!(
            "{} {:<12} rating {:>5} rank {:>6}  {}",
            c.date, c.contest_code, c.rating, c.rank, c.contest_name
        )
    }));
    lines
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}"); // tarpaulin::skip
    }
}

/// Handle the profile command
pub async fn handle_profile(tracker: &Tracker, username: &Username, as_json: bool) -> Result<()> {
    let profile = tracker.get_profile(username).await?;
    if as_json {
        print_json(&profile)
    } else {
        print_lines(render_profile(&profile));
        Ok(())
    }
}

/// Handle the heatmap command
pub async fn handle_heatmap(tracker: &Tracker, username: &Username, as_json: bool) -> Result<()> {
    let heatmap = tracker.get_heatmap(username).await;
    if as_json {
        print_json(&heatmap)
    } else {
        print_lines(render_heatmap(&heatmap));
        Ok(())
    }
}

/// Handle the contest graph command
pub async fn handle_contest_graph(
    tracker: &Tracker,
    username: &Username,
    as_json: bool,
) -> Result<()> {
    let graph = tracker.get_contest_graph(username).await?;
    if as_json {
        print_json(&graph)
    } else {
        print_lines(render_contest_graph(&graph));
        Ok(())
    }
}
