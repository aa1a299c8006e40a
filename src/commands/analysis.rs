//! Analysis command implementation

use tracing::debug;

use super::{describe_error, print_json};
use crate::{codechef::AnalysisReport, Result, Tracker, TrackerError, Username};

pub fn render_report(report: &AnalysisReport) -> Vec<String> {
    let s = &report.analysis.summary;
    vec![
        format!("== {} ==", report.analysis.username),
        format!(
            "problems solved: {} | active days: {} (rate {})",
            s.total_problems_solved, s.active_days, s.activity_rate
        ),
        format!(
            "contests: {} | highest rating: {} | best rank: {} | trend: {:+}",
            s.contests_participated, s.highest_rating, s.best_rank, s.rating_trend
        ),
        format!(
            "strongest category: {} ({})",
            report.analysis.strengths.strongest_category,
            report.analysis.strengths.problems_solved_in_category
        ),
    ]
}

/// Handle the analysis command.
///
/// A single user's failure is returned as-is. With several users every report is
/// printed and failures are listed on stderr; the command fails if any user failed.
pub async fn handle_analysis(
    tracker: &Tracker,
    usernames: &[Username],
    as_json: bool,
) -> Result<()> {
    if let [username] = usernames {
        let report = tracker.get_analysis(username).await?;
        return if as_json {
            print_json(&report)
        } else {
            render_report(&report).iter().for_each(|l| println!("{l}")); // tarpaulin::skip
            Ok(())
        };
    }

    let results = tracker.analyze_many(usernames).await;
    let mut reports = Vec::new();
    let mut failed = 0usize;
    for (username, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                failed += 1;
                eprintln!("{username}: {}", describe_error(&e)); // tarpaulin::skip
            }
        }
    }
    debug!(ok = reports.len(), failed, "batch analysis finished");

    if as_json {
        print_json(&reports)?;
    } else {
        for report in &reports {
            render_report(report).iter().for_each(|l| println!("{l}")); // tarpaulin::skip
        }
    }

    if failed > 0 {
        return Err(TrackerError::Unavailable(format!(
            "{failed} of {} analyses failed",
            usernames.len()
        )));
    }
    Ok(())
}
