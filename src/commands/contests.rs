//! Contest calendar command implementation

use chrono::{TimeZone, Utc};

use super::print_json;
use crate::{
    contests::{NormalizedContest, Platform},
    Result, Tracker,
};

/// Keep contests from the given platforms; `None` keeps everything.
pub fn filter_platforms(
    contests: Vec<NormalizedContest>,
    platforms: Option<&[Platform]>,
) -> Vec<NormalizedContest> {
    match platforms {
        Some(wanted) if !wanted.is_empty() => contests
            .into_iter()
            .filter(|c| wanted.contains(&c.platform))
            .collect(),
        _ => contests,
    }
}

pub fn render_contest(contest: &NormalizedContest) -> String {
    let start = Utc
        .timestamp_millis_opt(contest.start_time)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| contest.start_time.to_string());
    format!(
        "[{:<9}] {:<10} {} ({}) {} {}",
        contest.status.to_string(),
        contest.platform.to_string(),
        start,
        contest.duration,
        contest.name,
        contest.url
    )
}

/// Handle the contests command
pub async fn handle_contests(
    tracker: &Tracker,
    upcoming: bool,
    platforms: Option<&[Platform]>,
    as_json: bool,
) -> Result<()> {
    let contests = if upcoming {
        tracker.get_upcoming_contests().await?
    } else {
        tracker.get_all_contests().await?
    };
    let contests = filter_platforms(contests, platforms);

    if as_json {
        print_json(&contests)
    } else {
        for contest in &contests {
            println!("{}", render_contest(contest)); // tarpaulin::skip
        }
        Ok(())
    }
}
