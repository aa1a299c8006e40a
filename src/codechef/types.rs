use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};


/// Highest star band shown on a profile.
pub const MAX_STARS: u8 = 7;

/// Global and country rank strings, exactly as rendered upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranks {
    pub global: String,
    pub country: String,
}

/// Scraped profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    /// Current rating as displayed, e.g. `"1834"` or `"1834?"` for provisional ratings.
    pub rating_text: String,
    pub star_count: u8,
    pub highest_rating: u32,
    pub ranks: Ranks,
    pub problems_solved: u32,
}

/// One calendar day of submission activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: u32,
}

/// Daily submission activity. `Default` is the degraded zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRecord {
    pub active_days: u32,
    pub total_submissions: u64,
    pub heatmap_data: Vec<HeatmapDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestHistoryEntry {
    pub contest_code: String,
    pub contest_name: String,
    pub rating: i64,
    pub rank: u32,
    pub date: NaiveDate,
}

/// Rated-contest history plus aggregates.
///
/// `best_rank` is `None` when there is no history; it serializes as `0` so the
/// absence never leaks out as an unbounded value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestGraphRecord {
    pub contests_participated: u32,
    pub highest_rating: i64,
    #[serde(
        serialize_with = "ser_rank_or_zero",
        deserialize_with = "de_rank_or_zero",
        default
    )]
    pub best_rank: Option<u32>,
    /// In upstream order, which is not guaranteed to be chronological.
    pub contest_history: Vec<ContestHistoryEntry>,
}

impl ContestGraphRecord {
    /// Aggregate a history list.
    pub fn from_history(contest_history: Vec<ContestHistoryEntry>) -> Self {
        Self {
            contests_participated: contest_history.len() as u32,
            highest_rating: contest_history.iter().map(|c| c.rating).max().unwrap_or(0),
            best_rank: contest_history.iter().map(|c| c.rank).min(),
            contest_history,
        }
    }

    /// Rating change from the first to the last listed contest; 0 with fewer than two.
    pub fn rating_trend(&self) -> i64 {
        match (self.contest_history.first(), self.contest_history.last()) {
            (Some(first), Some(last)) if self.contest_history.len() >= 2 => {
                last.rating - first.rating
            }
            _ => 0,
        }
    }
}

fn ser_rank_or_zero<S>(rank: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u32(rank.unwrap_or(0))
}

fn de_rank_or_zero<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<u32> = Deserialize::deserialize(deserializer)?;
    Ok(raw.filter(|r| *r > 0))
}

/// Derived per-user numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_problems_solved: u32,
    pub active_days: u32,
    /// `active_days / 365` with two decimals.
    pub activity_rate: String,
    pub contests_participated: u32,
    pub highest_rating: i64,
    /// 0 when the user has no rated contests.
    pub best_rank: u32,
    pub rating_trend: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strengths {
    pub strongest_category: String,
    pub problems_solved_in_category: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub username: String,
    pub summary: AnalysisSummary,
    pub strengths: Strengths,
}

/// Everything the analysis view needs for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub profile_info: ProfileRecord,
    pub analysis: Analysis,
    pub submission_heatmap: HeatmapRecord,
    pub contest_graph: ContestGraphRecord,
}
