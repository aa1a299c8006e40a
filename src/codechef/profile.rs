//! Profile page scraping.
//!
//! The page layout differs between account vintages and carries no version
//! marker, so the problems-solved count is read through an ordered list of
//! independent strategies.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::{
    client::CodeChefClient,
    types::{ProfileRecord, Ranks, MAX_STARS},
};
use crate::{cli::types::Username, ErrorKind, Result, TrackerError};


pub const NOT_FOUND_MESSAGE: &str = "User not found on CodeChef";
const TIMEOUT_MESSAGE: &str = "CodeChef took too long to respond. Please try again.";
const RATE_LIMITED_MESSAGE: &str =
    "CodeChef is temporarily limiting requests. Please try again in a few minutes.";
const UNAVAILABLE_MESSAGE: &str =
    "Unable to fetch profile from CodeChef. Please verify the username and try again.";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static RATING_NUMBER: Lazy<Selector> = Lazy::new(|| selector(".rating-number"));
static DISPLAY_NAME: Lazy<Selector> = Lazy::new(|| selector(".h2-style"));
static AVATAR: Lazy<Selector> = Lazy::new(|| selector(".user-details-container img"));
static RATING_HEADER: Lazy<Selector> = Lazy::new(|| selector(".rating-header"));
static HIGHEST_RATING: Lazy<Selector> = Lazy::new(|| selector(".rating-header small"));
static RANKS: Lazy<Selector> = Lazy::new(|| selector(".rating-ranks .inline-list strong"));
static H5: Lazy<Selector> = Lazy::new(|| selector("h5"));
static BODY: Lazy<Selector> = Lazy::new(|| selector("body"));
static STATUS_LINKS: Lazy<Selector> = Lazy::new(|| selector(r#"a[href*="/status/"]"#));

static FIRST_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("static regex"));
static STARS: Lazy<Regex> = Lazy::new(|| Regex::new("★+").expect("static regex"));
static TOTAL_SOLVED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Total Problems Solved:\s*(\d+)").expect("static regex")
});

/// A pure strategy over the parsed page; 0 means "no answer".
pub type SolvedTier = fn(&Html) -> u32;

/// Problems-solved strategies in priority order. The first non-zero result wins.
pub const PROBLEMS_SOLVED_TIERS: &[(&str, SolvedTier)] = &[
    ("fully_solved_heading", fully_solved_heading),
    ("total_problems_text", total_problems_text),
    ("status_link_count", status_link_count),
];

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first_text(doc: &Html, sel: &Selector) -> String {
    doc.select(sel).next().map(element_text).unwrap_or_default()
}

fn first_int(text: &str) -> Option<u32> {
    FIRST_INT.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Integer in the element following a "Fully Solved" `h5` heading.
pub fn fully_solved_heading(doc: &Html) -> u32 {
    doc.select(&H5)
        .filter(|h| element_text(*h).contains("Fully Solved"))
        .find_map(|h| {
            h.next_siblings()
                .find_map(ElementRef::wrap)
                .and_then(|next| first_int(&element_text(next)))
        })
        .unwrap_or(0)
}

/// "Total Problems Solved: N" anywhere in the page text.
pub fn total_problems_text(doc: &Html) -> u32 {
    let text: String = match doc.select(&BODY).next() {
        Some(body) => body.text().collect(),
        None => doc.root_element().text().collect(),
    };
    TOTAL_SOLVED
        .captures(&text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Number of links into submission status pages.
pub fn status_link_count(doc: &Html) -> u32 {
    doc.select(&STATUS_LINKS).count() as u32
}

/// Run the tiers in order over one parsed page.
pub fn problems_solved(doc: &Html) -> u32 {
    for (name, tier) in PROBLEMS_SOLVED_TIERS {
        let solved = tier(doc);
        if solved > 0 {
            debug!(tier = name, solved, "problems solved resolved");
            return solved;
        }
    }
    0
}

fn star_count(doc: &Html) -> u8 {
    let header = first_text(doc, &RATING_HEADER);
    let stars = STARS
        .find(&header)
        .map(|m| m.as_str().chars().count())
        .unwrap_or(0);
    stars.min(MAX_STARS as usize) as u8
}

/// Extract a profile record from a page. Missing fragments become empty/zero fields.
pub fn parse_profile(html: &str, username: &str) -> ProfileRecord {
    let doc = Html::parse_document(html);

    let mut ranks = doc.select(&RANKS).map(element_text);
    let global = ranks.next().unwrap_or_default();
    let country = ranks.next().unwrap_or_default();

    ProfileRecord {
        username: username.to_string(),
        display_name: first_text(&doc, &DISPLAY_NAME),
        avatar_url: doc
            .select(&AVATAR)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string),
        rating_text: first_text(&doc, &RATING_NUMBER),
        star_count: star_count(&doc),
        highest_rating: first_int(&first_text(&doc, &HIGHEST_RATING)).unwrap_or(0),
        ranks: Ranks { global, country },
        problems_solved: problems_solved(&doc),
    }
}

/// Turn a raw fetch failure into the profile error taxonomy.
pub fn classify_profile_error(err: TrackerError) -> TrackerError {
    match err.kind() {
        ErrorKind::NotFound => TrackerError::NotFound(NOT_FOUND_MESSAGE.to_string()),
        ErrorKind::Timeout => TrackerError::Timeout(TIMEOUT_MESSAGE.to_string()),
        ErrorKind::RateLimited => TrackerError::RateLimited(RATE_LIMITED_MESSAGE.to_string()),
        ErrorKind::Unavailable | ErrorKind::ParseFailure => {
            TrackerError::Unavailable(UNAVAILABLE_MESSAGE.to_string())
        }
    }
}

impl CodeChefClient {
    /// Scrape a user's profile page.
    pub async fn get_profile(&self, username: &Username) -> Result<ProfileRecord> {
        match self.fetch_profile_html(username).await {
            Ok(html) => Ok(parse_profile(&html, username.as_str())),
            Err(e) => {
                warn!(%username, error = %e, "profile extraction failed");
                Err(classify_profile_error(e))
            }
        }
    }
}
