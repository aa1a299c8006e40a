use super::*;
use crate::codechef::types::{ContestHistoryEntry, HeatmapDay, Ranks};
use crate::core::http::{Fetcher, RetryPolicy};
use chrono::NaiveDate;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const PROFILE_PAGE: &str = r#"
<html><body>
  <h1 class="h2-style">Chef</h1>
  <div class="rating-number">1500</div>
  <h3>Total Problems Solved: 120</h3>
</body></html>
"#;

fn profile(solved: u32) -> ProfileRecord {
    ProfileRecord {
        username: "chef".to_string(),
        display_name: "Chef".to_string(),
        avatar_url: None,
        rating_text: "1500".to_string(),
        star_count: 2,
        highest_rating: 1600,
        ranks: Ranks::default(),
        problems_solved: solved,
    }
}

fn entry(code: &str, rating: i64, rank: u32) -> ContestHistoryEntry {
    ContestHistoryEntry {
        contest_code: code.to_string(),
        contest_name: code.to_string(),
        rating,
        rank,
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    }
}

fn client_for(server: &MockServer) -> CodeChefClient {
    let policy = RetryPolicy {
        timeout: Duration::from_secs(2),
        backoff_unit: Duration::ZERO,
    };
    CodeChefClient::new(Fetcher::new(policy).unwrap(), &server.uri(), &server.uri())
}

#[cfg(test)]
mod compose_tests {
    use super::*;

    #[test]
    fn test_summary_fields() {
        let heatmap = HeatmapRecord {
            active_days: 73,
            total_submissions: 200,
            heatmap_data: vec![HeatmapDay {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                count: 200,
            }],
        };
        let graph = ContestGraphRecord::from_history(vec![
            entry("A", 1400, 900),
            entry("B", 1700, 120),
            entry("C", 1550, 300),
        ]);

        let summary = summarize(&profile(88), &heatmap, &graph);

        assert_eq!(
            summary,
            AnalysisSummary {
                total_problems_solved: 88,
                active_days: 73,
                activity_rate: "0.20".to_string(),
                contests_participated: 3,
                highest_rating: 1700,
                best_rank: 120,
                rating_trend: 150,
            }
        );
    }

    #[test]
    fn test_zero_graph_summary() {
        let summary = summarize(
            &profile(5),
            &HeatmapRecord::default(),
            &ContestGraphRecord::default(),
        );

        assert_eq!(summary.activity_rate, "0.00");
        assert_eq!(summary.contests_participated, 0);
        assert_eq!(summary.highest_rating, 0);
        assert_eq!(summary.best_rank, 0);
        assert_eq!(summary.rating_trend, 0);
    }

    #[test]
    fn test_compose_strengths() {
        let report = compose(
            "chef",
            profile(42),
            HeatmapRecord::default(),
            ContestGraphRecord::default(),
        );

        assert_eq!(report.analysis.username, "chef");
        assert_eq!(report.analysis.strengths.strongest_category, "General");
        assert_eq!(report.analysis.strengths.problems_solved_in_category, 42);
        assert_eq!(report.profile_info.problems_solved, 42);
    }

    #[test]
    fn test_classify_analysis_error() {
        let not_found = classify_analysis_error(TrackerError::Unavailable(
            "upstream said 404".to_string(),
        ));
        assert!(matches!(not_found, TrackerError::NotFound(m) if m == NOT_FOUND_MESSAGE));

        let not_found = classify_analysis_error(TrackerError::Unavailable(
            "User Not Found".to_string(),
        ));
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let other = classify_analysis_error(TrackerError::RateLimited("slow down".to_string()));
        assert!(matches!(other, TrackerError::Unavailable(m) if m == "slow down"));
    }
}

#[cfg(test)]
mod http_tests {
    use super::*;

    #[tokio::test]
    async fn test_analysis_survives_contest_graph_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/chef"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PROFILE_PAGE))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/handle/chef"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "heatMap": [{"date": "2024-01-01", "value": 3}, {"date": "2024-01-02", "value": 0}]
            })))
            .mount(&server)
            .await;

        let report = client_for(&server)
            .get_analysis(&Username::new("chef").unwrap())
            .await
            .unwrap();

        let summary = &report.analysis.summary;
        assert_eq!(summary.total_problems_solved, 120);
        assert_eq!(summary.active_days, 1);
        assert_eq!(summary.contests_participated, 0);
        assert_eq!(summary.highest_rating, 0);
        assert_eq!(summary.best_rank, 0);
        assert_eq!(report.contest_graph, ContestGraphRecord::default());
    }

    #[tokio::test]
    async fn test_analysis_profile_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_analysis(&Username::new("ghost").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_analysis_profile_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_analysis(&Username::new("chef").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn test_analyze_many_keeps_each_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/chef"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PROFILE_PAGE))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/handle/chef"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let users = vec![
            Username::new("chef").unwrap(),
            Username::new("ghost").unwrap(),
        ];
        let results = client_for(&server).analyze_many(&users).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0.as_str(), "chef");
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].0.as_str(), "ghost");
        assert_eq!(
            results[1].1.as_ref().unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
