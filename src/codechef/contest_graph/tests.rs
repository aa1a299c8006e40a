use super::*;
use crate::{
    core::http::{Fetcher, RetryPolicy},
    ErrorKind,
};
use chrono::NaiveDate;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const PROFILE_WITH_GRAPH: &str = r#"
<html><head>
<script>var unrelated = [1, 2, 3];</script>
<script type="text/javascript">
  jQuery(document).ready(function() {});
  var all_rating = [
    {'code': 'START101', 'name': 'Starters 101', 'rating': '1520', 'rank': '812', 'end_date': '2023-08-02 22:00:00', 'penalised_in': null},
    {"code": "START102", "name": "Starters 102", "rating": 1611, "rank": 455, "end_date": "2023-08-09 22:00:00"},
    {"code": "BROKEN", "name": "No rank", "rating": 1700, "end_date": "2023-08-16 22:00:00"},
    {"code": "START104", "name": "Starters 104", "rating": 1580, "rank": 1200, "end_date": "2023-08-23 22:00:00"},
  ];
  var date_versus_rating = {};
</script>
</head><body></body></html>
"#;

fn client_for(server: &MockServer) -> CodeChefClient {
    let policy = RetryPolicy {
        timeout: Duration::from_secs(2),
        backoff_unit: Duration::ZERO,
    };
    CodeChefClient::new(Fetcher::new(policy).unwrap(), &server.uri(), &server.uri())
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_parse_graph_aggregates() {
        let graph = parse_contest_graph(PROFILE_WITH_GRAPH).unwrap();

        assert_eq!(graph.contests_participated, 3);
        assert_eq!(graph.highest_rating, 1611);
        assert_eq!(graph.best_rank, Some(455));
        assert_eq!(graph.rating_trend(), 60);

        let codes: Vec<&str> = graph
            .contest_history
            .iter()
            .map(|c| c.contest_code.as_str())
            .collect();
        assert_eq!(codes, vec!["START101", "START102", "START104"]);
        assert_eq!(
            graph.contest_history[0].date,
            NaiveDate::from_ymd_opt(2023, 8, 2).unwrap()
        );
        assert_eq!(graph.contest_history[0].rating, 1520);
    }

    #[test]
    fn test_empty_rating_array() {
        let html = "<script>var all_rating = [];</script>";
        let graph = parse_contest_graph(html).unwrap();

        assert_eq!(graph.contests_participated, 0);
        assert_eq!(graph.highest_rating, 0);
        assert_eq!(graph.best_rank, None);
        assert_eq!(serde_json::to_value(&graph).unwrap()["bestRank"], json!(0));
    }

    #[test]
    fn test_missing_script_is_parse_failure() {
        let err = parse_contest_graph("<html><script>var x = 1;</script></html>").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ParseFailure);
        assert_eq!(err.to_string(), EXTRACTION_FAILED_MESSAGE);
    }

    #[test]
    fn test_executable_literal_is_rejected() {
        let html = "<script>var all_rating = [alert(1)];</script>";
        let err = parse_contest_graph(html).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ParseFailure);
    }

    #[test]
    fn test_rating_arrays_from_every_script_are_concatenated() {
        let html = r#"
<script>var all_rating = [{"code": "START1", "rating": 1400, "rank": 900, "end_date": "2023-01-04 22:00:00"}];</script>
<script>var all_rating = [alert(1)];</script>
<script>
  var all_rating = [{"code": "START2", "rating": 1450, "rank": 700, "end_date": "2023-01-11 22:00:00"}];
</script>
"#;
        let graph = parse_contest_graph(html).unwrap();

        let codes: Vec<&str> = graph
            .contest_history
            .iter()
            .map(|c| c.contest_code.as_str())
            .collect();
        assert_eq!(codes, vec!["START1", "START2"]);
        assert_eq!(graph.contests_participated, 2);
        assert_eq!(graph.highest_rating, 1450);
        assert_eq!(graph.best_rank, Some(700));
    }

    #[test]
    fn test_history_entry_mapping() {
        let entry = history_entry(&json!({
            "code": 42, "rating": "1400", "rank": 3, "end_date": "2024-01-05"
        }))
        .unwrap();

        assert_eq!(entry.contest_code, "42");
        assert_eq!(entry.contest_name, "42");
        assert_eq!(entry.rank, 3);

        assert!(history_entry(&json!({"code": "A", "rating": 1, "rank": 0, "end_date": "2024-01-05"})).is_none());
        assert!(history_entry(&json!({"code": "A", "rating": 1, "rank": 2, "end_date": "soon"})).is_none());
        assert!(history_entry(&json!({"rating": 1, "rank": 2, "end_date": "2024-01-05"})).is_none());
    }
}

#[cfg(test)]
mod http_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_contest_graph() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/chef"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PROFILE_WITH_GRAPH))
            .mount(&server)
            .await;

        let graph = client_for(&server)
            .get_contest_graph(&Username::new("chef").unwrap())
            .await
            .unwrap();

        assert_eq!(graph.contests_participated, 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_parse_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_contest_graph(&Username::new("ghost").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ParseFailure);
        assert_eq!(err.to_string(), EXTRACTION_FAILED_MESSAGE);
    }
}
