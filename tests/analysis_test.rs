//! Integration tests for the CodeChef profile pipeline through the facade

use std::time::Duration;

use cp_tracker::{
    core::http::{Fetcher, RetryPolicy},
    Endpoints, ErrorKind, Tracker, TrackerConfig, Username,
};
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const PROFILE_PAGE: &str = r#"
<html><head>
<script>
  var all_rating = [
    {"code": "START140", "name": "Starters 140", "rating": "1480", "rank": "2200", "end_date": "2024-06-12 22:00:00"},
    {"code": "START141", "name": "Starters 141", "rating": "1555", "rank": "980", "end_date": "2024-06-19 22:00:00"}
  ];
</script>
</head><body>
  <div class="user-details-container">
    <img src="https://cdn.codechef.com/a.png">
    <h1 class="h2-style">Chef</h1>
  </div>
  <div class="rating-header">
    <div class="rating-number">1555</div>
    <span class="rating">★★</span>
    <small>(Highest Rating 1555)</small>
  </div>
  <div class="rating-ranks"><ul class="inline-list">
    <li><strong>30211</strong></li><li><strong>12001</strong></li>
  </ul></div>
  <section><h3>Total Problems Solved: 64</h3></section>
</body></html>
"#;

fn tracker_for(server: &MockServer) -> Tracker {
    let config = TrackerConfig {
        endpoints: Endpoints::all_at(&server.uri()),
        retry: RetryPolicy {
            timeout: Duration::from_secs(2),
            backoff_unit: Duration::ZERO,
        },
        max_attempts: 3,
    };
    Tracker::with_fetcher(&config, Fetcher::new(config.retry).unwrap())
}

async fn mount_profile(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/chef"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PROFILE_PAGE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_analysis() {
    let server = MockServer::start().await;
    mount_profile(&server).await;
    Mock::given(method("GET"))
        .and(path("/handle/chef"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "heatMap": [
                {"date": "2024-06-01", "value": 4},
                {"date": "2024-06-02", "value": "2"},
                {"date": "2024-06-03", "value": 0}
            ]
        })))
        .mount(&server)
        .await;

    let user = Username::new("chef").unwrap();
    let report = tracker_for(&server).get_analysis(&user).await.unwrap();

    assert_eq!(report.profile_info.display_name, "Chef");
    assert_eq!(report.profile_info.star_count, 2);
    assert_eq!(report.submission_heatmap.total_submissions, 6);

    let summary = &report.analysis.summary;
    assert_eq!(summary.total_problems_solved, 64);
    assert_eq!(summary.active_days, 2);
    assert_eq!(summary.activity_rate, "0.01");
    assert_eq!(summary.contests_participated, 2);
    assert_eq!(summary.highest_rating, 1555);
    assert_eq!(summary.best_rank, 980);
    assert_eq!(summary.rating_trend, 75);

    let wire = serde_json::to_value(&report).unwrap();
    assert_eq!(wire["analysis"]["summary"]["bestRank"], 980);
    assert_eq!(wire["contestGraph"]["bestRank"], 980);
    assert_eq!(wire["submissionHeatmap"]["activeDays"], 2);
    assert_eq!(wire["profileInfo"]["problemsSolved"], 64);
}

#[tokio::test]
async fn test_heatmap_endpoint_down_still_analyzes() {
    let server = MockServer::start().await;
    mount_profile(&server).await;
    Mock::given(method("GET"))
        .and(path("/handle/chef"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let user = Username::new("chef").unwrap();
    let report = tracker_for(&server).get_analysis(&user).await.unwrap();

    assert_eq!(report.analysis.summary.active_days, 0);
    assert_eq!(report.analysis.summary.contests_participated, 2);
}

#[tokio::test]
async fn test_unknown_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tracker = tracker_for(&server);
    let user = Username::new("nobody").unwrap();

    let err = tracker.get_profile(&user).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = tracker.get_analysis(&user).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = tracker.get_contest_graph(&user).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);

    let heatmap = tracker.get_heatmap(&user).await;
    assert_eq!(heatmap.active_days, 0);
    assert!(heatmap.heatmap_data.is_empty());
}

#[test]
fn test_empty_username_rejected_before_any_request() {
    assert!(Username::new("").is_err());
    assert!(Username::new("   ").is_err());
}

#[test]
fn test_dot_segment_usernames_rejected_before_any_request() {
    assert!(Username::new(".").is_err());
    assert!(Username::new("..").is_err());
    assert!(Username::new(" .. ").is_err());
}
