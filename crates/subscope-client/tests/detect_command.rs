mod support;

use serde_json::Value;
use subscope_client::commands::detect::{self, DetectRunOptions};
use support::detect_testkit::{detect_payload, detect_rows, expense, subscription};

#[test]
fn detect_envelope_reports_command_version_and_counts() {
    let rows = vec![
        expense("2024-01-10", "NETFLIX.COM", 49.90),
        expense("2024-02-09", "netflix.com", 49.90),
    ];
    let payload = detect_payload(&rows, None, None, None);

    assert_eq!(payload["ok"], Value::Bool(true));
    assert_eq!(payload["command"], Value::from("detect"));
    assert!(payload["version"].as_str().is_some());
    assert_eq!(payload["data"]["transactions_scanned"], Value::from(2));
    assert_eq!(payload["data"]["existing_subscriptions"], Value::from(0));
    assert!(
        payload["data"]["source"]
            .as_str()
            .unwrap_or_default()
            .starts_with("file:")
    );

    let candidates = payload["data"]["rows"].as_array().cloned().unwrap_or_default();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["name"], Value::from("Netflix"));
    assert_eq!(candidates[0]["category"], Value::from("streaming"));
    assert_eq!(candidates[0]["billing_day"], Value::from(9));
    assert_eq!(candidates[0]["last_charge_date"], Value::from("2024-02-09"));
    assert_eq!(candidates[0]["icon"], Value::from("🎬"));
    assert_eq!(candidates[0]["is_active"], Value::Bool(true));
    assert_eq!(candidates[0]["detected_automatically"], Value::Bool(true));
}

#[test]
fn subscriptions_file_suppresses_known_candidates() {
    let rows = vec![
        expense("2024-01-10", "NETFLIX.COM", 49.90),
        expense("2024-02-09", "NETFLIX.COM", 49.90),
        expense("2024-01-05", "Local Gym Membership", 15.0),
        expense("2024-02-04", "Local Gym Membership", 15.0),
    ];
    let existing = vec![subscription("netflix", 49.90, "NETFLIX")];

    let candidates = detect_rows(&rows, Some(&existing), None, None);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["name"], Value::from("Local Gym Membership"));
    assert_eq!(candidates[0]["category"], Value::from("other"));
    assert!(candidates[0].get("icon").is_none());
}

#[test]
fn date_filter_bounds_participating_rows() {
    let rows = vec![
        expense("2024-01-10", "NETFLIX.COM", 49.90),
        expense("2024-02-09", "NETFLIX.COM", 49.90),
        expense("2024-03-10", "NETFLIX.COM", 49.90),
    ];

    // The third charge falls outside the window; two remain, still a group.
    let payload = detect_payload(&rows, None, Some("2024-01-01"), Some("2024-02-28"));
    assert_eq!(payload["data"]["transactions_scanned"], Value::from(2));
    assert_eq!(payload["data"]["from"], Value::from("2024-01-01"));
    assert_eq!(payload["data"]["to"], Value::from("2024-02-28"));
    let candidates = payload["data"]["rows"].as_array().cloned().unwrap_or_default();
    assert_eq!(candidates.len(), 1);

    // A window keeping only one charge cannot establish recurrence.
    let narrow = detect_rows(&rows, None, Some("2024-02-01"), Some("2024-02-28"));
    assert!(narrow.is_empty());
}

#[test]
fn rows_sort_by_name_for_stable_display() {
    let rows = vec![
        expense("2024-01-02", "SPOTIFY AB", 19.90),
        expense("2024-02-01", "SPOTIFY AB", 19.90),
        expense("2024-01-10", "NETFLIX.COM", 49.90),
        expense("2024-02-09", "NETFLIX.COM", 49.90),
    ];
    let candidates = detect_rows(&rows, None, None, None);
    let names = candidates
        .iter()
        .map(|row| row["name"].as_str().unwrap_or_default())
        .collect::<Vec<&str>>();
    assert_eq!(names, vec!["Netflix", "Spotify"]);
}

#[test]
fn stdin_source_is_accepted_for_transactions() {
    let body = r#"[
        {"date": "2024-01-10", "description": "NETFLIX.COM", "amount": 49.90, "type": "expense"},
        {"date": "2024-02-09", "description": "NETFLIX.COM", "amount": 49.90, "type": "expense"}
    ]"#;
    let result = detect::run_with_options(DetectRunOptions {
        transactions_path: Some("-".to_string()),
        subscriptions_path: None,
        from: None,
        to: None,
        stdin_override: Some(body.to_string()),
    });
    assert!(result.is_ok());
    if let Ok(success) = result {
        assert_eq!(success.data["source"], Value::from("stdin"));
        let rows = success.data["rows"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 1);
    }
}

#[test]
fn missing_transactions_file_is_an_invalid_argument() {
    let result = detect::run_with_options(DetectRunOptions {
        transactions_path: Some("/nonexistent/subscope-rows.json".to_string()),
        subscriptions_path: None,
        from: None,
        to: None,
        stdin_override: Some(String::new()),
    });
    assert!(result.is_err());
    if let Err(error) = result {
        assert_eq!(error.code, "invalid_argument");
        assert!(!error.recovery_steps.is_empty());
    }
}

#[test]
fn inverted_date_range_is_rejected_before_loading() {
    let result = detect::run_with_options(DetectRunOptions {
        transactions_path: Some("/nonexistent/subscope-rows.json".to_string()),
        subscriptions_path: None,
        from: Some("2024-03-01".to_string()),
        to: Some("2024-01-01".to_string()),
        stdin_override: Some(String::new()),
    });
    assert!(result.is_err());
    if let Err(error) = result {
        assert!(error.message.contains("`from` must be on or before `to`"));
    }
}
