use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use subscope_client::commands::detect::{self, DetectRunOptions};
use tempfile::Builder;

pub fn transaction(date: &str, description: &str, amount: f64, kind: &str) -> Value {
    json!({
        "date": date,
        "description": description,
        "amount": amount,
        "type": kind,
    })
}

pub fn expense(date: &str, description: &str, amount: f64) -> Value {
    transaction(date, description, amount, "expense")
}

pub fn subscription(name: &str, amount: f64, vendor_token: &str) -> Value {
    json!({
        "name": name,
        "amount": amount,
        "vendor_token": vendor_token,
    })
}

pub fn detect_payload(
    transactions: &[Value],
    subscriptions: Option<&[Value]>,
    from: Option<&str>,
    to: Option<&str>,
) -> Value {
    let temp_dir = Builder::new()
        .prefix("subscope-detect-fixture")
        .tempdir_in("/tmp");
    assert!(temp_dir.is_ok());
    if let Ok(dir) = temp_dir {
        let transactions_path = write_fixture_json(dir.path(), "rows.json", transactions);
        assert!(transactions_path.is_ok());
        let subscriptions_path = subscriptions.map(|rows| {
            let written = write_fixture_json(dir.path(), "subscriptions.json", rows);
            assert!(written.is_ok());
            written.unwrap_or_default()
        });

        if let Ok(path) = transactions_path {
            let result = detect::run_with_options(DetectRunOptions {
                transactions_path: Some(path.display().to_string()),
                subscriptions_path: subscriptions_path
                    .as_ref()
                    .map(|value| value.display().to_string()),
                from: from.map(std::string::ToString::to_string),
                to: to.map(std::string::ToString::to_string),
                stdin_override: Some(String::new()),
            });
            assert!(result.is_ok());
            if let Ok(success) = result {
                let payload = serde_json::to_value(success);
                assert!(payload.is_ok());
                if let Ok(value) = payload {
                    return value;
                }
            }
        }
    }
    Value::Null
}

pub fn detect_rows(
    transactions: &[Value],
    subscriptions: Option<&[Value]>,
    from: Option<&str>,
    to: Option<&str>,
) -> Vec<Value> {
    detect_payload(transactions, subscriptions, from, to)["data"]["rows"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

pub fn run_scenario(transactions: &[Value]) -> Vec<Value> {
    detect_rows(transactions, None, None, None)
}

pub fn candidate_exists(rows: &[Value], name: &str, category: &str) -> bool {
    rows.iter().any(|row| {
        row.get("name").and_then(Value::as_str) == Some(name)
            && row.get("category").and_then(Value::as_str) == Some(category)
    })
}

fn write_fixture_json(base: &Path, name: &str, rows: &[Value]) -> std::io::Result<PathBuf> {
    let path = base.join(name);
    let body = serde_json::to_string_pretty(rows).map_err(std::io::Error::other)?;
    fs::write(&path, body)?;
    Ok(path)
}
