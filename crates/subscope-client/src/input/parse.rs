use std::collections::HashMap;

use serde_json::Value;

use crate::detect::date::parse_transaction_date;
use crate::detect::types::{ExistingSubscription, Transaction, TransactionKind};
use crate::{ClientError, ClientResult};

const REQUIRED_HEADERS: [&str; 3] = ["date", "amount", "type"];
const OPTIONAL_HEADERS: [&str; 1] = ["description"];

/// Parses a normalized transaction source: a JSON top-level array or a CSV
/// with schema headers. Format errors reject the whole source; field-level
/// problems degrade per row (absent date/amount, dropped unknown kind),
/// matching the detector's own exclusion semantics.
pub(crate) fn parse_transactions(content: &str) -> ClientResult<Vec<Transaction>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_argument("Transaction source is empty."));
    }

    if looks_like_ndjson(trimmed) {
        return Err(ClientError::invalid_input_format(
            "NDJSON is not supported. Provide a JSON array or CSV.",
            "ndjson",
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if trimmed.starts_with('{') {
        return Err(ClientError::invalid_input_format(
            "JSON input must be a top-level array of transaction objects.",
            "json_non_array",
        ));
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    Err(ClientError::invalid_input_format(
        "Unsupported input format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

/// Parses an existing-subscription file: a JSON top-level array of
/// `{name, amount, vendor_token}` objects. Rows missing a name or amount
/// are skipped; the file is only a dedup oracle.
pub(crate) fn parse_subscriptions(content: &str) -> ClientResult<Vec<ExistingSubscription>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let parsed = serde_json::from_str::<Value>(trimmed).map_err(|_| {
        ClientError::invalid_argument("Invalid subscriptions JSON. Provide a valid JSON array.")
    })?;
    let Some(items) = parsed.as_array() else {
        return Err(ClientError::invalid_argument(
            "Subscriptions JSON must be a top-level array of objects.",
        ));
    };

    let mut subscriptions: Vec<ExistingSubscription> = Vec::new();
    for item in items {
        let Some(object) = item.as_object() else {
            continue;
        };
        let Some(name) = object.get("name").and_then(Value::as_str) else {
            continue;
        };
        let Some(amount) = object.get("amount").and_then(Value::as_f64) else {
            continue;
        };

        subscriptions.push(ExistingSubscription {
            name: name.to_string(),
            amount,
            vendor_token: object
                .get("vendor_token")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        });
    }

    Ok(subscriptions)
}

fn parse_json_array(content: &str) -> ClientResult<Vec<Transaction>> {
    let parsed = serde_json::from_str::<Value>(content).map_err(|_| {
        ClientError::invalid_argument("Invalid JSON input. Provide a valid JSON array.")
    })?;

    let Some(items) = parsed.as_array() else {
        return Err(ClientError::invalid_argument(
            "JSON input must be a top-level array of transaction objects.",
        ));
    };

    let mut rows: Vec<Transaction> = Vec::new();
    for item in items {
        let Some(object) = item.as_object() else {
            return Err(ClientError::invalid_argument(
                "JSON array entries must all be objects with transaction fields.",
            ));
        };

        let date = read_string(object.get("date"));
        let description = read_string(object.get("description"));
        let amount = match object.get("amount") {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => read_amount_text(Some(text.clone())),
            _ => None,
        };
        let kind = read_string(object.get("type"));

        if let Some(row) = build_row(date, description, amount, kind) {
            rows.push(row);
        }
    }

    Ok(rows)
}

fn parse_csv(content: &str) -> ClientResult<Vec<Transaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| ClientError::invalid_argument("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(ClientError::input_schema_mismatch(
            REQUIRED_HEADERS.iter().map(|v| (*v).to_string()).collect(),
            OPTIONAL_HEADERS.iter().map(|v| (*v).to_string()).collect(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows: Vec<Transaction> = Vec::new();
    for result_row in reader.records() {
        let record = result_row
            .map_err(|_| ClientError::invalid_argument("CSV rows are malformed or not UTF-8."))?;

        let date = value_for(&record, &index_by_name, "date");
        let description = value_for(&record, &index_by_name, "description");
        let amount = read_amount_text(value_for(&record, &index_by_name, "amount"));
        let kind = value_for(&record, &index_by_name, "type");

        if let Some(row) = build_row(date, description, amount, kind) {
            rows.push(row);
        }
    }

    Ok(rows)
}

fn build_row(
    date: Option<String>,
    description: Option<String>,
    amount: Option<f64>,
    kind: Option<String>,
) -> Option<Transaction> {
    // Rows without a recognizable income/expense kind carry no signal for
    // detection and are dropped at the loader.
    let kind = TransactionKind::parse(kind.as_deref().unwrap_or(""))?;

    Some(Transaction {
        date: date.as_deref().and_then(parse_transaction_date),
        description,
        amount,
        kind,
    })
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    name: &str,
) -> Option<String> {
    let index = *index_by_name.get(name)?;
    let value = record.get(index)?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

fn read_string(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.to_string())
}

fn read_amount_text(value: Option<String>) -> Option<f64> {
    value?.trim().parse::<f64>().ok()
}

fn looks_like_ndjson(content: &str) -> bool {
    let mut object_lines = 0usize;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !trimmed.starts_with('{') {
            return false;
        }
        object_lines += 1;
    }
    object_lines > 1
}

fn looks_like_csv(content: &str) -> bool {
    content
        .lines()
        .next()
        .map(|line| line.contains(','))
        .unwrap_or(false)
}

fn headers_are_valid(actual_headers: &[String]) -> bool {
    for required in REQUIRED_HEADERS {
        if !actual_headers.iter().any(|header| header == required) {
            return false;
        }
    }
    actual_headers.iter().all(|header| {
        REQUIRED_HEADERS.contains(&header.as_str()) || OPTIONAL_HEADERS.contains(&header.as_str())
    })
}
