use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_detect(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("detect output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No new subscriptions detected.",
            "",
            "A subscription needs at least two expense charges with the same",
            "description and amount, roughly a month apart. Already-tracked",
            "subscriptions are never proposed again.",
        ]
        .join("\n"));
    }

    let from = data.get("from").and_then(Value::as_str);
    let to = data.get("to").and_then(Value::as_str);

    let mut lines = vec![
        detect_heading(rows.len(), from, to),
        String::new(),
        "Candidates:".to_string(),
    ];

    let columns = [
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Billing Day",
            align: Align::Right,
        },
        Column {
            name: "Last Charge",
            align: Align::Left,
        },
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                display_name(row),
                row.get("category")
                    .and_then(Value::as_str)
                    .unwrap_or("other")
                    .to_string(),
                format_amount(row),
                row.get("billing_day")
                    .and_then(Value::as_u64)
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                row.get("last_charge_date")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Candidate",
    ));

    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.push(format!(
        "  Scanned {} transactions against {} tracked subscriptions.",
        data.get("transactions_scanned")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        data.get("existing_subscriptions")
            .and_then(Value::as_u64)
            .unwrap_or(0),
    ));
    lines.push("  Accept a candidate by adding it to your tracker; rerun after new imports.".to_string());

    Ok(lines.join("\n"))
}

fn detect_heading(count: usize, from: Option<&str>, to: Option<&str>) -> String {
    let noun = if count == 1 {
        "candidate subscription"
    } else {
        "candidate subscriptions"
    };
    match (from, to) {
        (Some(start), Some(end)) => format!("Found {count} {noun} between {start} and {end}."),
        (Some(start), None) => format!("Found {count} {noun} since {start}."),
        (None, Some(end)) => format!("Found {count} {noun} through {end}."),
        (None, None) => format!("Found {count} {noun}."),
    }
}

fn display_name(row: &Value) -> String {
    let name = row.get("name").and_then(Value::as_str).unwrap_or("unknown");
    match row.get("icon").and_then(Value::as_str) {
        Some(icon) => format!("{icon} {name}"),
        None => name.to_string(),
    }
}

fn format_amount(row: &Value) -> String {
    row.get("amount")
        .and_then(Value::as_f64)
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| "unknown".to_string())
}
