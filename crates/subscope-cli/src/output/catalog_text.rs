use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_catalog(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("catalog output requires rows"))?;

    let mut lines = vec![
        format!("{} known vendors, in match-precedence order.", rows.len()),
        "A charge description is matched against tokens top to bottom; the first hit wins."
            .to_string(),
        String::new(),
    ];

    let columns = [
        Column {
            name: "#",
            align: Align::Right,
        },
        Column {
            name: "Vendor",
            align: Align::Left,
        },
        Column {
            name: "Token",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                row.get("position")
                    .and_then(Value::as_u64)
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
                format!(
                    "{} {}",
                    row.get("icon").and_then(Value::as_str).unwrap_or(" "),
                    row.get("display_name").and_then(Value::as_str).unwrap_or("unknown"),
                ),
                row.get("token").and_then(Value::as_str).unwrap_or("").to_string(),
                row.get("category").and_then(Value::as_str).unwrap_or("").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Vendor",
    ));

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_catalog;

    #[test]
    fn catalog_renders_positions_and_vendor_names() {
        let data = json!({
            "rows": [
                {"position": 1, "token": "NETFLIX", "display_name": "Netflix", "category": "streaming", "icon": "🎬"},
                {"position": 2, "token": "SPOTIFY", "display_name": "Spotify", "category": "music", "icon": "🎵"},
            ],
        });
        let rendered = render_catalog(&data);
        assert!(rendered.is_ok());
        if let Ok(body) = rendered {
            assert!(body.starts_with("2 known vendors"));
            assert!(body.contains("Netflix"));
            assert!(body.contains("NETFLIX"));
        }
    }
}
