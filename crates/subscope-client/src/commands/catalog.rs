use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CatalogData, CatalogRow};
use crate::detect::catalog::VENDOR_CATALOG;

/// Lists the vendor catalog in declaration order. Position is 1-based and
/// is the match precedence users observe during detection.
pub fn run() -> ClientResult<SuccessEnvelope> {
    let rows = VENDOR_CATALOG
        .iter()
        .enumerate()
        .map(|(index, entry)| CatalogRow {
            position: index + 1,
            token: entry.token.to_string(),
            display_name: entry.display_name.to_string(),
            category: entry.category.to_string(),
            icon: entry.icon.to_string(),
        })
        .collect::<Vec<CatalogRow>>();

    success("catalog", CatalogData { rows })
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::run;

    #[test]
    fn catalog_rows_preserve_declaration_order() {
        let envelope = run();
        assert!(envelope.is_ok());
        if let Ok(success) = envelope {
            assert_eq!(success.command, "catalog");
            let rows = success.data["rows"].as_array().cloned().unwrap_or_default();
            assert!(!rows.is_empty());
            assert_eq!(rows[0]["token"], Value::from("NETFLIX"));
            for (index, row) in rows.iter().enumerate() {
                assert_eq!(row["position"], Value::from(index + 1));
            }
        }
    }
}
