use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
    pub name: String,
    pub vendor_token: String,
    pub amount: f64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub billing_day: u32,
    pub last_charge_date: String,
    pub is_active: bool,
    pub detected_automatically: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectData {
    /// Where the transactions came from: `stdin` or `file:<path>`.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub transactions_scanned: usize,
    pub existing_subscriptions: usize,
    pub rows: Vec<CandidateRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogRow {
    pub position: usize,
    pub token: String,
    pub display_name: String,
    pub category: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogData {
    pub rows: Vec<CatalogRow>,
}
