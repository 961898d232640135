use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// A raw transaction as the caller's store hands it over. Fields the store
/// could not populate stay `None`; the detector excludes such rows itself.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub kind: TransactionKind,
}

/// An already-tracked subscription, used only as a dedup oracle.
#[derive(Debug, Clone, Deserialize)]
pub struct ExistingSubscription {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub vendor_token: String,
}

/// A proposed subscription awaiting user confirmation. Never persisted by
/// this crate; ownership of write-back belongs to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSubscription {
    pub name: String,
    pub vendor_token: String,
    pub amount: f64,
    pub category: String,
    pub billing_day: u32,
    pub last_charge_date: NaiveDate,
    pub is_active: bool,
    pub detected_automatically: bool,
}
