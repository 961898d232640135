use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::detect::catalog::{FALLBACK_CATEGORY, UNNAMED_SUBSCRIPTION, match_vendor};
use crate::detect::types::{
    CandidateSubscription, ExistingSubscription, Transaction, TransactionKind,
};

/// Inclusive window for the mean day-gap of a group to classify as a
/// monthly recurrence. The policy is deliberately a single mean over the
/// whole series, not a per-gap tolerance: a `[20, 40]` gap series passes.
/// Other cadences are not classified.
const MIN_MEAN_GAP_DAYS: f64 = 25.0;
const MAX_MEAN_GAP_DAYS: f64 = 35.0;

/// Dedup rule (b): an existing subscription within this many currency units
/// of the candidate, whose vendor token contains the candidate's token,
/// suppresses the candidate.
const DEDUP_AMOUNT_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone)]
struct UsableCharge {
    date: NaiveDate,
    description: String,
    amount: f64,
}

/// Infers monthly recurring subscriptions from a raw transaction history.
///
/// Pure and advisory: malformed rows are excluded silently, edge cases
/// degrade to an empty result, and nothing here ever persists or raises.
/// Output order is unspecified; callers wanting a stable order sort.
pub fn detect_subscriptions(
    transactions: &[Transaction],
    existing: &[ExistingSubscription],
) -> Vec<CandidateSubscription> {
    let usable = usable_charges(transactions);
    if usable.len() < 2 {
        return Vec::new();
    }

    let mut groups: BTreeMap<String, Vec<UsableCharge>> = BTreeMap::new();
    for charge in usable {
        groups.entry(group_key(&charge)).or_default().push(charge);
    }

    let mut candidates: Vec<CandidateSubscription> = Vec::new();
    for rows in groups.values_mut() {
        if rows.len() < 2 {
            continue;
        }
        rows.sort_by_key(|charge| charge.date);

        let mean = mean_gap_days(rows);
        if !(MIN_MEAN_GAP_DAYS..=MAX_MEAN_GAP_DAYS).contains(&mean) {
            continue;
        }

        let candidate = build_candidate(rows);
        if is_duplicate(&candidate, existing) {
            continue;
        }
        candidates.push(candidate);
    }

    candidates
}

fn usable_charges(transactions: &[Transaction]) -> Vec<UsableCharge> {
    let mut usable: Vec<UsableCharge> = Vec::new();
    for transaction in transactions {
        if transaction.kind != TransactionKind::Expense {
            continue;
        }
        let Some(date) = transaction.date else {
            continue;
        };
        let Some(amount) = transaction.amount else {
            continue;
        };
        if amount == 0.0 {
            continue;
        }

        usable.push(UsableCharge {
            date,
            description: transaction.description.clone().unwrap_or_default(),
            amount,
        });
    }
    usable
}

/// Normalized description plus whole-unit rounded amount. Exact equality
/// only: description or amount drift of half a unit or more starts a new
/// group, which then needs two fresh occurrences before re-detection.
fn group_key(charge: &UsableCharge) -> String {
    format!(
        "{}_{}",
        charge.description.trim().to_lowercase(),
        charge.amount.round() as i64
    )
}

fn mean_gap_days(rows: &[UsableCharge]) -> f64 {
    let gaps: Vec<i64> = rows
        .windows(2)
        .map(|pair| (pair[1].date - pair[0].date).num_days())
        .collect();
    if gaps.is_empty() {
        return 0.0;
    }
    (gaps.iter().sum::<i64>() as f64) / (gaps.len() as f64)
}

/// Vendor text comes from the earliest charge; the representative amount,
/// billing day, and last-charge date come from the latest one.
fn build_candidate(rows: &[UsableCharge]) -> CandidateSubscription {
    let first = &rows[0];
    let last = &rows[rows.len() - 1];
    let raw_description = first.description.trim();

    let (name, vendor_token, category) = match match_vendor(raw_description) {
        Some(entry) => (
            entry.display_name.to_string(),
            entry.token.to_string(),
            entry.category.to_string(),
        ),
        None => {
            let name = if raw_description.is_empty() {
                UNNAMED_SUBSCRIPTION.to_string()
            } else {
                raw_description.to_string()
            };
            (
                name,
                raw_description.to_uppercase(),
                FALLBACK_CATEGORY.to_string(),
            )
        }
    };

    CandidateSubscription {
        name,
        vendor_token,
        amount: last.amount,
        category,
        billing_day: last.date.day(),
        last_charge_date: last.date,
        is_active: true,
        detected_automatically: true,
    }
}

/// OR of two rules, the second itself an AND. A single existing
/// subscription satisfying either rule suppresses the candidate.
fn is_duplicate(candidate: &CandidateSubscription, existing: &[ExistingSubscription]) -> bool {
    existing.iter().any(|subscription| {
        if subscription.name.to_lowercase() == candidate.name.to_lowercase() {
            return true;
        }
        (subscription.amount - candidate.amount).abs() <= DEDUP_AMOUNT_TOLERANCE
            && subscription
                .vendor_token
                .to_uppercase()
                .contains(&candidate.vendor_token)
    })
}
