use std::fs;

use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CandidateRow, DetectData};
use crate::detect::catalog::icon_for_token;
use crate::detect::date::{build_filter, format_iso_date};
use crate::detect::detector::detect_subscriptions;
use crate::detect::types::{ExistingSubscription, Transaction};
use crate::input::parse::{parse_subscriptions, parse_transactions};
use crate::input::source::resolve_source;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct DetectRunOptions {
    pub transactions_path: Option<String>,
    pub subscriptions_path: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub stdin_override: Option<String>,
}

pub fn run(
    transactions_path: Option<&str>,
    subscriptions_path: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(DetectRunOptions {
        transactions_path: transactions_path.map(std::string::ToString::to_string),
        subscriptions_path: subscriptions_path.map(std::string::ToString::to_string),
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: DetectRunOptions) -> ClientResult<SuccessEnvelope> {
    let filter = build_filter(options.from.as_deref(), options.to.as_deref(), "detect")?;
    let source = resolve_source(options.transactions_path, options.stdin_override)?;
    let transactions = parse_transactions(&source.content)?
        .into_iter()
        .filter(|row: &Transaction| filter.admits(row.date))
        .collect::<Vec<Transaction>>();
    let existing = load_subscriptions(options.subscriptions_path.as_deref())?;

    let candidates = detect_subscriptions(&transactions, &existing);

    let mut rows = candidates
        .iter()
        .map(|candidate| CandidateRow {
            name: candidate.name.clone(),
            vendor_token: candidate.vendor_token.clone(),
            amount: candidate.amount,
            category: candidate.category.clone(),
            icon: icon_for_token(&candidate.vendor_token).map(std::string::ToString::to_string),
            billing_day: candidate.billing_day,
            last_charge_date: format_iso_date(&candidate.last_charge_date),
            is_active: candidate.is_active,
            detected_automatically: candidate.detected_automatically,
        })
        .collect::<Vec<CandidateRow>>();

    // Detection order is set semantics; fix a display order here.
    rows.sort_by(|left, right| {
        left.name
            .cmp(&right.name)
            .then_with(|| left.amount.total_cmp(&right.amount))
    });

    let data = DetectData {
        source: source.label(),
        from: filter.from.as_ref().map(format_iso_date),
        to: filter.to.as_ref().map(format_iso_date),
        transactions_scanned: transactions.len(),
        existing_subscriptions: existing.len(),
        rows,
    };

    success("detect", data)
}

fn load_subscriptions(path: Option<&str>) -> ClientResult<Vec<ExistingSubscription>> {
    let Some(path_value) = path else {
        return Ok(Vec::new());
    };
    let body = fs::read_to_string(path_value)
        .map_err(|error| ClientError::input_file_unreadable(path_value, &error.to_string()))?;
    parse_subscriptions(&body)
}
