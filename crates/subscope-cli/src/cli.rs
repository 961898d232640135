use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

/// Extended help shown after `subscope detect --help`.
/// Documents the normalized input schema and the detection contract.
pub const DETECT_AFTER_HELP: &str = "\
How detect works:
  Subscope does not talk to your bank. You export transactions into a
  normalized file, then run detection over it. Nothing is persisted;
  accepted candidates are yours to write back wherever you track them.

  Accepted transaction formats:
    JSON — one top-level array of transaction objects
    CSV  — one header row with schema field names

  <path> is a local file path. To read stdin explicitly, use `-`.
  Example: cat rows.json | subscope detect -

Transaction schema:
  JSON example (one top-level array):
  [
    {
      \"date\": \"2024-01-10\",
      \"description\": \"NETFLIX.COM\",
      \"amount\": 49.90,
      \"type\": \"expense\"
    }
  ]

  CSV example (header + rows):
  date,description,amount,type
  2024-01-10,NETFLIX.COM,49.90,expense

Field rules:
  date (required for a row to count):
    Date only, exactly `YYYY-MM-DD`. Rows with unparseable dates are
    excluded from detection, never rejected.

  description (optional):
    Raw charge text from the source. Vendor matching runs over it.

  amount (required for a row to count):
    A positive number. Rows with a missing or zero amount are excluded.

  type (required):
    `expense` or `income`. Only expense rows participate.

Existing subscriptions (--subscriptions <path>):
  A JSON array of `{\"name\", \"amount\", \"vendor_token\"}` objects.
  Candidates matching one of them (same name case-insensitively, or
  amount within 1 unit with a contained vendor token) are not proposed
  again.

What detection means:
  Charges with the same normalized description and whole-unit amount are
  grouped; a group of two or more whose mean day gap lands in the 25-35
  window is proposed as a monthly subscription. Weekly, quarterly, and
  annual cadences are not detected. Run `subscope catalog` to see vendor
  match precedence.
";

#[derive(Debug, Parser)]
#[command(
    name = "subscope",
    version,
    about = "recurring subscription detector for personal finance exports",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect monthly recurring subscriptions in a transaction export
    #[command(after_long_help = DETECT_AFTER_HELP)]
    Detect {
        /// Path to a normalized JSON or CSV transaction file (use `-` for stdin)
        path: Option<String>,
        /// Path to a JSON array of already-tracked subscriptions used for dedup
        #[arg(long)]
        subscriptions: Option<String>,
        /// Start date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Show the vendor catalog in match-precedence order
    Catalog {
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{Commands, parse_from};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 8] = [
            vec!["subscope", "detect", "rows.json"],
            vec!["subscope", "detect", "-"],
            vec!["subscope", "detect", "rows.csv", "--json"],
            vec!["subscope", "detect", "rows.json", "--subscriptions", "subs.json"],
            vec!["subscope", "detect", "rows.json", "--from", "2024-01-01"],
            vec![
                "subscope", "detect", "rows.json", "--from", "2024-01-01", "--to", "2024-12-31",
            ],
            vec!["subscope", "catalog"],
            vec!["subscope", "catalog", "--json"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse {case:?}");
        }
    }

    #[test]
    fn detect_captures_paths_and_filters() {
        let parsed = parse_from([
            "subscope",
            "detect",
            "rows.json",
            "--subscriptions",
            "subs.json",
            "--from",
            "2024-01-01",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            if let Commands::Detect {
                path,
                subscriptions,
                from,
                json,
                ..
            } = cli.command
            {
                assert_eq!(path.as_deref(), Some("rows.json"));
                assert_eq!(subscriptions.as_deref(), Some("subs.json"));
                assert_eq!(from.map(|value| value.0), Some("2024-01-01".to_string()));
                assert!(!json);
            } else {
                unreachable!("expected detect command");
            }
        }
    }

    #[test]
    fn invalid_date_values_fail_parsing() {
        let bad_format = parse_from(["subscope", "detect", "rows.json", "--from", "01-01-2024"]);
        assert!(bad_format.is_err());

        let bad_calendar = parse_from(["subscope", "detect", "rows.json", "--from", "2024-02-30"]);
        assert!(bad_calendar.is_err());
    }

    #[test]
    fn unknown_subcommands_are_rejected() {
        let parsed = parse_from(["subscope", "refresh"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::InvalidSubcommand);
        }
    }

    #[test]
    fn help_subcommand_is_disabled() {
        let parsed = parse_from(["subscope", "help"]);
        assert!(parsed.is_err());
    }
}
