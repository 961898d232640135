mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use subscope_client::ClientError;

use crate::stdout_io::write_stdout_text;

const ROOT_HELP: &str = "Subscope - recurring subscription detector

Usage:
  subscope <command>

Start here:
  subscope detect --help
  subscope catalog
";

const TOP_LEVEL_HELP: &str = "Subscope — recurring subscription detector

USAGE: subscope <command>

Detect subscriptions in your transactions:
  1. subscope detect --help                          Read input schema and detection contract
  2. subscope detect <path>                          Propose subscriptions from a JSON/CSV export
  3. subscope detect <path> --subscriptions <path>   Skip subscriptions you already track

Narrow the window:
  subscope detect <path> --from 2024-01-01 --to 2024-12-31

Inspect vendor matching:
  subscope catalog                                   Show known vendors in match-precedence order

Machine output:
  Add --json to any command for a stable JSON contract.

Having issues or errors?
  Run `subscope <command> --help` for command usage.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let body = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&body).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let mode = infer_requested_output_mode(&raw_args);
            let parse_error = ClientError::invalid_argument(&strip_clap_boilerplate(&err.to_string()));
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };

    let mode = output::mode_for_command(&cli.command);
    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(ExitCode::from(1))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args
        .iter()
        .skip(1)
        .all(|arg| arg == "--help" || arg == "-h" || arg == "help")
}

/// Failed parses still honor an explicitly requested JSON contract.
fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|arg| arg == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn strip_clap_boilerplate(message: &str) -> String {
    let without_usage = message.split("\nUsage:").next().unwrap_or(message);
    without_usage
        .trim_start_matches("error: ")
        .trim()
        .to_string()
}
