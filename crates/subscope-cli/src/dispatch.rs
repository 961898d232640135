use subscope_client::commands;
use subscope_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Detect {
            path,
            subscriptions,
            from,
            to,
            ..
        } => commands::detect::run(
            path.as_deref(),
            subscriptions.as_deref(),
            from.as_ref().map(|value| value.as_str()),
            to.as_ref().map(|value| value.as_str()),
        ),
        Commands::Catalog { .. } => commands::catalog::run(),
    }
}
