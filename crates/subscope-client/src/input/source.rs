use std::fs;
use std::io::{IsTerminal, Read};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) source_ref: Option<String>,
    pub(crate) content: String,
}

impl ResolvedSource {
    pub(crate) fn label(&self) -> String {
        match (&self.source_kind, &self.source_ref) {
            (SourceKind::File, Some(path)) => format!("file:{path}"),
            _ => "stdin".to_string(),
        }
    }
}

/// Resolves the transaction source: exactly one of a file path or piped
/// stdin. `-` forces stdin.
pub(crate) fn resolve_source(
    path: Option<String>,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    let stdin_body = read_stdin(stdin_override)?;
    let has_stdin = stdin_body
        .as_ref()
        .map(|value| !value.trim().is_empty())
        .unwrap_or(false);

    if let Some(path_value) = path {
        if path_value == "-" {
            if let Some(stdin_value) = stdin_body
                && !stdin_value.trim().is_empty()
            {
                return Ok(ResolvedSource {
                    source_kind: SourceKind::Stdin,
                    source_ref: None,
                    content: stdin_value,
                });
            }

            return Err(ClientError::invalid_argument(
                "Path `-` means stdin input, but stdin was empty. Pipe JSON/CSV input or pass a file path.",
            ));
        }

        let file_body = fs::read_to_string(&path_value)
            .map_err(|error| ClientError::input_file_unreadable(&path_value, &error.to_string()))?;

        if has_stdin {
            return Err(ClientError::invalid_argument(
                "Both stdin and file input were provided. Pass exactly one source: either a file path or piped stdin.",
            ));
        }

        return Ok(ResolvedSource {
            source_kind: SourceKind::File,
            source_ref: Some(path_value),
            content: file_body,
        });
    }

    if let Some(stdin_value) = stdin_body
        && !stdin_value.trim().is_empty()
    {
        return Ok(ResolvedSource {
            source_kind: SourceKind::Stdin,
            source_ref: None,
            content: stdin_value,
        });
    }

    Err(ClientError::invalid_argument(
        "No transaction source provided. Pass a file path or pipe input via stdin.",
    ))
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(body) = stdin_override {
        return Ok(Some(body));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut body = String::new();
    stdin
        .read_to_string(&mut body)
        .map_err(|error| ClientError::invalid_argument(&format!("Could not read stdin: {error}")))?;
    Ok(Some(body))
}
