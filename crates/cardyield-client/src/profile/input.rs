use std::fs;
use std::io::{IsTerminal, Read};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) kind: SourceKind,
    pub(crate) reference: Option<String>,
    pub(crate) content: String,
}

/// Reads spending input from a path, `-` for stdin, or piped stdin when no
/// path is given. Exactly one source may be supplied.
pub(crate) fn resolve_source(
    path: Option<&str>,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    let stdin_body = read_stdin(stdin_override)?;

    if let Some(path_value) = path {
        if path_value == "-" {
            if let Some(body) = stdin_body {
                return Ok(ResolvedSource {
                    kind: SourceKind::Stdin,
                    reference: None,
                    content: body,
                });
            }
            return Err(ClientError::invalid_argument(
                "Path `-` means stdin input, but stdin was empty. Pipe a spending profile or pass a file path.",
            ));
        }

        if stdin_body.is_some() {
            return Err(ClientError::invalid_argument(
                "Both stdin and a file path were provided. Pass exactly one spending source.",
            ));
        }

        let body = fs::read_to_string(path_value).map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read spending file `{path_value}`: {error}"),
                vec![
                    "Verify the path exists and is readable.".to_string(),
                    "Rerun the command with a valid spending file.".to_string(),
                ],
            )
        })?;

        return Ok(ResolvedSource {
            kind: SourceKind::File,
            reference: Some(path_value.to_string()),
            content: body,
        });
    }

    if let Some(body) = stdin_body {
        return Ok(ResolvedSource {
            kind: SourceKind::Stdin,
            reference: None,
            content: body,
        });
    }

    Err(ClientError::invalid_argument_with_recovery(
        "No spending profile provided. Pass a file path or pipe input via stdin.",
        vec![
            "Run `cardyield validate <path>` to check a spending file first.".to_string(),
            "Or run `cardyield demo` to see a sample calculation.".to_string(),
        ],
    ))
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(non_blank(value));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec!["Retry with an explicit file path argument.".to_string()],
            )
        })?;

    Ok(non_blank(buffer))
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    Some(value)
}
