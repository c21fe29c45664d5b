//! Tokenizer for command lines.
//!
//! A line is split on whitespace; the first token names the command and the
//! rest are its arguments.

use super::types::{keywords, Command};

/// Malformed arguments for a known command.
///
/// These are fatal: the caller is expected to stop processing input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// DEPEND without a parent and at least one dependency.
    #[error("DEPEND command is incomplete. Requires a parent component and its dependency. Eg) DEPEND TELNET TCPIP")]
    IncompleteDepend,

    /// INSTALL without exactly one component.
    #[error("Invalid syntax for INSTALL command. Eg) INSTALL TELNET")]
    InvalidInstall,

    /// REMOVE without exactly one component.
    #[error("Invalid syntax for REMOVE command. Eg) REMOVE TELNET")]
    InvalidRemove,
}

/// Result type alias for line parsing.
pub type ParseResult<T> = Result<T, UsageError>;

/// Parses a single command line.
///
/// Returns `Ok(None)` for lines with no tokens.
///
/// # Example
///
/// ```
/// use compdeps::parser::{parse_line, Command};
///
/// let cmd = parse_line("INSTALL TELNET").unwrap();
/// assert_eq!(cmd, Some(Command::Install("TELNET".to_string())));
///
/// assert!(parse_line("INSTALL").is_err());
/// assert_eq!(parse_line("   ").unwrap(), None);
/// ```
pub fn parse_line(line: &str) -> ParseResult<Option<Command>> {
    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = tokens.collect();

    let command = match name {
        keywords::DEPEND => match args.split_first() {
            Some((parent, dependencies)) if !dependencies.is_empty() => Command::Depend {
                parent: parent.to_string(),
                dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            },
            _ => return Err(UsageError::IncompleteDepend),
        },
        keywords::INSTALL => match args.as_slice() {
            [component] => Command::Install(component.to_string()),
            _ => return Err(UsageError::InvalidInstall),
        },
        keywords::REMOVE => match args.as_slice() {
            [component] => Command::Remove(component.to_string()),
            _ => return Err(UsageError::InvalidRemove),
        },
        keywords::LIST => Command::List,
        keywords::END => Command::End,
        other => Command::Unknown(other.to_string()),
    };

    Ok(Some(command))
}
